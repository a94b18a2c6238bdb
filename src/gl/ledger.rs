/* Copyright © 2024-2025 Adam Train <adam@trainrelay.net>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 */
use crate::error::{LedgerError, Result};
use crate::gl::record::{Record, RecordKind};
use crate::storage::{Table, TableStore};
use crate::util::date::Date;
use tracing::{debug, info, warn};

/// Names of the persisted tables backing each ledger. What a name means is
/// up to the store: a file name for CSV, a worksheet title for a spreadsheet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableNames {
	pub sales: String,
	pub stock: String,
}

impl TableNames {
	pub fn new(sales: &str, stock: &str) -> Self {
		Self {
			sales: sales.to_string(),
			stock: stock.to_string(),
		}
	}

	pub fn get(&self, kind: RecordKind) -> &str {
		match kind {
			RecordKind::Sales => &self.sales,
			RecordKind::Stock => &self.stock,
		}
	}
}

/// The result of a successful append. The row is persisted in both cases.
#[derive(Debug, PartialEq, Eq)]
pub enum AppendOutcome {
	Sorted,
	/// The ledger holds a row with an unreadable date, so it was left in
	/// its previous order with the new row at the end.
	SortAborted { row: usize, value: String },
}

/// The sales and stock ledgers over one table store.
///
/// Each ledger is kept in ascending date order: every append rewrites the
/// whole table and then re-sorts it. This assumes a single writer. Mutating
/// operations take `&mut self`, so one process cannot interleave them, but
/// nothing stops two processes sharing a backend from losing each other's
/// rows.
pub struct Ledger<S: TableStore> {
	store: S,
	tables: TableNames,
}

impl<S: TableStore> Ledger<S> {
	pub fn new(store: S, tables: TableNames) -> Self {
		Self { store, tables }
	}

	#[cfg(test)]
	pub fn store(&self) -> &S {
		&self.store
	}

	#[cfg(test)]
	pub fn store_mut(&mut self) -> &mut S {
		&mut self.store
	}

	pub fn tables(&self) -> &TableNames {
		&self.tables
	}

	/// Creates the table for `kind` with its canonical header if it does not
	/// exist. Returns whether anything was created.
	pub fn ensure_initialized(&mut self, kind: RecordKind) -> Result<bool> {
		let name = self.tables.get(kind);
		if self.store.read_all(name)?.is_some() {
			return Ok(false);
		}

		self.store.write_all(name, &Table::with_header(kind.header()))?;
		info!(table = name, kind = kind.name(), "created ledger table");
		Ok(true)
	}

	/// Writes `record` as the last row of its ledger, then re-sorts the
	/// ledger. A resort that hits an unreadable date does not undo the
	/// append; it is reported in the outcome instead.
	pub fn append<R: Record>(&mut self, record: &R) -> Result<AppendOutcome> {
		let kind = R::KIND;
		let name = self.tables.get(kind).to_string();

		let mut table = match self.store.read_all(&name)? {
			Some(t) => t,
			None => {
				info!(table = %name, kind = kind.name(), "created ledger table");
				Table::with_header(kind.header())
			},
		};
		if table.header.is_empty() {
			table.header = kind.header();
		}

		table.rows.push(record.to_row());
		self.store.write_all(&name, &table)?;
		debug!(table = %name, rows = table.rows.len(), "appended row");

		match self.resort(kind) {
			Ok(()) => Ok(AppendOutcome::Sorted),
			Err(LedgerError::SortAborted { row, value }) => {
				Ok(AppendOutcome::SortAborted { row, value })
			},
			Err(e) => Err(e),
		}
	}

	/// Rewrites the ledger for `kind` in ascending date order, keeping rows
	/// that share a date in their existing order. If any row's date does not
	/// parse, nothing is written and `SortAborted` names the first such row.
	/// A missing table is left alone.
	pub fn resort(&mut self, kind: RecordKind) -> Result<()> {
		let name = self.tables.get(kind).to_string();
		let Some(mut table) = self.store.read_all(&name)? else {
			return Ok(());
		};

		let mut keyed: Vec<(Date, Vec<String>)> =
			Vec::with_capacity(table.rows.len());
		for (i, row) in std::mem::take(&mut table.rows).into_iter().enumerate() {
			let raw = row.first().map(String::as_str).unwrap_or("");
			match Date::parse(raw) {
				Ok(date) => keyed.push((date, row)),
				Err(_) => {
					warn!(
						table = %name,
						row = i + 1,
						value = raw,
						"unreadable date, leaving ledger unsorted"
					);
					return Err(LedgerError::SortAborted {
						row: i + 1,
						value: raw.to_string(),
					});
				},
			}
		}

		if keyed.windows(2).all(|w| w[0].0 <= w[1].0) {
			debug!(table = %name, "already in date order");
			return Ok(());
		}

		// sort_by_key is stable, so same-day rows keep insertion order
		keyed.sort_by_key(|(date, _)| *date);
		table.rows = keyed.into_iter().map(|(_, row)| row).collect();

		self.store.write_all(&name, &table)?;
		debug!(table = %name, rows = table.rows.len(), "resorted ledger");
		Ok(())
	}

	/// Every record of type `R`, in stored order. A ledger that does not
	/// exist yet is empty.
	pub fn load_all<R: Record>(&self) -> Result<Vec<R>> {
		let name = self.tables.get(R::KIND);
		Ok(match self.store.read_all(name)? {
			Some(table) => table.rows.iter().map(|r| R::from_row(r)).collect(),
			None => Vec::new(),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::gl::record::{SalesRecord, StockRecord};
	use crate::storage::memory::MemoryStore;
	use rust_decimal::Decimal;
	use std::str::FromStr;

	fn dec(s: &str) -> Decimal {
		Decimal::from_str(s).unwrap()
	}

	fn sale(date: &str, sales: &str, profit: &str) -> SalesRecord {
		SalesRecord::new(Date::parse(date).unwrap(), dec(sales), dec(profit))
	}

	fn ledger() -> Ledger<MemoryStore> {
		Ledger::new(MemoryStore::new(), TableNames::new("Sales", "Stok"))
	}

	fn dates(records: &[SalesRecord]) -> Vec<&str> {
		records.iter().map(|r| r.raw_date()).collect()
	}

	#[test]
	fn test_ensure_initialized_is_idempotent() {
		let mut l = ledger();
		assert!(l.ensure_initialized(RecordKind::Sales).unwrap());
		assert!(!l.ensure_initialized(RecordKind::Sales).unwrap());
		assert_eq!(l.store().writes(), 1);
		assert_eq!(
			l.store().get("Sales").unwrap(),
			&Table::with_header(RecordKind::Sales.header())
		);
		assert!(l.store().get("Stok").is_none());
	}

	#[test]
	fn test_ensure_initialized_keeps_existing_rows() {
		let mut l = ledger();
		l.append(&sale("01-03-2024", "100", "40")).unwrap();
		assert!(!l.ensure_initialized(RecordKind::Sales).unwrap());
		assert_eq!(l.load_all::<SalesRecord>().unwrap().len(), 1);
	}

	#[test]
	fn test_load_all_missing_is_empty() {
		let l = ledger();
		assert!(l.load_all::<SalesRecord>().unwrap().is_empty());
		assert!(l.load_all::<StockRecord>().unwrap().is_empty());
	}

	#[test]
	fn test_append_creates_table_with_header() {
		let mut l = ledger();
		l.append(&sale("01-03-2024", "100", "40")).unwrap();
		let t = l.store().get("Sales").unwrap();
		assert_eq!(t.header, RecordKind::Sales.header());
		assert_eq!(t.rows.len(), 1);
	}

	#[test]
	fn test_append_resorts_by_date() {
		let mut l = ledger();
		assert_eq!(
			l.append(&sale("01-03-2024", "100.00", "40.00")).unwrap(),
			AppendOutcome::Sorted
		);
		assert_eq!(
			l.append(&sale("15-02-2024", "50.00", "20.00")).unwrap(),
			AppendOutcome::Sorted
		);

		let all = l.load_all::<SalesRecord>().unwrap();
		assert_eq!(dates(&all), vec!["15-02-2024", "01-03-2024"]);
	}

	#[test]
	fn test_sort_is_stable_for_same_day() {
		let mut l = ledger();
		l.append(&sale("02-01-2024", "1", "0")).unwrap();
		l.append(&sale("01-01-2024", "2", "0")).unwrap();
		l.append(&sale("02-01-2024", "3", "0")).unwrap();
		l.append(&sale("01-01-2024", "4", "0")).unwrap();
		l.append(&sale("02-01-2024", "5", "0")).unwrap();

		let sales: Vec<String> = l
			.load_all::<SalesRecord>()
			.unwrap()
			.iter()
			.map(|r| r.raw_sales().to_string())
			.collect();
		assert_eq!(sales, vec!["2.00", "4.00", "1.00", "3.00", "5.00"]);
	}

	#[test]
	fn test_cost_holds_after_append() {
		let mut l = ledger();
		l.append(&sale("01-03-2024", "100.00", "40.00")).unwrap();
		l.append(&sale("02-03-2024", "7.25", "9.75")).unwrap();
		for r in l.load_all::<SalesRecord>().unwrap() {
			assert_eq!(
				r.cost().unwrap(),
				r.sales().unwrap() - r.profit().unwrap()
			);
		}
	}

	#[test]
	fn test_bad_date_aborts_sort_but_keeps_row() {
		let mut l = ledger();
		l.append(&sale("15-02-2024", "50", "20")).unwrap();
		l.append(&sale("01-03-2024", "100", "40")).unwrap();

		let bad = SalesRecord::from_row(&[
			"2024/01/01".to_string(),
			"5".to_string(),
			"1".to_string(),
			"4".to_string(),
		]);
		assert_eq!(
			l.append(&bad).unwrap(),
			AppendOutcome::SortAborted {
				row: 3,
				value: "2024/01/01".into()
			}
		);

		let all = l.load_all::<SalesRecord>().unwrap();
		assert_eq!(dates(&all), vec!["15-02-2024", "01-03-2024", "2024/01/01"]);

		// later valid appends land at the end, still unsorted
		assert!(matches!(
			l.append(&sale("01-01-2024", "1", "1")).unwrap(),
			AppendOutcome::SortAborted { row: 3, .. }
		));
		let all = l.load_all::<SalesRecord>().unwrap();
		assert_eq!(
			dates(&all),
			vec!["15-02-2024", "01-03-2024", "2024/01/01", "01-01-2024"]
		);
	}

	#[test]
	fn test_resort_abort_writes_nothing() {
		let mut l = ledger();
		let mut store_table = Table::with_header(RecordKind::Stock.header());
		store_table.rows = vec![
			vec!["10-02-2024".into(), "Amir".into(), "Milk".into(), "1".into()],
			vec!["".into(), "Afiq".into(), "Beans".into(), "2".into()],
			vec!["01-02-2024".into(), "Pijoy".into(), "Cups".into(), "3".into()],
		];
		l.store.insert("Stok", store_table.clone());

		match l.resort(RecordKind::Stock) {
			Err(LedgerError::SortAborted { row, value }) => {
				assert_eq!(row, 2);
				assert_eq!(value, "");
			},
			other => panic!("unexpected result: {:?}", other),
		}
		assert_eq!(l.store().writes(), 0);
		assert_eq!(l.store().get("Stok"), Some(&store_table));
	}

	#[test]
	fn test_resort_keeps_custom_header() {
		let mut l = ledger();
		let header = vec!["Date".to_string(), "Who".into(), "What".into()];
		l.store.insert(
			"Stok",
			Table {
				header: header.clone(),
				rows: vec![
					vec!["10-02-2024".into(), "Amir".into(), "Milk".into()],
					vec!["01-02-2024".into(), "Afiq".into(), "Cups".into()],
				],
			},
		);

		l.resort(RecordKind::Stock).unwrap();
		let t = l.store().get("Stok").unwrap();
		assert_eq!(t.header, header);
		assert_eq!(t.rows[0][0], "01-02-2024");
	}

	#[test]
	fn test_resort_skips_write_when_sorted() {
		let mut l = ledger();
		l.append(&sale("01-01-2024", "1", "0")).unwrap();
		let before = l.store().writes();
		l.resort(RecordKind::Sales).unwrap();
		assert_eq!(l.store().writes(), before);
	}

	#[test]
	fn test_resort_missing_table_is_noop() {
		let mut l = ledger();
		l.resort(RecordKind::Sales).unwrap();
		assert_eq!(l.store().writes(), 0);
	}

	#[test]
	fn test_empty_header_is_repaired_on_append() {
		let mut l = ledger();
		l.store.insert("Stok", Table::default());
		let r = StockRecord::new(
			Date::parse("10-02-2024").unwrap(),
			"Amir",
			"Milk",
			dec("25.50"),
		);
		l.append(&r).unwrap();
		assert_eq!(
			l.store().get("Stok").unwrap().header,
			RecordKind::Stock.header()
		);
	}

	#[test]
	fn test_storage_failure_is_surfaced() {
		let mut l = ledger();
		l.append(&sale("01-01-2024", "1", "0")).unwrap();
		l.store.set_offline(true);

		assert!(l.load_all::<SalesRecord>().unwrap_err().is_storage());
		assert!(l
			.append(&sale("02-01-2024", "1", "0"))
			.unwrap_err()
			.is_storage());
		assert!(l.ensure_initialized(RecordKind::Stock).unwrap_err().is_storage());
	}

	#[test]
	fn test_kinds_are_independent() {
		let mut l = ledger();
		l.append(&StockRecord::new(
			Date::parse("10-02-2024").unwrap(),
			"Amir",
			"Milk",
			dec("25.50"),
		))
		.unwrap();
		assert!(l.load_all::<SalesRecord>().unwrap().is_empty());
		assert_eq!(l.load_all::<StockRecord>().unwrap().len(), 1);
	}
}
