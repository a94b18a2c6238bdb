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
use crate::gl::record::{Record, SalesRecord, StockRecord};
use crate::reports::table::Table;

/// Lists a ledger newest first, showing cells exactly as stored so that a
/// damaged row is visible rather than hidden.
pub struct ListingReporter {
	table: Table,
	is_empty: bool,
}

impl ListingReporter {
	pub fn stock(records: &[StockRecord]) -> Self {
		let mut table = Table::new(4);
		table.right_align(vec![3]);
		table.add_header(vec!["Date", "Owner", "Item", "Price"]);
		table.add_separator();
		for r in records.iter().rev() {
			table.add_row(vec![
				r.raw_date().to_string(),
				r.owner().to_string(),
				r.item().to_string(),
				r.raw_price().to_string(),
			]);
		}

		Self {
			table,
			is_empty: records.is_empty(),
		}
	}

	pub fn sales(records: &[SalesRecord]) -> Self {
		let mut table = Table::new(4);
		table.right_align(vec![1, 2, 3]);
		table.add_header(vec!["Date", "Sales", "Profit", "Cost"]);
		table.add_separator();
		for r in records.iter().rev() {
			table.add_row(vec![
				r.raw_date().to_string(),
				r.raw_sales().to_string(),
				r.raw_profit().to_string(),
				r.raw_cost().to_string(),
			]);
		}

		Self {
			table,
			is_empty: records.is_empty(),
		}
	}

	pub fn render(&self) -> String {
		if self.is_empty {
			return "No records yet.\n".to_string();
		}
		self.table.render()
	}

	pub fn print(&self) {
		print!("{}", self.render());
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn row(cells: &[&str]) -> Vec<String> {
		cells.iter().map(|c| c.to_string()).collect()
	}

	#[test]
	fn test_stock_newest_first() {
		let records = vec![
			StockRecord::from_row(&row(&["10-02-2024", "Amir", "Milk", "25.50"])),
			StockRecord::from_row(&row(&["12-02-2024", "Afiq", "Cups", "8.00"])),
		];
		let expected = concat!(
			"   Date    | Owner | Item | Price\n",
			"---------------------------------\n",
			"12-02-2024   Afiq    Cups    8.00\n",
			"10-02-2024   Amir    Milk   25.50\n",
		);
		assert_eq!(ListingReporter::stock(&records).render(), expected);
	}

	#[test]
	fn test_shows_damaged_cells_verbatim() {
		let records = vec![SalesRecord::from_row(&row(&["bad", "x", "1", "0"]))];
		let out = ListingReporter::sales(&records).render();
		assert!(out.contains("bad"));
		assert!(out.lines().any(|l| l.starts_with("bad ") && l.contains(" x ")));
	}

	#[test]
	fn test_empty() {
		assert_eq!(ListingReporter::stock(&[]).render(), "No records yet.\n");
	}
}
