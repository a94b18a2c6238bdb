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
use crate::error::Result;
use crate::util::date::Date;
use crate::util::money::{format_amount, parse_amount};
use rust_decimal::Decimal;

/// The two ledgers the shop keeps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RecordKind {
	Sales,
	Stock,
}

impl RecordKind {
	pub const ALL: [RecordKind; 2] = [RecordKind::Sales, RecordKind::Stock];

	/// Canonical column header. Column order is the persisted contract, so
	/// these names are only written, never used to look columns up.
	pub fn header(&self) -> Vec<String> {
		let cols: [&str; 4] = match self {
			RecordKind::Sales => ["Tarikh", "Sales", "Profit", "Kos"],
			RecordKind::Stock => ["Tarikh", "User", "Item", "Harga"],
		};
		cols.iter().map(|c| c.to_string()).collect()
	}

	pub fn name(&self) -> &'static str {
		match self {
			RecordKind::Sales => "sales",
			RecordKind::Stock => "stock",
		}
	}
}

/// Anything that lives as one row in a ledger table.
///
/// Records hold their cells as the text that was stored, so that a ledger
/// edited by hand (or by a spreadsheet) still loads; fields are parsed only
/// when they are used.
pub trait Record: Sized {
	const KIND: RecordKind;

	/// Builds a record from a stored row. Missing trailing cells read as
	/// empty and extra cells are dropped.
	fn from_row(row: &[String]) -> Self;

	fn to_row(&self) -> Vec<String>;

	fn raw_date(&self) -> &str;

	fn date(&self) -> Result<Date> {
		Date::parse(self.raw_date())
	}
}

fn cell(row: &[String], i: usize) -> String {
	row.get(i).cloned().unwrap_or_default()
}

/// One day's takings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SalesRecord {
	date: String,
	sales: String,
	profit: String,
	cost: String,
}

impl SalesRecord {
	/// Cost is fixed here as sales minus profit and stored with the record;
	/// it is never recomputed on read. A negative cost (profit above sales)
	/// is allowed.
	pub fn new(date: Date, sales: Decimal, profit: Decimal) -> Self {
		Self {
			date: date.to_string(),
			sales: format_amount(sales),
			profit: format_amount(profit),
			cost: format_amount(sales - profit),
		}
	}

	pub fn sales(&self) -> Result<Decimal> {
		parse_amount(&self.sales)
	}

	pub fn profit(&self) -> Result<Decimal> {
		parse_amount(&self.profit)
	}

	pub fn cost(&self) -> Result<Decimal> {
		parse_amount(&self.cost)
	}

	pub fn raw_sales(&self) -> &str {
		&self.sales
	}

	pub fn raw_profit(&self) -> &str {
		&self.profit
	}

	pub fn raw_cost(&self) -> &str {
		&self.cost
	}
}

impl Record for SalesRecord {
	const KIND: RecordKind = RecordKind::Sales;

	fn from_row(row: &[String]) -> Self {
		Self {
			date: cell(row, 0),
			sales: cell(row, 1),
			profit: cell(row, 2),
			cost: cell(row, 3),
		}
	}

	fn to_row(&self) -> Vec<String> {
		vec![
			self.date.clone(),
			self.sales.clone(),
			self.profit.clone(),
			self.cost.clone(),
		]
	}

	fn raw_date(&self) -> &str {
		&self.date
	}
}

/// A purchase of stock paid for by one of the owners.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StockRecord {
	date: String,
	owner: String,
	item: String,
	price: String,
}

impl StockRecord {
	pub fn new(date: Date, owner: &str, item: &str, price: Decimal) -> Self {
		Self {
			date: date.to_string(),
			owner: owner.to_string(),
			item: item.to_string(),
			price: format_amount(price),
		}
	}

	pub fn owner(&self) -> &str {
		&self.owner
	}

	pub fn item(&self) -> &str {
		&self.item
	}

	pub fn price(&self) -> Result<Decimal> {
		parse_amount(&self.price)
	}

	pub fn raw_price(&self) -> &str {
		&self.price
	}
}

impl Record for StockRecord {
	const KIND: RecordKind = RecordKind::Stock;

	fn from_row(row: &[String]) -> Self {
		Self {
			date: cell(row, 0),
			owner: cell(row, 1),
			item: cell(row, 2),
			price: cell(row, 3),
		}
	}

	fn to_row(&self) -> Vec<String> {
		vec![
			self.date.clone(),
			self.owner.clone(),
			self.item.clone(),
			self.price.clone(),
		]
	}

	fn raw_date(&self) -> &str {
		&self.date
	}
}
