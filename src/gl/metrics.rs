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
use rust_decimal::Decimal;
use tracing::warn;

/// Dashboard figures derived from the two ledgers. Never persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Metrics {
	pub total_sales: Decimal,
	pub total_profit: Decimal,
	pub total_cost_of_sales: Decimal,
	pub total_stock_expense: Decimal,

	/// Cost of sales minus stock expense: the money from sales that should
	/// still be on hand to restock with.
	pub remaining_capital: Decimal,

	/// How many fields were left out of the totals because they did not
	/// parse.
	pub skipped: usize,
}

/// Adds a field into a running total, or counts it as skipped. A bad field
/// only drops that field; the rest of its record still counts. A value that
/// would push the total past what `Decimal` can hold is skipped the same way.
fn accumulate(
	total: &mut Decimal,
	skipped: &mut usize,
	field: crate::error::Result<Decimal>,
	row: usize,
	column: &'static str,
	date: &str,
) {
	match field {
		Ok(v) => match total.checked_add(v) {
			Some(sum) => *total = sum,
			None => {
				warn!(
					row,
					column,
					date,
					value = %v,
					"skipping field: total overflows"
				);
				*skipped += 1;
			},
		},
		Err(e) => {
			warn!(row, column, date, "skipping field: {}", e);
			*skipped += 1;
		},
	}
}

/// Sums each column of both ledgers. Never fails: malformed amounts are
/// skipped, and empty ledgers give all zeroes.
pub fn compute_metrics(sales: &[SalesRecord], stock: &[StockRecord]) -> Metrics {
	let mut m = Metrics::default();

	for (i, r) in sales.iter().enumerate() {
		let date = r.raw_date();
		accumulate(
			&mut m.total_sales,
			&mut m.skipped,
			r.sales(),
			i + 1,
			"sales",
			date,
		);
		accumulate(
			&mut m.total_profit,
			&mut m.skipped,
			r.profit(),
			i + 1,
			"profit",
			date,
		);
		accumulate(
			&mut m.total_cost_of_sales,
			&mut m.skipped,
			r.cost(),
			i + 1,
			"cost",
			date,
		);
	}

	for (i, r) in stock.iter().enumerate() {
		accumulate(
			&mut m.total_stock_expense,
			&mut m.skipped,
			r.price(),
			i + 1,
			"price",
			r.raw_date(),
		);
	}

	let (cost, expense) = (m.total_cost_of_sales, m.total_stock_expense);
	m.remaining_capital = match cost.checked_sub(expense) {
		Some(v) => v,
		None => {
			// only reachable with negative prices edited into the ledger
			warn!("remaining capital overflows, clamping");
			cost.saturating_sub(expense)
		},
	};
	m
}
