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
use crate::gl::metrics::{compute_metrics, Metrics};
use crate::gl::record::{Record, SalesRecord};
use crate::util::date::Date;
use rust_decimal::Decimal;
use tracing::warn;

/// The sales recorded between two dates, and their totals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RangeReport {
	pub start: Date,
	pub end: Date,
	pub records: Vec<SalesRecord>,

	/// Totals over `records` only. No stock purchases are involved, so the
	/// stock expense is zero.
	pub totals: Metrics,
}

impl RangeReport {
	pub fn total_profit(&self) -> Decimal {
		self.totals.total_profit
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}
}

/// Selects the sales dated from `start` to `end`, both inclusive, compared
/// as calendar dates. Records whose date does not parse are left out. An
/// inverted range matches nothing.
pub fn report_range(sales: &[SalesRecord], start: Date, end: Date) -> RangeReport {
	let mut records = Vec::new();

	if start <= end {
		for (i, r) in sales.iter().enumerate() {
			match r.date() {
				Ok(d) if start <= d && d <= end => records.push(r.clone()),
				Ok(_) => {},
				Err(e) => warn!(row = i + 1, "excluded from report: {}", e),
			}
		}
	}

	let totals = compute_metrics(&records, &[]);
	RangeReport {
		start,
		end,
		records,
		totals,
	}
}
