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
pub mod form;
pub mod menu;

use crate::gl::ledger::AppendOutcome;
use crate::gl::record::{Record, SalesRecord, StockRecord};

/// Confirmation shown after a sales entry is saved.
pub fn sales_saved(record: &SalesRecord, currency: &str) -> String {
	format!(
		"Saved {}: Sales {} {}, Profit {} {}",
		record.raw_date(),
		currency,
		record.raw_sales(),
		currency,
		record.raw_profit()
	)
}

/// Confirmation shown after a stock purchase is saved.
pub fn stock_saved(record: &StockRecord, currency: &str) -> String {
	format!(
		"Saved {}: {} bought by {} for {} {}",
		record.raw_date(),
		record.item(),
		record.owner(),
		currency,
		record.raw_price()
	)
}

/// Extra line to show when the save went through but the ledger could not
/// be put back in date order.
pub fn sort_note(outcome: &AppendOutcome) -> Option<String> {
	match outcome {
		AppendOutcome::Sorted => None,
		AppendOutcome::SortAborted { row, value } => Some(format!(
			"Warning: ledger left unsorted, row {} has unreadable date {:?}",
			row, value
		)),
	}
}
