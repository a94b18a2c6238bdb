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
use crate::gl::metrics::Metrics;
use crate::reports::figure_line;

/// The "current check": running totals over both ledgers.
pub struct CheckReporter<'a> {
	metrics: &'a Metrics,
	currency: &'a str,
}

impl<'a> CheckReporter<'a> {
	pub fn new(metrics: &'a Metrics, currency: &'a str) -> Self {
		Self { metrics, currency }
	}

	pub fn render(&self) -> String {
		let m = self.metrics;
		let mut lines = vec![
			"===== CURRENT CHECK =====".to_string(),
			figure_line("Total Sales", self.currency, m.total_sales),
			figure_line("Total Profit", self.currency, m.total_profit),
			figure_line("Cost of Sales", self.currency, m.total_cost_of_sales),
			figure_line("Stock Expense", self.currency, m.total_stock_expense),
			figure_line("Remaining Capital", self.currency, m.remaining_capital),
			"=========================".to_string(),
		];

		if m.skipped > 0 {
			lines.push(format!(
				"Note: {} malformed field(s) left out of the totals",
				m.skipped
			));
		}

		lines.join("\n") + "\n"
	}

	pub fn print(&self) {
		print!("{}", self.render());
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rust_decimal::Decimal;
	use std::str::FromStr;

	fn dec(s: &str) -> Decimal {
		Decimal::from_str(s).unwrap()
	}

	#[test]
	fn test_render() {
		let m = Metrics {
			total_sales: dec("150"),
			total_profit: dec("60"),
			total_cost_of_sales: dec("90"),
			total_stock_expense: dec("25.5"),
			remaining_capital: dec("64.5"),
			skipped: 0,
		};
		let expected = concat!(
			"===== CURRENT CHECK =====\n",
			"Total Sales       : RM 150.00\n",
			"Total Profit      : RM 60.00\n",
			"Cost of Sales     : RM 90.00\n",
			"Stock Expense     : RM 25.50\n",
			"Remaining Capital : RM 64.50\n",
			"=========================\n",
		);
		assert_eq!(CheckReporter::new(&m, "RM").render(), expected);
	}

	#[test]
	fn test_render_mentions_skipped_fields() {
		let m = Metrics {
			skipped: 2,
			..Default::default()
		};
		let out = CheckReporter::new(&m, "RM").render();
		assert!(out.contains("Remaining Capital : RM 0.00"));
		assert!(out.ends_with("Note: 2 malformed field(s) left out of the totals\n"));
	}
}
