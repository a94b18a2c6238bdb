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
use crate::gl::range::RangeReport;
use crate::gl::record::Record;
use crate::reports::figure_line;
use crate::reports::table::Table;

/// Closing-the-books report: the sales in a period and their totals.
pub struct PeriodReporter<'a> {
	report: &'a RangeReport,
	currency: &'a str,
}

impl<'a> PeriodReporter<'a> {
	pub fn new(report: &'a RangeReport, currency: &'a str) -> Self {
		Self { report, currency }
	}

	pub fn render(&self) -> String {
		let r = self.report;
		if r.is_empty() {
			return format!("No records found from {} to {}.\n", r.start, r.end);
		}

		let mut table = Table::new(4);
		table.right_align(vec![1, 2, 3]);
		table.add_header(vec!["Date", "Sales", "Profit", "Cost"]);
		table.add_separator();
		for record in &r.records {
			table.add_row(vec![
				record.raw_date().to_string(),
				record.raw_sales().to_string(),
				record.raw_profit().to_string(),
				record.raw_cost().to_string(),
			]);
		}
		table.add_separator();

		let mut out = format!("Records from {} to {}:\n", r.start, r.end);
		out.push_str(&table.render());
		for line in [
			figure_line("Total Sales", self.currency, r.totals.total_sales),
			figure_line("Total Profit", self.currency, r.total_profit()),
			figure_line(
				"Cost of Sales",
				self.currency,
				r.totals.total_cost_of_sales,
			),
		] {
			out.push_str(&line);
			out.push('\n');
		}
		out
	}

	pub fn print(&self) {
		print!("{}", self.render());
	}
}
