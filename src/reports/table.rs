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
use std::fmt::Write;

/// Plain-text table for reports that list many single-line records, such as
/// the period report and the stock listing.
pub struct Table {
	column_count: usize,
	rows: Vec<Row>,
	right_align: Vec<bool>, // indicates columns by index
}

pub enum Row {
	Header(Vec<String>),
	Data(Vec<String>),
	Separator,
}

impl Table {
	pub fn new(column_count: usize) -> Self {
		Self {
			column_count,
			rows: Vec::new(),
			right_align: vec![false; column_count],
		}
	}

	pub fn add_header(&mut self, row: Vec<&str>) {
		self.rows.push(Row::Header(
			row.into_iter().map(|s| s.to_string()).collect(),
		));
	}

	pub fn add_row(&mut self, row: Vec<String>) {
		self.rows.push(Row::Data(row));
	}

	pub fn add_separator(&mut self) {
		self.rows.push(Row::Separator);
	}

	/// Specifies columns that should be right-aligned by index.
	pub fn right_align(&mut self, cols: Vec<usize>) {
		for col in cols {
			self.right_align[col] = true;
		}
	}

	/// Lays the table out as text, one line per row, each ending in a
	/// newline. Trailing spaces are trimmed from every line.
	pub fn render(&self) -> String {
		let mut max_widths = vec![0; self.column_count];
		for row in &self.rows {
			if let Row::Data(cells) | Row::Header(cells) = row {
				for (i, value) in cells.iter().enumerate().take(self.column_count)
				{
					max_widths[i] = max_widths[i].max(value.chars().count());
				}
			}
		}

		let mut out = String::new();
		for row in &self.rows {
			let line = match row {
				Row::Header(cells) => self.centered_line(&max_widths, cells),
				Row::Data(cells) => self.data_line(&max_widths, cells),
				Row::Separator => {
					let total = max_widths.iter().sum::<usize>()
						+ 3 * self.column_count.saturating_sub(1);
					"-".repeat(total)
				},
			};
			let _ = writeln!(out, "{}", line.trim_end());
		}
		out
	}

	fn data_line(&self, max_widths: &[usize], cells: &[String]) -> String {
		cells
			.iter()
			.take(self.column_count)
			.enumerate()
			.map(|(i, value)| {
				if self.right_align[i] {
					format!("{:>width$}", value, width = max_widths[i])
				} else {
					format!("{:<width$}", value, width = max_widths[i])
				}
			})
			.collect::<Vec<_>>()
			.join("   ")
	}

	fn centered_line(&self, max_widths: &[usize], cells: &[String]) -> String {
		cells
			.iter()
			.take(self.column_count)
			.enumerate()
			.map(|(i, value)| Table::center_align(value, max_widths[i]))
			.collect::<Vec<_>>()
			.join(" | ")
	}

	fn center_align(value: &str, width: usize) -> String {
		let len = value.chars().count();
		if len >= width {
			return value.to_string();
		}
		let total_padding = width - len;
		let left_padding = total_padding / 2;
		let right_padding = total_padding - left_padding;

		format!(
			"{}{}{}",
			" ".repeat(left_padding),
			value,
			" ".repeat(right_padding)
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_render_layout() {
		let mut table = Table::new(3);
		table.right_align(vec![2]);
		table.add_header(vec!["Date", "Item", "Price"]);
		table.add_separator();
		table.add_row(vec!["10-02-2024".into(), "Milk".into(), "25.50".into()]);
		table.add_row(vec!["11-02-2024".into(), "Coffee beans".into(), "120.00".into()]);

		let expected = concat!(
			"   Date    |     Item     | Price\n",
			"----------------------------------\n",
			"10-02-2024   Milk            25.50\n",
			"11-02-2024   Coffee beans   120.00\n",
		);
		assert_eq!(table.render(), expected);
	}

	#[test]
	fn test_center_align() {
		assert_eq!(Table::center_align("ab", 6), "  ab  ");
		assert_eq!(Table::center_align("ab", 5), " ab  ");
		assert_eq!(Table::center_align("abcdef", 3), "abcdef");
	}

	#[test]
	fn test_width_counts_characters() {
		let mut table = Table::new(2);
		table.add_row(vec!["Kopi ☕".into(), "x".into()]);
		table.add_row(vec!["Teh".into(), "y".into()]);
		assert_eq!(table.render(), "Kopi ☕   x\nTeh      y\n");
	}

	#[test]
	fn test_empty_table() {
		assert_eq!(Table::new(2).render(), "");
	}
}
