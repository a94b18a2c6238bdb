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
pub mod csv_file;
pub mod http;
#[cfg(test)]
pub mod memory;
pub mod sheets;

use crate::error::Result;

/// A whole persisted table: one header row and the data rows beneath it, all
/// as text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
	pub header: Vec<String>,
	pub rows: Vec<Vec<String>>,
}

impl Table {
	pub fn with_header(header: Vec<String>) -> Self {
		Self {
			header,
			rows: Vec::new(),
		}
	}
}

/// A backend that can hold named tables. Access is whole-table only: the
/// ledger reads everything, changes it in memory and writes everything back.
pub trait TableStore {
	/// Returns `None` when the table does not exist yet. Any other failure
	/// to read is an error, never an empty table.
	fn read_all(&self, table: &str) -> Result<Option<Table>>;

	/// Replaces the table's contents, creating the table if needed.
	fn write_all(&mut self, table: &str, data: &Table) -> Result<()>;
}
