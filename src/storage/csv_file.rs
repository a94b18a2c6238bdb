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
use crate::storage::{Table, TableStore};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Keeps each table as a CSV file in one directory. The table name is the
/// file name.
pub struct CsvStore {
	dir: PathBuf,
}

impl CsvStore {
	pub fn new(dir: impl Into<PathBuf>) -> Self {
		Self { dir: dir.into() }
	}

	pub fn dir(&self) -> &Path {
		&self.dir
	}

	fn path(&self, table: &str) -> PathBuf {
		self.dir.join(table)
	}
}

fn to_cells(record: &StringRecord) -> Vec<String> {
	record.iter().map(|c| c.to_string()).collect()
}

impl TableStore for CsvStore {
	fn read_all(&self, table: &str) -> Result<Option<Table>> {
		let path = self.path(table);
		let file = match File::open(&path) {
			Ok(f) => f,
			Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
			Err(e) => return Err(e.into()),
		};

		// flexible, because hand-edited files often have ragged rows
		let mut reader = ReaderBuilder::new()
			.has_headers(true)
			.flexible(true)
			.from_reader(file);

		let header = to_cells(reader.headers()?);
		let mut rows = Vec::new();
		for record in reader.records() {
			rows.push(to_cells(&record?));
		}

		debug!(path = %path.display(), rows = rows.len(), "read csv table");
		Ok(Some(Table { header, rows }))
	}

	/// Writes to a sibling temporary file first and renames it over the
	/// table, so a failed write leaves the previous file intact.
	fn write_all(&mut self, table: &str, data: &Table) -> Result<()> {
		fs::create_dir_all(&self.dir)?;

		let path = self.path(table);
		let tmp = self.path(&format!(".{}.tmp", table));

		{
			let mut writer =
				WriterBuilder::new().flexible(true).from_path(&tmp)?;
			writer.write_record(&data.header)?;
			for row in &data.rows {
				writer.write_record(row)?;
			}
			writer.flush()?;
		}

		fs::rename(&tmp, &path)?;
		debug!(path = %path.display(), rows = data.rows.len(), "wrote csv table");
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn cells(c: &[&str]) -> Vec<String> {
		c.iter().map(|s| s.to_string()).collect()
	}

	#[test]
	fn test_missing_file_reads_as_none() {
		let dir = tempfile::tempdir().unwrap();
		let store = CsvStore::new(dir.path());
		assert_eq!(store.read_all("garisbawah.csv").unwrap(), None);
	}

	#[test]
	fn test_write_then_read() {
		let dir = tempfile::tempdir().unwrap();
		let mut store = CsvStore::new(dir.path().join("nested"));

		let table = Table {
			header: cells(&["Tarikh", "User", "Item", "Harga"]),
			rows: vec![cells(&["10-02-2024", "Amir", "Milk, 2L", "25.50"])],
		};
		store.write_all("stock.csv", &table).unwrap();

		assert_eq!(store.read_all("stock.csv").unwrap(), Some(table));
		assert!(!dir.path().join("nested/.stock.csv.tmp").exists());
	}

	#[test]
	fn test_reads_existing_file_layout() {
		let dir = tempfile::tempdir().unwrap();
		fs::write(
			dir.path().join("garisbawah.csv"),
			"Tarikh,Sales,Profit,Kos\n15-02-2024,50.0,20.0,30.0\n01-03-2024,100.0\n",
		)
		.unwrap();

		let store = CsvStore::new(dir.path());
		let table = store.read_all("garisbawah.csv").unwrap().unwrap();
		assert_eq!(table.header, cells(&["Tarikh", "Sales", "Profit", "Kos"]));
		assert_eq!(table.rows.len(), 2);
		assert_eq!(table.rows[1], cells(&["01-03-2024", "100.0"]));
	}

	#[test]
	fn test_unreadable_path_is_storage_error() {
		let dir = tempfile::tempdir().unwrap();
		// a directory where the file should be
		fs::create_dir(dir.path().join("stock.csv")).unwrap();

		let store = CsvStore::new(dir.path());
		let err = store.read_all("stock.csv").unwrap_err();
		assert!(err.is_storage());
	}
}
