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
use crate::error::{LedgerError, Result};
use crate::storage::{Table, TableStore};
use std::collections::BTreeMap;

/// Table store kept entirely in memory. Used as the fake backend in tests;
/// can be switched offline to simulate an unreachable backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
	tables: BTreeMap<String, Table>,
	writes: usize,
	offline: bool,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&mut self, table: &str, data: Table) {
		self.tables.insert(table.to_string(), data);
	}

	pub fn get(&self, table: &str) -> Option<&Table> {
		self.tables.get(table)
	}

	/// Number of successful `write_all` calls so far.
	pub fn writes(&self) -> usize {
		self.writes
	}

	pub fn set_offline(&mut self, offline: bool) {
		self.offline = offline;
	}
}

impl TableStore for MemoryStore {
	fn read_all(&self, table: &str) -> Result<Option<Table>> {
		if self.offline {
			return Err(LedgerError::StorageUnavailable(format!(
				"memory store offline reading {}",
				table
			)));
		}
		Ok(self.tables.get(table).cloned())
	}

	fn write_all(&mut self, table: &str, data: &Table) -> Result<()> {
		if self.offline {
			return Err(LedgerError::StorageUnavailable(format!(
				"memory store offline writing {}",
				table
			)));
		}
		self.tables.insert(table.to_string(), data.clone());
		self.writes += 1;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_missing_table_is_none() {
		let store = MemoryStore::new();
		assert_eq!(store.read_all("Sales").unwrap(), None);
	}

	#[test]
	fn test_write_then_read() {
		let mut store = MemoryStore::new();
		let t = Table::with_header(vec!["a".into()]);
		store.write_all("t", &t).unwrap();
		assert_eq!(store.read_all("t").unwrap(), Some(t));
		assert_eq!(store.writes(), 1);
	}

	#[test]
	fn test_offline_is_storage_error() {
		let mut store = MemoryStore::new();
		store.set_offline(true);
		assert!(store.read_all("t").unwrap_err().is_storage());
		assert!(store
			.write_all("t", &Table::default())
			.unwrap_err()
			.is_storage());
	}
}
