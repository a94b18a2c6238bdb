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
use thiserror::Error;

/// Errors raised by the bookkeeping core. The binary boundary wraps these in
/// `anyhow::Error`; the core keeps them typed so callers can tell a rejected
/// input apart from a broken backend.
#[derive(Debug, Error)]
pub enum LedgerError {
	/// Raw input could not be read as the expected number or date.
	#[error("invalid {what}: {value:?}")]
	InvalidFormat { what: &'static str, value: String },

	/// The backend could not be read or written. A missing table is never
	/// reported this way; it reads as empty.
	#[error("storage unavailable: {0}")]
	StorageUnavailable(String),

	/// A resort met a record whose date does not parse. Nothing was
	/// rewritten. `row` is 1-based and excludes the header.
	#[error("sort aborted: row {row} has unreadable date {value:?}")]
	SortAborted { row: usize, value: String },

	#[error("storage unavailable: {0}")]
	Io(#[from] std::io::Error),

	#[error("storage unavailable: {0}")]
	Csv(#[from] csv::Error),
}

impl LedgerError {
	pub fn invalid(what: &'static str, value: &str) -> Self {
		LedgerError::InvalidFormat {
			what,
			value: value.to_string(),
		}
	}

	/// True for every variant that means the backend itself failed.
	pub fn is_storage(&self) -> bool {
		matches!(
			self,
			LedgerError::StorageUnavailable(_)
				| LedgerError::Io(_)
				| LedgerError::Csv(_)
		)
	}
}

pub type Result<T> = std::result::Result<T, LedgerError>;
