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
use crate::storage::http::{Client, Rejection, Reply};
use crate::storage::{Table, TableStore};
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

pub const SHEETS_API_URL: &str = "https://sheets.googleapis.com/v4";

/// How the values API words a 400 for a worksheet that does not exist.
const MISSING_SHEET: &str = "Unable to parse range";

/// Keeps each table as a worksheet of one remote spreadsheet, through the
/// spreadsheet values API. The table name is the worksheet title.
///
/// Rows are written as raw text, so dates stay in `DD-MM-YYYY` form rather
/// than being reinterpreted by the spreadsheet's locale.
pub struct SheetsStore {
	http: Client,
	spreadsheet_id: String,
}

// -------------
// -- SENDING --
// -------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValueInput {
	value_input_option: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValueRangeOut<'a> {
	range: &'a str,
	major_dimension: &'static str,
	values: Vec<&'a Vec<String>>,
}

#[derive(Debug, Serialize)]
struct BatchUpdate {
	requests: Vec<AddSheetRequest>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AddSheetRequest {
	add_sheet: AddSheet,
}

#[derive(Debug, Serialize)]
struct AddSheet {
	properties: SheetProperties,
}

#[derive(Debug, Serialize)]
struct SheetProperties {
	title: String,
}

// ---------------
// -- RECEIVING --
// ---------------

#[derive(Debug, Deserialize)]
struct ValueRangeIn {
	#[serde(default)]
	values: Vec<Vec<serde_json::Value>>,
}

/// Acknowledgement bodies we do not need to inspect.
#[derive(Debug, Deserialize)]
struct Ignored {}

/// Cells come back as strings by default, but numbers and booleans are
/// possible when a sheet was edited by hand.
fn cell_to_string(value: serde_json::Value) -> String {
	match value {
		serde_json::Value::String(s) => s,
		serde_json::Value::Null => String::new(),
		other => other.to_string(),
	}
}

impl ValueRangeIn {
	/// Blank rows inside the range are kept. The table is written back from
	/// A1 without clearing, so it must never come back shorter than the
	/// worksheet it was read from.
	fn into_table(self) -> Table {
		let mut rows = self
			.values
			.into_iter()
			.map(|row| row.into_iter().map(cell_to_string).collect::<Vec<_>>());

		let header = rows.next().unwrap_or_default();
		Table {
			header,
			rows: rows.collect(),
		}
	}
}

fn is_missing_sheet(rejection: &Rejection) -> bool {
	rejection.status == StatusCode::BAD_REQUEST
		&& rejection.message.starts_with(MISSING_SHEET)
}

impl SheetsStore {
	pub fn new(
		api_url: &str,
		api_key: String,
		spreadsheet_id: &str,
		timeout: Duration,
	) -> Result<Self> {
		Ok(Self {
			http: Client::new(api_url, api_key, timeout)?,
			spreadsheet_id: spreadsheet_id.to_string(),
		})
	}

	fn put_values(&self, sheet: &str, data: &Table) -> Result<Reply<Ignored>> {
		let url = self.http.url(&[
			"spreadsheets",
			&self.spreadsheet_id,
			"values",
			sheet,
		])?;

		let mut values = Vec::with_capacity(data.rows.len() + 1);
		values.push(&data.header);
		values.extend(data.rows.iter());

		let body = ValueRangeOut {
			range: sheet,
			major_dimension: "ROWS",
			values,
		};

		self.http.send(
			Method::PUT,
			url,
			Some(&ValueInput {
				value_input_option: "RAW",
			}),
			Some(&body),
		)
	}

	fn add_sheet(&self, sheet: &str) -> Result<()> {
		let url = self.http.url(&[
			"spreadsheets",
			&format!("{}:batchUpdate", self.spreadsheet_id),
		])?;

		let body = BatchUpdate {
			requests: vec![AddSheetRequest {
				add_sheet: AddSheet {
					properties: SheetProperties {
						title: sheet.to_string(),
					},
				},
			}],
		};

		match self.http.send::<(), _, Ignored>(
			Method::POST,
			url,
			None,
			Some(&body),
		)? {
			Reply::Found(_) => {
				info!(sheet, "created worksheet");
				Ok(())
			},
			Reply::Rejected(r) => Err(r.into_error(&format!(
				"adding worksheet {} to spreadsheet {}",
				sheet, self.spreadsheet_id
			))),
		}
	}
}

impl TableStore for SheetsStore {
	fn read_all(&self, table: &str) -> Result<Option<Table>> {
		let url = self.http.url(&[
			"spreadsheets",
			&self.spreadsheet_id,
			"values",
			table,
		])?;

		match self.http.send::<(), (), ValueRangeIn>(
			Method::GET,
			url,
			None,
			None,
		)? {
			Reply::Found(range) => Ok(Some(range.into_table())),
			Reply::Rejected(r) if is_missing_sheet(&r) => Ok(None),
			Reply::Rejected(r) => Err(r.into_error(&format!("reading {}", table))),
		}
	}

	/// Overwrites the worksheet from A1. Tables read from a worksheet keep
	/// every row, and ledgers only grow, so there are never stale rows below
	/// the ones written.
	fn write_all(&mut self, table: &str, data: &Table) -> Result<()> {
		match self.put_values(table, data)? {
			Reply::Found(_) => return Ok(()),
			Reply::Rejected(r) if is_missing_sheet(&r) => {},
			Reply::Rejected(r) => {
				return Err(r.into_error(&format!("writing {}", table)))
			},
		}

		self.add_sheet(table)?;
		match self.put_values(table, data)? {
			Reply::Found(_) => Ok(()),
			Reply::Rejected(r) => Err(r.into_error(&format!(
				"writing {} after creating it",
				table
			))),
		}
	}
}
