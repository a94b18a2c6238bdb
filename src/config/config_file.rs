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
use clap::ValueEnum;
use serde::Deserialize;

pub const DEFAULT_SALES_FILE: &str = "garisbawah.csv";
pub const DEFAULT_STOCK_FILE: &str = "stock.csv";
pub const DEFAULT_SALES_SHEET: &str = "Sales";
pub const DEFAULT_STOCK_SHEET: &str = "Stok";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_CURRENCY: &str = "RM";
pub const DEFAULT_OWNER: &str = "Unknown";
pub const DEFAULT_OWNERS: [&str; 3] = ["Pijoy", "Amir", "Afiq"];

#[derive(Debug, Default, Deserialize)]
pub struct Config {
	pub storage: Option<Storage>,
	pub sheets: Option<Sheets>,
	pub shop: Option<Shop>,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
	/// CSV files in a local directory
	#[default]
	Csv,
	/// Worksheets of a remote spreadsheet
	Sheets,
}

#[derive(Debug, Default, Deserialize)]
pub struct Storage {
	pub backend: Option<Backend>,
	pub data_dir: Option<String>,
	pub sales_file: Option<String>,
	pub stock_file: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Sheets {
	pub spreadsheet_id: Option<String>,
	pub api_url: Option<String>,

	/// Bearer token sent with every request. Mutually exclusive with
	/// api_key_cmd.
	pub api_key: Option<String>,
	/// Shell command whose trimmed output is used as the api_key, e.g.
	/// `gcloud auth print-access-token`.
	pub api_key_cmd: Option<String>,

	pub sales_sheet: Option<String>,
	pub stock_sheet: Option<String>,
	pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Shop {
	/// Label printed before amounts
	pub currency: Option<String>,
	/// Names suggested when asking who paid for stock
	pub owners: Option<Vec<String>>,
	/// Used when no owner is entered
	pub default_owner: Option<String>,
}

/// Shop settings with defaults filled in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShopSettings {
	pub currency: String,
	pub owners: Vec<String>,
	pub default_owner: String,
}

impl Config {
	pub fn backend(&self) -> Backend {
		self.storage
			.as_ref()
			.and_then(|s| s.backend)
			.unwrap_or_default()
	}

	pub fn shop(&self) -> ShopSettings {
		let shop = self.shop.as_ref();
		ShopSettings {
			currency: shop
				.and_then(|s| s.currency.clone())
				.unwrap_or(DEFAULT_CURRENCY.to_owned()),
			owners: shop.and_then(|s| s.owners.clone()).unwrap_or_else(|| {
				DEFAULT_OWNERS.iter().map(|o| o.to_string()).collect()
			}),
			default_owner: shop
				.and_then(|s| s.default_owner.clone())
				.unwrap_or(DEFAULT_OWNER.to_owned()),
		}
	}
}
