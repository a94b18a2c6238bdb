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
use crate::gl::record::{SalesRecord, StockRecord};
use crate::util::date::Date;
use crate::util::money::parse_non_negative;
use tracing::warn;

/// Validates a day's sales as typed by the user. Strict: any malformed
/// field rejects the whole entry. An empty date means today.
pub fn capture_sales(date: &str, sales: &str, profit: &str) -> Result<SalesRecord> {
	let date = Date::parse_or_today(date)?;
	let sales = parse_non_negative(sales)?;
	let profit = parse_non_negative(profit)?;

	if profit > sales {
		warn!(%date, %sales, %profit, "profit exceeds sales, cost will be negative");
	}

	Ok(SalesRecord::new(date, sales, profit))
}

/// Validates a stock purchase as typed by the user. An empty date means
/// today and an empty owner falls back to `default_owner`.
pub fn capture_stock(
	date: &str,
	owner: &str,
	item: &str,
	price: &str,
	default_owner: &str,
) -> Result<StockRecord> {
	let date = Date::parse_or_today(date)?;
	let price = parse_non_negative(price)?;

	let owner = match owner.trim() {
		"" => default_owner,
		o => o,
	};

	Ok(StockRecord::new(date, owner, item.trim(), price))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::LedgerError;
	use crate::gl::record::Record;
	use rust_decimal::Decimal;

	#[test]
	fn test_sales_ok() {
		let r = capture_sales("01-03-2024", "100", "40").unwrap();
		assert_eq!(r.raw_date(), "01-03-2024");
		assert_eq!(r.raw_cost(), "60.00");
	}

	#[test]
	fn test_sales_empty_date_is_today() {
		let r = capture_sales("", "1", "1").unwrap();
		assert_eq!(r.raw_date(), Date::today().to_string());
	}

	#[test]
	fn test_sales_rejects_bad_number() {
		assert!(matches!(
			capture_sales("01-03-2024", "lots", "40"),
			Err(LedgerError::InvalidFormat { .. })
		));
		assert!(capture_sales("01-03-2024", "100", "").is_err());
	}

	#[test]
	fn test_sales_rejects_negative() {
		assert!(capture_sales("01-03-2024", "-1", "0").is_err());
		assert!(capture_sales("01-03-2024", "1", "-1").is_err());
	}

	#[test]
	fn test_sales_rejects_bad_date() {
		assert!(matches!(
			capture_sales("1/3/2024", "1", "1"),
			Err(LedgerError::InvalidFormat { what: "date", .. })
		));
	}

	#[test]
	fn test_sales_allows_loss_day() {
		let r = capture_sales("01-03-2024", "10", "15").unwrap();
		assert_eq!(r.cost().unwrap(), Decimal::from(-5));
	}

	#[test]
	fn test_stock_ok() {
		let r = capture_stock("10-02-2024", "Amir", " Milk ", "25.5", "Unknown")
			.unwrap();
		assert_eq!(r.owner(), "Amir");
		assert_eq!(r.item(), "Milk");
		assert_eq!(r.raw_price(), "25.50");
	}

	#[test]
	fn test_stock_default_owner() {
		let r = capture_stock("10-02-2024", "  ", "Milk", "1", "Unknown").unwrap();
		assert_eq!(r.owner(), "Unknown");
	}

	#[test]
	fn test_stock_rejects_bad_price() {
		assert!(capture_stock("10-02-2024", "Amir", "Milk", "RM5", "U").is_err());
		assert!(capture_stock("10-02-2024", "Amir", "Milk", "-5", "U").is_err());
	}
}
