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
use rust_decimal::Decimal;
use std::str::FromStr;

/// Number of decimal places money is written and shown with.
pub const MONEY_DP: u32 = 2;

/// Parses a monetary amount. Accepts plain decimals ("12", "12.5", "-3.40")
/// and, since spreadsheet exports sometimes produce them, scientific
/// notation ("1.2e3").
pub fn parse_amount(raw: &str) -> Result<Decimal> {
	let trimmed = raw.trim();
	if trimmed.is_empty() {
		return Err(LedgerError::invalid("amount", raw));
	}

	Decimal::from_str(trimmed)
		.or_else(|_| Decimal::from_scientific(trimmed))
		.map_err(|_| LedgerError::invalid("amount", raw))
}

/// Same as `parse_amount`, but also refuses anything below zero. Used where
/// the user types a figure in.
pub fn parse_non_negative(raw: &str) -> Result<Decimal> {
	let value = parse_amount(raw)?;
	if value.is_sign_negative() && !value.is_zero() {
		return Err(LedgerError::invalid("non-negative amount", raw));
	}
	Ok(value)
}

/// Renders an amount with two decimal places, banker's rounding.
pub fn format_amount(value: Decimal) -> String {
	format!("{:.2}", value.round_dp(MONEY_DP))
}

/// Renders an amount prefixed with the currency label, e.g. "RM 12.50".
pub fn format_money(currency: &str, value: Decimal) -> String {
	format!("{} {}", currency, format_amount(value))
}
