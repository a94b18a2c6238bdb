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
use chrono::{Datelike, Local};
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::sync::OnceLock;

/// A calendar date with no time component. Reads and writes the shop's
/// canonical `DD-MM-YYYY` text form.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct Date {
	year: u32,
	month: u8,
	day: u8,
}

fn shape() -> &'static Regex {
	static SHAPE: OnceLock<Regex> = OnceLock::new();
	// ASCII digits only; `\d` would also match other scripts' digits
	SHAPE.get_or_init(|| {
		Regex::new(r"^([0-9]{2})-([0-9]{2})-([0-9]{4})$").unwrap()
	})
}

impl Date {
	/// Parses a string in the "DD-MM-YYYY" format. Day and month must be
	/// two digits and the year four; surrounding whitespace is ignored.
	pub fn parse(date_str: &str) -> Result<Date> {
		let trimmed = date_str.trim();
		let caps = shape()
			.captures(trimmed)
			.ok_or_else(|| LedgerError::invalid("date", date_str))?;

		let invalid = |_| LedgerError::invalid("date", date_str);
		let day = caps[1].parse::<u8>().map_err(invalid)?;
		let month = caps[2].parse::<u8>().map_err(invalid)?;
		let year = caps[3].parse::<u32>().map_err(invalid)?;

		if !Date::is_valid_date(year, month, day) {
			return Err(LedgerError::invalid("date", date_str));
		}

		Ok(Date { year, month, day })
	}

	/// Parses the capture-time form: empty input means today.
	pub fn parse_or_today(date_str: &str) -> Result<Date> {
		if date_str.trim().is_empty() {
			Ok(Date::today())
		} else {
			Date::parse(date_str)
		}
	}

	pub fn today() -> Date {
		let now = Local::now().date_naive();
		Date {
			year: now.year() as u32,
			month: now.month() as u8,
			day: now.day() as u8,
		}
	}

	fn is_leap_year(year: u32) -> bool {
		(year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
	}

	fn days_in_month(year: u32, month: u8) -> u8 {
		match month {
			1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
			4 | 6 | 9 | 11 => 30,
			2 => {
				if Date::is_leap_year(year) {
					29
				} else {
					28
				}
			},
			_ => 0,
		}
	}

	fn is_valid_date(year: u32, month: u8, day: u8) -> bool {
		if year == 0 || !(1..=12).contains(&month) {
			return false;
		}
		day >= 1 && day <= Date::days_in_month(year, month)
	}
}

impl PartialOrd for Date {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for Date {
	fn cmp(&self, other: &Self) -> Ordering {
		(self.year, self.month, self.day).cmp(&(
			other.year,
			other.month,
			other.day,
		))
	}
}

impl fmt::Display for Date {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:02}-{:02}-{:04}", self.day, self.month, self.year)
	}
}
