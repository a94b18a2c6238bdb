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
pub mod check_reporter;
pub mod listing_reporter;
pub mod period_reporter;
pub mod table;

use crate::util::money::format_money;
use rust_decimal::Decimal;

/// One labelled figure, e.g. `Total Sales       : RM 150.00`. Labels are
/// padded so the colons line up.
pub fn figure_line(label: &str, currency: &str, value: Decimal) -> String {
	format!("{:<17} : {}", label, format_money(currency, value))
}
