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
use crate::capture::form::{capture_sales, capture_stock};
use crate::capture::{sales_saved, sort_note, stock_saved};
use crate::config::config_file::ShopSettings;
use crate::error::LedgerError;
use crate::gl::ledger::Ledger;
use crate::gl::metrics::compute_metrics;
use crate::gl::range::report_range;
use crate::gl::record::{SalesRecord, StockRecord};
use crate::reports::check_reporter::CheckReporter;
use crate::reports::period_reporter::PeriodReporter;
use crate::storage::TableStore;
use crate::util::date::Date;
use anyhow::Error;
use std::io::{BufRead, Write};

/// The interactive prompt loop. Bad input or a failing backend prints an
/// error and returns to the menu; only a broken terminal ends the loop
/// early. End of input quits quietly.
pub struct Menu<'a, S: TableStore, R: BufRead, W: Write> {
	ledger: &'a mut Ledger<S>,
	input: R,
	output: W,
	shop: &'a ShopSettings,
	closed: bool,
}

impl<'a, S: TableStore, R: BufRead, W: Write> Menu<'a, S, R, W> {
	pub fn new(
		ledger: &'a mut Ledger<S>,
		input: R,
		output: W,
		shop: &'a ShopSettings,
	) -> Self {
		Self {
			ledger,
			input,
			output,
			shop,
			closed: false,
		}
	}

	pub fn run(&mut self) -> Result<(), Error> {
		while !self.closed {
			writeln!(self.output)?;
			writeln!(self.output, "[ GARISBAWAH COFFEE ]")?;
			writeln!(self.output, "1. Record sales")?;
			writeln!(self.output, "2. Record stock purchase")?;
			writeln!(self.output, "3. Current check")?;
			writeln!(self.output, "4. Close account (period report)")?;
			writeln!(self.output, "5. Quit")?;

			let Some(choice) = self.ask("Choice: ")? else {
				break;
			};

			match choice.trim() {
				"1" => self.record_sales()?,
				"2" => self.record_stock()?,
				"3" => self.current_check()?,
				"4" => self.close_account()?,
				"5" => {
					writeln!(self.output, "Goodbye!")?;
					break;
				},
				_ => writeln!(self.output, "Invalid choice!")?,
			}
		}

		Ok(())
	}

	/// Prompts and reads one line. `None` means input has ended.
	fn ask(&mut self, prompt: &str) -> Result<Option<String>, Error> {
		write!(self.output, "{}", prompt)?;
		self.output.flush()?;

		let mut line = String::new();
		if self.input.read_line(&mut line)? == 0 {
			self.closed = true;
			writeln!(self.output)?;
			return Ok(None);
		}
		Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
	}

	fn error(&mut self, e: LedgerError) -> Result<(), Error> {
		writeln!(self.output, "Error: {}", e)?;
		if e.is_storage() {
			writeln!(self.output, "The ledger backend could not be reached.")?;
		}
		Ok(())
	}

	fn record_sales(&mut self) -> Result<(), Error> {
		writeln!(self.output, "\n--- [1] RECORD DAILY SALES ---")?;
		let currency = self.shop.currency.clone();

		let Some(date) = self.ask("Date (DD-MM-YYYY) [Enter for today]: ")? else {
			return Ok(());
		};
		let Some(sales) = self.ask(&format!("Daily sales ({}): ", currency))? else {
			return Ok(());
		};
		let Some(profit) = self.ask(&format!("Daily profit ({}): ", currency))? else {
			return Ok(());
		};

		let record = match capture_sales(&date, &sales, &profit) {
			Ok(r) => r,
			Err(e) => return self.error(e),
		};

		match self.ledger.append(&record) {
			Ok(outcome) => {
				writeln!(self.output, "{}", sales_saved(&record, &currency))?;
				if let Some(note) = sort_note(&outcome) {
					writeln!(self.output, "{}", note)?;
				}
				Ok(())
			},
			Err(e) => self.error(e),
		}
	}

	fn record_stock(&mut self) -> Result<(), Error> {
		writeln!(self.output, "\n--- [2] RECORD STOCK PURCHASE ---")?;
		let currency = self.shop.currency.clone();
		let owner_prompt = format!(
			"Owner ({}) [Enter for {}]: ",
			self.shop.owners.join("/"),
			self.shop.default_owner
		);

		let Some(date) = self.ask("Date (DD-MM-YYYY) [Enter for today]: ")? else {
			return Ok(());
		};
		let Some(owner) = self.ask(&owner_prompt)? else {
			return Ok(());
		};
		let Some(item) = self.ask("Item bought (e.g. Milk): ")? else {
			return Ok(());
		};
		let Some(price) = self.ask(&format!("Price ({}): ", currency))? else {
			return Ok(());
		};

		let record = match capture_stock(
			&date,
			&owner,
			&item,
			&price,
			&self.shop.default_owner,
		) {
			Ok(r) => r,
			Err(e) => return self.error(e),
		};

		match self.ledger.append(&record) {
			Ok(outcome) => {
				writeln!(self.output, "{}", stock_saved(&record, &currency))?;
				if let Some(note) = sort_note(&outcome) {
					writeln!(self.output, "{}", note)?;
				}
				Ok(())
			},
			Err(e) => self.error(e),
		}
	}

	fn current_check(&mut self) -> Result<(), Error> {
		let sales = self.ledger.load_all::<SalesRecord>();
		let stock = self.ledger.load_all::<StockRecord>();

		match (sales, stock) {
			(Ok(sales), Ok(stock)) => {
				let metrics = compute_metrics(&sales, &stock);
				let text = CheckReporter::new(&metrics, &self.shop.currency).render();
				writeln!(self.output)?;
				write!(self.output, "{}", text)?;
				Ok(())
			},
			(Err(e), _) | (_, Err(e)) => self.error(e),
		}
	}

	fn close_account(&mut self) -> Result<(), Error> {
		writeln!(self.output, "\n--- [4] CLOSE ACCOUNT ---")?;
		let Some(start) = self.ask("Start date (DD-MM-YYYY): ")? else {
			return Ok(());
		};
		let Some(end) = self.ask("End date (DD-MM-YYYY): ")? else {
			return Ok(());
		};

		let (start, end) = match (Date::parse(&start), Date::parse(&end)) {
			(Ok(s), Ok(e)) => (s, e),
			(Err(e), _) | (_, Err(e)) => return self.error(e),
		};

		match self.ledger.load_all::<SalesRecord>() {
			Ok(sales) => {
				let report = report_range(&sales, start, end);
				let text = PeriodReporter::new(&report, &self.shop.currency).render();
				write!(self.output, "{}", text)?;
				Ok(())
			},
			Err(e) => self.error(e),
		}
	}
}
