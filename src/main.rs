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
use crate::capture::menu::Menu;
use crate::capture::{sales_saved, sort_note, stock_saved};
use crate::config::config_file::{
	Backend, Config, ShopSettings, DEFAULT_SALES_FILE, DEFAULT_SALES_SHEET,
	DEFAULT_STOCK_FILE, DEFAULT_STOCK_SHEET, DEFAULT_TIMEOUT_SECS,
};
use crate::config::loader;
use crate::gl::ledger::{Ledger, TableNames};
use crate::gl::metrics::compute_metrics;
use crate::gl::range::report_range;
use crate::gl::record::{RecordKind, SalesRecord, StockRecord};
use crate::reports::check_reporter::CheckReporter;
use crate::reports::listing_reporter::ListingReporter;
use crate::reports::period_reporter::PeriodReporter;
use crate::storage::csv_file::CsvStore;
use crate::storage::sheets::{SheetsStore, SHEETS_API_URL};
use crate::storage::TableStore;
use crate::util::date::Date;
use anyhow::{anyhow, bail, Error};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod capture;
mod config;
mod error;
mod gl;
mod reports;
mod storage;
mod util;

#[derive(Parser)]
#[command(
	name = "garisbawah",
	version,
	about = "Sales and stock bookkeeping for a small coffee shop"
)]
struct Cli {
	// ----------------
	// -- POSITIONAL --
	// ----------------
	/// The command to execute
	command: Directive,

	/// For `list`: which ledger to show, "stock" (default) or "sales"
	#[arg(required = false)]
	term: Option<String>,

	// -----------
	// -- FLAGS --
	// -----------
	/// Directory holding the CSV ledgers
	#[arg(short, long)]
	data_dir: Option<String>,

	/// Storage backend, overriding the config file
	#[arg(long, value_enum)]
	backend: Option<Backend>,

	/// Custom config file location (default: ~/.config/garisbawah/config.toml)
	#[arg(long)]
	config: Option<String>,

	/// First day of the report (DD-MM-YYYY)
	#[arg(short, long)]
	begin: Option<String>,

	/// Last day of the report (DD-MM-YYYY)
	#[arg(short, long)]
	end: Option<String>,

	/// Date of the entry (DD-MM-YYYY, default today)
	#[arg(long)]
	date: Option<String>,

	/// Day's sales
	#[arg(long, allow_hyphen_values = true)]
	sales: Option<String>,

	/// Day's profit
	#[arg(long, allow_hyphen_values = true)]
	profit: Option<String>,

	/// Who paid for the stock
	#[arg(long)]
	owner: Option<String>,

	/// What was bought
	#[arg(long)]
	item: Option<String>,

	/// What it cost
	#[arg(long, allow_hyphen_values = true)]
	price: Option<String>,

	/// Log debug detail to stderr
	#[arg(short, long)]
	verbose: bool,
}

#[derive(ValueEnum, Clone, PartialEq)]
enum Directive {
	Init, // create empty ledgers

	Sales, // record a day's sales
	Stock, // record a stock purchase

	Check,  // current totals
	Report, // sales between two dates
	List,   // show a ledger, newest first

	Resort, // put both ledgers back in date order

	Menu, // interactive prompt loop
}

fn main() -> Result<(), Error> {
	let args = Cli::parse();
	init_logging(args.verbose);

	let mut config = loader::load(args.config.as_ref())?;
	let shop = config.shop();
	let backend = args.backend.unwrap_or(config.backend());

	match backend {
		Backend::Csv => {
			let dir = data_dir(&args, &config)?;
			let storage = config.storage.as_ref();
			let tables = TableNames::new(
				storage
					.and_then(|s| s.sales_file.as_deref())
					.unwrap_or(DEFAULT_SALES_FILE),
				storage
					.and_then(|s| s.stock_file.as_deref())
					.unwrap_or(DEFAULT_STOCK_FILE),
			);
			let store = CsvStore::new(dir);
			debug!(dir = %store.dir().display(), "using csv ledgers");
			run(args, &shop, Ledger::new(store, tables))
		},
		Backend::Sheets => {
			let ledger = sheets_ledger(&mut config)?;
			run(args, &shop, ledger)
		},
	}
}

fn init_logging(verbose: bool) {
	let filter = if verbose {
		EnvFilter::new("debug")
	} else {
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
	};

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.init();
}

fn data_dir(args: &Cli, config: &Config) -> Result<PathBuf, Error> {
	if let Some(dir) = &args.data_dir {
		return Ok(PathBuf::from(dir));
	}
	match config.storage.as_ref().and_then(|s| s.data_dir.as_ref()) {
		Some(dir) => Ok(PathBuf::from(dir)),
		None => loader::default_data_dir(),
	}
}

fn sheets_ledger(config: &mut Config) -> Result<Ledger<SheetsStore>, Error> {
	let Some(sheets) = config.sheets.as_mut() else {
		bail!("sheets backend selected but config has no [sheets] section");
	};
	loader::resolve_api_key(sheets)?;

	let spreadsheet_id = sheets
		.spreadsheet_id
		.as_deref()
		.ok_or_else(|| anyhow!("no sheets.spreadsheet_id in config"))?;
	let api_key = sheets
		.api_key
		.clone()
		.ok_or_else(|| anyhow!("no sheets api key in config"))?;

	let store = SheetsStore::new(
		sheets.api_url.as_deref().unwrap_or(SHEETS_API_URL),
		api_key,
		spreadsheet_id,
		Duration::from_secs(sheets.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
	)?;
	let tables = TableNames::new(
		sheets.sales_sheet.as_deref().unwrap_or(DEFAULT_SALES_SHEET),
		sheets.stock_sheet.as_deref().unwrap_or(DEFAULT_STOCK_SHEET),
	);

	Ok(Ledger::new(store, tables))
}

fn run<S: TableStore>(
	args: Cli,
	shop: &ShopSettings,
	mut ledger: Ledger<S>,
) -> Result<(), Error> {
	match args.command {
		Directive::Init => {
			for kind in RecordKind::ALL {
				let name = ledger.tables().get(kind).to_string();
				if ledger.ensure_initialized(kind)? {
					println!("Created {} ledger ({})", kind.name(), name);
				} else {
					println!("The {} ledger ({}) already exists", kind.name(), name);
				}
			}
		},
		Directive::Sales => {
			let (Some(sales), Some(profit)) = (&args.sales, &args.profit) else {
				bail!("Recording sales requires --sales and --profit");
			};
			let record = capture_sales(
				args.date.as_deref().unwrap_or_default(),
				sales,
				profit,
			)?;
			let outcome = ledger.append(&record)?;
			println!("{}", sales_saved(&record, &shop.currency));
			if let Some(note) = sort_note(&outcome) {
				println!("{}", note);
			}
		},
		Directive::Stock => {
			let (Some(item), Some(price)) = (&args.item, &args.price) else {
				bail!("Recording stock requires --item and --price");
			};
			let record = capture_stock(
				args.date.as_deref().unwrap_or_default(),
				args.owner.as_deref().unwrap_or_default(),
				item,
				price,
				&shop.default_owner,
			)?;
			let outcome = ledger.append(&record)?;
			println!("{}", stock_saved(&record, &shop.currency));
			if let Some(note) = sort_note(&outcome) {
				println!("{}", note);
			}
		},
		Directive::Check => {
			let sales = ledger.load_all::<SalesRecord>()?;
			let stock = ledger.load_all::<StockRecord>()?;
			let metrics = compute_metrics(&sales, &stock);
			CheckReporter::new(&metrics, &shop.currency).print();
		},
		Directive::Report => {
			let (Some(begin), Some(end)) = (&args.begin, &args.end) else {
				bail!("Report requires begin and end dates");
			};
			let (begin, end) = (Date::parse(begin)?, Date::parse(end)?);
			let sales = ledger.load_all::<SalesRecord>()?;
			let report = report_range(&sales, begin, end);
			PeriodReporter::new(&report, &shop.currency).print();
		},
		Directive::List => match args.term.as_deref().unwrap_or("stock") {
			"stock" => {
				ListingReporter::stock(&ledger.load_all::<StockRecord>()?).print()
			},
			"sales" => {
				ListingReporter::sales(&ledger.load_all::<SalesRecord>()?).print()
			},
			other => bail!("unknown ledger: {} (expected sales or stock)", other),
		},
		Directive::Resort => {
			for kind in RecordKind::ALL {
				match ledger.resort(kind) {
					Ok(()) => println!("The {} ledger is in date order", kind.name()),
					Err(e @ error::LedgerError::SortAborted { .. }) => {
						println!("The {} ledger was left as is: {}", kind.name(), e)
					},
					Err(e) => return Err(e.into()),
				}
			}
		},
		Directive::Menu => {
			let stdin = std::io::stdin();
			let stdout = std::io::stdout();
			Menu::new(&mut ledger, stdin.lock(), stdout.lock(), shop).run()?;
		},
	}

	Ok(())
}
