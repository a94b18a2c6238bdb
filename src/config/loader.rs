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
use crate::config::config_file::{Config, Sheets};
use anyhow::{anyhow, bail, Error};
use std::fs;
use std::fs::File;
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

const APP_DIR: &str = "garisbawah";

/// Fetches the config from the given path, or the default path if none. The
/// default file is created empty if it does not exist; a custom path must
/// exist.
pub fn load(custom_config_path: Option<&String>) -> Result<Config, Error> {
	let config_path = match &custom_config_path {
		None => dirs::config_dir()
			.ok_or_else(|| anyhow!("unable to determine config directory"))?
			.join(APP_DIR)
			.join("config.toml"),
		Some(p) => PathBuf::from(p),
	};

	// create empty config file if it doesn't exist
	if !config_path.exists() && custom_config_path.is_none() {
		if let Some(parent) = config_path.parent() {
			fs::create_dir_all(parent)?;
		}
		File::create(config_path.clone())?;
	}

	debug!(path = %config_path.display(), "loading config");
	let content = fs::read_to_string(&config_path).map_err(|e| {
		anyhow!("failed to read config {}: {}", config_path.display(), e)
	})?;
	let config: Config = toml::from_str(&content)
		.map_err(|e| anyhow!("failed to parse config: {}", e))?;

	Ok(config)
}

/// Where CSV ledgers live when neither the command line nor the config says.
pub fn default_data_dir() -> Result<PathBuf, Error> {
	Ok(dirs::data_dir()
		.ok_or_else(|| anyhow!("unable to determine data directory"))?
		.join(APP_DIR))
}

/// Executes api_key_cmd if applicable, and puts the result in api_key.
/// Only needed when the spreadsheet backend is in use.
pub fn resolve_api_key(sheets: &mut Sheets) -> Result<(), Error> {
	if sheets.api_key_cmd.is_some() && sheets.api_key.is_some() {
		bail!("Only one of sheets.api_key and sheets.api_key_cmd may be specified")
	}

	if let Some(api_key_cmd) = &sheets.api_key_cmd {
		let output = Command::new("sh")
			.arg("-c")
			.arg(api_key_cmd)
			.output()
			.map_err(|e| anyhow!("failed to execute api_key_cmd: {}", e))?;

		if !output.status.success() {
			bail!(
				"sheets api_key_cmd failed with status {}: {}",
				output.status,
				String::from_utf8_lossy(&output.stderr)
			);
		}

		sheets.api_key = Some(
			String::from_utf8(output.stdout)
				.map_err(|e| anyhow!("failed to parse command output: {}", e))?
				.trim()
				.to_string(),
		);
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_load_custom_path() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("config.toml");
		fs::write(&path, "[shop]\ncurrency = \"MYR\"\n").unwrap();

		let config = load(Some(&path.display().to_string())).unwrap();
		assert_eq!(config.shop().currency, "MYR");
	}

	#[test]
	fn test_missing_custom_path_is_error() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("nope.toml").display().to_string();
		assert!(load(Some(&path)).is_err());
	}

	#[test]
	fn test_bad_toml_is_error() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("config.toml");
		fs::write(&path, "[shop\n").unwrap();
		assert!(load(Some(&path.display().to_string())).is_err());
	}

	#[test]
	fn test_api_key_cmd() {
		let mut sheets = Sheets {
			api_key_cmd: Some("echo '  tok-123  '".into()),
			..Default::default()
		};
		resolve_api_key(&mut sheets).unwrap();
		assert_eq!(sheets.api_key.as_deref(), Some("tok-123"));
	}

	#[test]
	fn test_api_key_cmd_failure() {
		let mut sheets = Sheets {
			api_key_cmd: Some("exit 3".into()),
			..Default::default()
		};
		assert!(resolve_api_key(&mut sheets).is_err());
	}

	#[test]
	fn test_key_and_cmd_are_exclusive() {
		let mut sheets = Sheets {
			api_key: Some("a".into()),
			api_key_cmd: Some("echo b".into()),
			..Default::default()
		};
		assert!(resolve_api_key(&mut sheets).is_err());
	}

	#[test]
	fn test_plain_key_untouched() {
		let mut sheets = Sheets {
			api_key: Some("a".into()),
			..Default::default()
		};
		resolve_api_key(&mut sheets).unwrap();
		assert_eq!(sheets.api_key.as_deref(), Some("a"));
	}
}
