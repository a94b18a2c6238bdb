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
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Blocking JSON client with bearer auth and a hard timeout. Every transport
/// failure, timeout or unexpected status surfaces as `StorageUnavailable`.
pub struct Client {
	client: reqwest::blocking::Client,
	base_url: Url,
	api_key: String,
}

/// What came back from a request. A client error (4xx) is handed back as
/// `Rejected` so the caller can tell "no such range" apart from a real
/// failure; server errors never reach the caller as a reply.
#[derive(Debug)]
pub enum Reply<R> {
	Found(R),
	Rejected(Rejection),
}

/// A 4xx response and the error message the API gave with it.
#[derive(Debug, PartialEq, Eq)]
pub struct Rejection {
	pub status: StatusCode,
	pub message: String,
}

impl Rejection {
	pub fn into_error(self, context: &str) -> LedgerError {
		LedgerError::StorageUnavailable(format!(
			"{} rejected with status {}: {}",
			context, self.status, self.message
		))
	}
}

#[derive(Deserialize)]
struct ErrorBody {
	error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
	message: String,
}

/// Pulls `error.message` out of a JSON error body, or keeps the body as is.
fn error_message(body: String) -> String {
	match serde_json::from_str::<ErrorBody>(&body) {
		Ok(b) => b.error.message,
		Err(_) => body.trim().to_string(),
	}
}

fn unavailable(context: &str, e: impl std::fmt::Display) -> LedgerError {
	LedgerError::StorageUnavailable(format!("{}: {}", context, e))
}

impl Client {
	pub fn new(base_url: &str, api_key: String, timeout: Duration) -> Result<Self> {
		let base_url = Url::parse(base_url)
			.map_err(|e| unavailable("bad api url", e))?;
		let client = reqwest::blocking::Client::builder()
			.timeout(timeout)
			.build()
			.map_err(|e| unavailable("cannot build http client", e))?;

		Ok(Client {
			client,
			base_url,
			api_key,
		})
	}

	/// Joins path segments onto the base url, percent-encoding each one.
	pub fn url(&self, segments: &[&str]) -> Result<Url> {
		let mut url = self.base_url.clone();
		url.path_segments_mut()
			.map_err(|_| unavailable("bad api url", self.base_url.as_str()))?
			.pop_if_empty()
			.extend(segments);
		Ok(url)
	}

	/// Sends a request and decodes the JSON response. A 4xx comes back as
	/// `Reply::Rejected`; transport failures and any other non-2xx status
	/// are errors.
	pub fn send<Q, B, R>(
		&self,
		method: Method,
		url: Url,
		query_params: Option<&Q>,
		body: Option<&B>,
	) -> Result<Reply<R>>
	where
		Q: Serialize + ?Sized,
		B: Serialize + ?Sized,
		R: DeserializeOwned,
	{
		let mut request = self
			.client
			.request(method.clone(), url.clone())
			.header("Authorization", format!("Bearer {}", self.api_key));

		if let Some(query_params) = query_params {
			request = request.query(query_params);
		}
		if let Some(body) = body {
			request = request.json(body);
		}

		debug!(%method, %url, "sending request");
		let response = request
			.send()
			.map_err(|e| unavailable(&format!("{} {}", method, url), e))?;

		let status = response.status();
		if status.is_client_error() {
			let message = error_message(response.text().unwrap_or_default());
			debug!(%status, %url, message, "request rejected");
			return Ok(Reply::Rejected(Rejection { status, message }));
		}
		if !status.is_success() {
			return Err(LedgerError::StorageUnavailable(format!(
				"{} {} failed with status: {}",
				method, url, status
			)));
		}

		let data: R = response
			.json()
			.map_err(|e| unavailable(&format!("decoding {}", url), e))?;
		Ok(Reply::Found(data))
	}
}
