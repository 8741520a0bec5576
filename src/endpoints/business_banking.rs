//! KlikBCA Bisnis endpoints: balances, statements, and corporate transfers.

// crates.io
use oauth2::http::Method;
use time::{Date, format_description::BorrowedFormatItem, macros};
// self
use crate::{
	_prelude::*,
	client::{ApiRequest, BcaClient},
	endpoints::{comma_joined, path_with_query},
	error::ConfigError,
	http::ApiHttpClient,
	issuer::IssuerError,
	oauth::TransportErrorMapper,
};

/// Relative path of the corporate transfer endpoint.
pub const CORPORATE_TRANSFER_PATH: &str = "/banking/corporates/transfers";
/// Error code returned when a transfer is submitted after the day's cut-off.
pub const TRANSFER_CUTOFF_ERROR_CODE: &str = "ESB-82-007";

const TRANSACTION_DATE_FIELD: &str = "TransactionDate";
const DATE_FORMAT: &[BorrowedFormatItem<'static>] = macros::format_description!("[year]-[month]-[day]");

/// Borrowing wrapper for KlikBCA Bisnis endpoints.
pub struct BusinessBanking<'a, C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	client: &'a BcaClient<C, M>,
}
impl<'a, C, M> BusinessBanking<'a, C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Wraps `client`.
	pub fn new(client: &'a BcaClient<C, M>) -> Self {
		Self { client }
	}

	/// Balance information for up to 20 accounts of one corporate.
	pub async fn balance<S>(&self, corporate_id: &str, account_numbers: &[S]) -> Result<Value>
	where
		S: AsRef<str>,
	{
		let path = format!(
			"/banking/v3/corporates/{corporate_id}/accounts/{}",
			comma_joined(account_numbers)
		);

		self.client.request(&ApiRequest::get(path)).await
	}

	/// Account statement between `start_date` and `end_date` (inclusive).
	pub async fn account_statement(
		&self,
		corporate_id: &str,
		account_number: &str,
		start_date: Date,
		end_date: Date,
	) -> Result<Value> {
		let start = format_date(start_date)?;
		let end = format_date(end_date)?;
		let path = path_with_query(
			&format!("/banking/v3/corporates/{corporate_id}/accounts/{account_number}/statements"),
			[("StartDate", start.as_str()), ("EndDate", end.as_str())],
		);

		self.client.request(&ApiRequest::get(path)).await
	}

	/// Transfers between BCA accounts, stamping `TransactionDate` with today's date.
	///
	/// `body` must serialize to a JSON object. When the bank answers with
	/// [`TRANSFER_CUTOFF_ERROR_CODE`] the transfer is resubmitted once, dated tomorrow, and
	/// that second response is returned.
	pub async fn corporate_transfer<T>(&self, body: &T) -> Result<Value>
	where
		T: ?Sized + Serialize,
	{
		let mut payload = match serde_json::to_value(body).map_err(ConfigError::BodySerialize)? {
			Value::Object(map) => map,
			_ => return Err(ConfigError::BodyNotObject { path: CORPORATE_TRANSFER_PATH }.into()),
		};
		let today = self.client.clock().now().date();

		payload.insert(TRANSACTION_DATE_FIELD.into(), format_date(today)?.into());

		let response = self.submit_transfer(&payload).await?;

		if !IssuerError::detect(&response).is_some_and(|err| err.has_code(TRANSFER_CUTOFF_ERROR_CODE))
		{
			return Ok(response);
		}

		payload.insert(
			TRANSACTION_DATE_FIELD.into(),
			format_date(today.next_day().unwrap_or(today))?.into(),
		);

		self.submit_transfer(&payload).await
	}

	async fn submit_transfer(&self, payload: &serde_json::Map<String, Value>) -> Result<Value> {
		let request = ApiRequest::json(Method::POST, CORPORATE_TRANSFER_PATH, payload)?;

		self.client.request(&request).await
	}
}

fn format_date(date: Date) -> Result<String, ConfigError> {
	Ok(date.format(DATE_FORMAT)?)
}
