//! Rates and locator endpoints.

// self
use crate::{
	_prelude::*,
	client::{ApiRequest, BcaClient},
	endpoints::{comma_joined, path_with_query},
	http::ApiHttpClient,
	oauth::TransportErrorMapper,
};

/// Query for the nearest ATMs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtmLocatorQuery {
	/// Search mode, `Distance`.
	pub search_by: String,
	/// Latitude of the current location.
	pub latitude: String,
	/// Longitude of the current location.
	pub longitude: String,
	/// Maximum distance in meters.
	pub radius: String,
	/// Number of results (bank default 10, max 20).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub count: Option<String>,
}

/// Query for the nearest branches.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchLocatorQuery {
	/// Latitude of the current location.
	pub latitude: String,
	/// Longitude of the current location.
	pub longitude: String,
	/// Search mode: `Distance`, `Address`, `City`, or `Type`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub search_by: Option<String>,
	/// Maximum distance in meters.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub radius: Option<String>,
	/// Search value for `Address`, `City`, or `Type` searches.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub value: Option<String>,
	/// Number of results.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub count: Option<String>,
}

/// Borrowing wrapper for general information endpoints.
pub struct GeneralInformation<'a, C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	client: &'a BcaClient<C, M>,
}
impl<'a, C, M> GeneralInformation<'a, C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Wraps `client`.
	pub fn new(client: &'a BcaClient<C, M>) -> Self {
		Self { client }
	}

	/// Foreign exchange rates. Empty lists are omitted from the query.
	pub async fn forex_rates<S1, S2>(
		&self,
		currency_codes: &[S1],
		rate_types: &[S2],
	) -> Result<Value>
	where
		S1: AsRef<str>,
		S2: AsRef<str>,
	{
		let currency_codes = comma_joined(currency_codes);
		let rate_types = comma_joined(rate_types);
		let params = [("CurrencyCode", currency_codes.as_str()), ("RateType", rate_types.as_str())]
			.into_iter()
			.filter(|(_, value)| !value.is_empty());

		self.client.request(&ApiRequest::get(path_with_query("/general/rate/forex", params))).await
	}

	/// Deposit rates for BCA products.
	pub async fn deposit_rate(&self) -> Result<Value> {
		self.client.request(&ApiRequest::get("/general/rate/deposit")).await
	}

	/// Nearest ATMs.
	pub async fn atm_locator(&self, query: &AtmLocatorQuery) -> Result<Value> {
		let params = [
			("SearchBy", Some(query.search_by.as_str())),
			("Latitude", Some(query.latitude.as_str())),
			("Longitude", Some(query.longitude.as_str())),
			("Radius", Some(query.radius.as_str())),
			("Count", non_empty(&query.count)),
		]
		.into_iter()
		.filter_map(|(name, value)| value.map(|value| (name, value)));

		self.client.request(&ApiRequest::get(path_with_query("/general/info-bca/atm", params))).await
	}

	/// Nearest branches.
	pub async fn branch_locator(&self, query: &BranchLocatorQuery) -> Result<Value> {
		let params = [
			("Latitude", Some(query.latitude.as_str())),
			("Longitude", Some(query.longitude.as_str())),
			("Count", non_empty(&query.count)),
			("SearchBy", non_empty(&query.search_by)),
			("Radius", non_empty(&query.radius)),
			("Value", non_empty(&query.value)),
		]
		.into_iter()
		.filter_map(|(name, value)| value.map(|value| (name, value)));

		self.client
			.request(&ApiRequest::get(path_with_query("/general/info-bca/branch", params)))
			.await
	}
}

fn non_empty(value: &Option<String>) -> Option<&str> {
	value.as_deref().filter(|value| !value.is_empty())
}
