//! Authenticated client tying the token cache, signer, and transport together.

mod request;
mod token;

pub use request::*;

// self
use crate::{
	_prelude::*,
	auth::Credentials,
	cache::TokenCache,
	clock::{Clock, SystemClock},
	config::{ClientConfig, TimestampFormat},
	endpoints::{BusinessBanking, Fire, GeneralInformation},
	error::ConfigError,
	http::ApiHttpClient,
	oauth::TransportErrorMapper,
	sign::RequestSigner,
};
#[cfg(feature = "reqwest")]
use crate::{http::ReqwestHttpClient, oauth::ReqwestTransportErrorMapper};

/// Client specialized for the crate's default reqwest transport stack.
#[cfg(feature = "reqwest")]
pub type ReqwestBcaClient = BcaClient<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Signed, token-caching client for one credential set.
///
/// The client owns its transport, credentials, clock, and token cache. Each instance starts
/// with a private [`TokenCache`]; pass a shared one through [`BcaClient::with_token_cache`]
/// when several clients use the same credentials. Different credential sets never share a
/// cache unless the caller wires them together.
#[derive(Clone)]
pub struct BcaClient<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// HTTP client wrapper used for the token request and every signed call.
	pub http_client: Arc<C>,
	/// Mapper applied to transport-layer errors before surfacing them to callers.
	pub transport_mapper: Arc<M>,
	base_url: String,
	credentials: Credentials,
	signer: RequestSigner,
	timestamp_format: TimestampFormat,
	clock: Arc<dyn Clock>,
	token_cache: Arc<TokenCache>,
}
impl<C, M> BcaClient<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a client that reuses the caller-provided transport + mapper pair.
	///
	/// The configuration is validated here; a bad host or timestamp format never reaches
	/// the network.
	pub fn with_http_client(
		config: ClientConfig,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Result<Self, ConfigError> {
		let base_url = config.base_url()?;
		let timestamp_format = config.parsed_timestamp_format()?;
		let signer = RequestSigner::new(config.credentials.api_secret.clone());

		Ok(Self {
			http_client: http_client.into(),
			transport_mapper: mapper.into(),
			base_url,
			credentials: config.credentials,
			signer,
			timestamp_format,
			clock: Arc::new(SystemClock::default()),
			token_cache: Default::default(),
		})
	}

	/// Replaces the time source used for token expiry and request timestamps.
	pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
		self.clock = clock;

		self
	}

	/// Replaces the token cache, e.g. to share one between clients of the same credentials.
	pub fn with_token_cache(mut self, cache: Arc<TokenCache>) -> Self {
		self.token_cache = cache;

		self
	}

	/// Base URL that relative paths are appended to.
	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	/// Credential set this client signs with.
	pub fn credentials(&self) -> &Credentials {
		&self.credentials
	}

	/// Token cache backing [`BcaClient::get_valid_token`].
	pub fn token_cache(&self) -> &Arc<TokenCache> {
		&self.token_cache
	}

	/// Time source used for token expiry and request timestamps.
	pub fn clock(&self) -> &Arc<dyn Clock> {
		&self.clock
	}

	/// KlikBCA Bisnis balance, statement, and transfer endpoints.
	pub fn business_banking(&self) -> BusinessBanking<'_, C, M> {
		BusinessBanking::new(self)
	}

	/// FIRe remittance endpoints.
	pub fn fire(&self) -> Fire<'_, C, M> {
		Fire::new(self)
	}

	/// Rates and locator endpoints.
	pub fn general_information(&self) -> GeneralInformation<'_, C, M> {
		GeneralInformation::new(self)
	}
}
#[cfg(feature = "reqwest")]
impl BcaClient<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates a client backed by a default reqwest transport.
	pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
		Self::with_http_client(
			config,
			ReqwestHttpClient::default(),
			Arc::new(ReqwestTransportErrorMapper),
		)
	}
}
impl<C, M> Debug for BcaClient<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("BcaClient")
			.field("base_url", &self.base_url)
			.field("credentials", &self.credentials)
			.field("timestamp_format", &self.timestamp_format)
			.field("token_cached", &self.token_cache.peek().is_some())
			.finish()
	}
}
