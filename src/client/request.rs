//! Signed request pipeline.

// crates.io
use oauth2::{
	AsyncHttpClient, HttpRequest, HttpResponse,
	http::{Method, Request},
};
// self
use crate::{
	_prelude::*,
	auth::TokenGrant,
	client::BcaClient,
	error::ConfigError,
	http::{ApiHttpClient, ResponseMetadataSlot, parse_json_body},
	oauth::TransportErrorMapper,
	obs::{self, OperationKind, OperationSpan, Outcome},
	sign::{self, SignedRequest, SigningInput},
};

/// Method, relative path, and exact body of one API call.
///
/// `relative_path` must already be canonical (see [`crate::canonical::canonicalize`]); the
/// body string is signed and sent verbatim, `""` for bodiless requests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiRequest {
	/// HTTP method.
	pub method: Method,
	/// Path (and canonical query) relative to the API host.
	pub relative_path: String,
	/// Serialized body.
	pub body: String,
}
impl ApiRequest {
	/// Creates a request from its raw parts.
	pub fn new(method: Method, relative_path: impl Into<String>, body: impl Into<String>) -> Self {
		Self { method, relative_path: relative_path.into(), body: body.into() }
	}

	/// Bodiless `GET`.
	pub fn get(relative_path: impl Into<String>) -> Self {
		Self::new(Method::GET, relative_path, String::new())
	}

	/// `POST` with a pre-serialized body.
	pub fn post(relative_path: impl Into<String>, body: impl Into<String>) -> Self {
		Self::new(Method::POST, relative_path, body)
	}

	/// `PUT` with a pre-serialized body.
	pub fn put(relative_path: impl Into<String>, body: impl Into<String>) -> Self {
		Self::new(Method::PUT, relative_path, body)
	}

	/// Serializes `body` to compact JSON.
	pub fn json<T>(
		method: Method,
		relative_path: impl Into<String>,
		body: &T,
	) -> Result<Self, ConfigError>
	where
		T: ?Sized + Serialize,
	{
		let body = serde_json::to_string(body).map_err(ConfigError::BodySerialize)?;

		Ok(Self::new(method, relative_path, body))
	}
}

impl<C, M> BcaClient<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Performs one signed call and returns the parsed JSON body.
	///
	/// The body is parsed whatever the HTTP status, and issuer error objects come back as
	/// ordinary `Ok` values. When token issuance is rejected the issuer's payload is
	/// returned without calling the endpoint.
	pub async fn request(&self, request: &ApiRequest) -> Result<Value> {
		const KIND: OperationKind = OperationKind::SignedRequest;

		let span = OperationSpan::new(KIND, "request");

		obs::record_operation_outcome(KIND, Outcome::Attempt);

		let result = span.instrument(self.signed_call(request)).await;

		obs::record_settled(&span, KIND, Outcome::of_response(&result));

		result
	}

	async fn signed_call(&self, request: &ApiRequest) -> Result<Value> {
		let token = match self.get_valid_token().await? {
			TokenGrant::Issued(token) => token,
			TokenGrant::Rejected(rejection) => return Ok(rejection.into_json()),
		};
		let timestamp = self.timestamp_format.format(self.clock().now())?;
		let input = SigningInput {
			method: request.method.as_str(),
			relative_path: &request.relative_path,
			access_token: token.access_token.expose(),
			body: &request.body,
			timestamp: &timestamp,
		};
		let signed = SignedRequest::new(&self.signer, self.credentials(), &token, &input)?;
		let url = format!("{}{}", self.base_url(), sign::encode_path(&request.relative_path));
		let mut http_request = Request::builder()
			.method(request.method.clone())
			.uri(url)
			.body(request.body.clone().into_bytes())
			.map_err(ConfigError::from)?;

		*http_request.headers_mut() = signed.headers;

		let response = self.dispatch(&request.relative_path, http_request).await?;

		Ok(parse_json_body(&request.relative_path, &response)?)
	}

	/// Sends `request` through a fresh metadata-tracking handle, mapping transport failures.
	pub(crate) async fn dispatch(&self, endpoint: &str, request: HttpRequest) -> Result<HttpResponse> {
		let meta = ResponseMetadataSlot::default();
		let handle = self.http_client.with_metadata(meta.clone());

		handle.call(request).await.map_err(|err| {
			self.transport_mapper.map_transport_error(endpoint, meta.take().as_ref(), err)
		})
	}
}
