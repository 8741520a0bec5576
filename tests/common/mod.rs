//! Fixtures shared by the integration tests.

#![allow(dead_code)]

// std
use std::{
	collections::VecDeque,
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	future::Future,
	pin::Pin,
	sync::Arc,
};
// crates.io
use hmac::{Hmac, Mac};
use parking_lot::Mutex;
use sha2::{Digest, Sha256};
use time::{OffsetDateTime, macros};
// self
use bca_client::{
	auth::Credentials,
	client::{BcaClient, ReqwestBcaClient},
	clock::ManualClock,
	config::ClientConfig,
	error::{ConfigError, Error, TransportError},
	http::{ApiHttpClient, ReqwestHttpClient, ResponseMetadata, ResponseMetadataSlot},
	oauth::{
		ReqwestTransportErrorMapper, TransportErrorMapper,
		oauth2::{AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse, http::StatusCode},
	},
};

pub const CLIENT_ID: &str = "b095ac9d-2d21-42a3-a70c-4781f4570704";
pub const CLIENT_SECRET: &str = "bedd1f8d-3bd6-4d4a-8cb4-e61db41691c9";
pub const API_KEY: &str = "dcc99ba6-3b2f-479b-9f85-86a09ccaaacf";
pub const API_SECRET: &str = "5e636b16-df7f-4a53-afbe-497e6fe07edc";
pub const ORIGIN: &str = "yourdomain.com";
pub const ACCESS_TOKEN: &str = "lIWOt2p29grUo59bedBUrBY3pnzqQX544LzYPohcGHOuwn8AUEdUKS";
pub const TOKEN_PATH: &str = "/api/oauth/token";

pub fn t0() -> OffsetDateTime {
	macros::datetime!(2025-01-01 00:00 UTC)
}

pub fn credentials() -> Credentials {
	Credentials::new(CLIENT_ID, CLIENT_SECRET, API_KEY, API_SECRET, ORIGIN)
}

pub fn config(api_host: &str) -> ClientConfig {
	ClientConfig::new(api_host, credentials())
}

pub fn token_body(expires_in: i64) -> String {
	format!(
		"{{\"access_token\":\"{ACCESS_TOKEN}\",\"token_type\":\"bearer\",\"expires_in\":{expires_in},\"scope\":\"resource.WRITE resource.READ\"}}"
	)
}

pub fn basic_authorization() -> String {
	credentials().basic_authorization()
}

/// Builds a reqwest-backed client pinned to `clock`.
pub fn reqwest_client(api_host: &str, clock: &ManualClock) -> ReqwestBcaClient {
	ReqwestBcaClient::with_http_client(
		config(api_host),
		ReqwestHttpClient::default(),
		Arc::new(ReqwestTransportErrorMapper),
	)
	.expect("Test configuration should validate.")
	.with_clock(Arc::new(clock.clone()))
}

/// Computes the expected signature without going through the crate's signer.
pub fn expected_signature(
	method: &str,
	encoded_path: &str,
	access_token: &str,
	stripped_body: &str,
	timestamp: &str,
) -> String {
	let digest = hex::encode(Sha256::digest(stripped_body.as_bytes()));
	let message = format!("{method}:{encoded_path}:{access_token}:{digest}:{timestamp}");
	let mut mac = <Hmac<Sha256>>::new_from_slice(API_SECRET.as_bytes())
		.expect("HMAC accepts keys of any length.");

	mac.update(message.as_bytes());

	hex::encode(mac.finalize().into_bytes())
}

#[derive(Debug)]
pub enum FakeTransportError {
	ConnectionRefused,
}
impl Display for FakeTransportError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::ConnectionRefused => f.write_str("Connection refused."),
		}
	}
}
impl StdError for FakeTransportError {}

/// Scripted reply for [`ScriptedHttpClient`].
#[derive(Clone, Debug)]
pub enum Reply {
	Respond { status: u16, body: String },
	Refuse,
}
impl Reply {
	pub fn json(status: u16, body: impl Into<String>) -> Self {
		Self::Respond { status, body: body.into() }
	}
}

/// Transport that replays scripted replies and records every request it receives.
#[derive(Clone, Default)]
pub struct ScriptedHttpClient {
	replies: Arc<Mutex<VecDeque<Reply>>>,
	requests: Arc<Mutex<Vec<HttpRequest>>>,
}
impl ScriptedHttpClient {
	pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
		Self {
			replies: Arc::new(Mutex::new(replies.into_iter().collect())),
			requests: Default::default(),
		}
	}

	pub fn requests(&self) -> Vec<HttpRequest> {
		self.requests.lock().clone()
	}
}
impl ApiHttpClient for ScriptedHttpClient {
	type Handle = ScriptedHandle;
	type TransportError = FakeTransportError;

	fn with_metadata(&self, slot: ResponseMetadataSlot) -> Self::Handle {
		ScriptedHandle { client: self.clone(), slot }
	}
}

pub struct ScriptedHandle {
	client: ScriptedHttpClient,
	slot: ResponseMetadataSlot,
}
impl<'a> AsyncHttpClient<'a> for ScriptedHandle {
	type Error = HttpClientError<FakeTransportError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'a + Send + Sync>>;

	fn call(&'a self, request: HttpRequest) -> Self::Future {
		let client = self.client.clone();
		let slot = self.slot.clone();

		Box::pin(async move {
			assert!(
				slot.take().is_none(),
				"ResponseMetadataSlot must be clear before dispatching a request."
			);

			client.requests.lock().push(request);

			let reply = client.replies.lock().pop_front().expect("A scripted reply should remain.");

			match reply {
				Reply::Respond { status, body } => {
					let status =
						StatusCode::from_u16(status).expect("Scripted status should be valid.");
					let mut response = HttpResponse::new(body.into_bytes());

					*response.status_mut() = status;

					slot.store(ResponseMetadata { status: Some(status.as_u16()) });

					Ok(response)
				},
				Reply::Refuse =>
					Err(HttpClientError::Reqwest(Box::new(FakeTransportError::ConnectionRefused))),
			}
		})
	}
}

/// Mapper that records the endpoint labels it was asked to classify.
#[derive(Clone, Default)]
pub struct RecordingTransportErrorMapper {
	endpoints: Arc<Mutex<Vec<String>>>,
}
impl RecordingTransportErrorMapper {
	pub fn endpoints(&self) -> Vec<String> {
		self.endpoints.lock().clone()
	}
}
impl TransportErrorMapper<FakeTransportError> for RecordingTransportErrorMapper {
	fn map_transport_error(
		&self,
		endpoint: &str,
		meta: Option<&ResponseMetadata>,
		err: HttpClientError<FakeTransportError>,
	) -> Error {
		self.endpoints.lock().push(endpoint.to_owned());

		match err {
			HttpClientError::Reqwest(inner) => TransportError::network(endpoint, *inner).into(),
			HttpClientError::Http(inner) => ConfigError::from(inner).into(),
			HttpClientError::Io(inner) => TransportError::Io(inner).into(),
			other => TransportError::Other {
				endpoint: endpoint.to_owned(),
				message: other.to_string(),
				status: meta.and_then(|value| value.status),
			}
			.into(),
		}
	}
}

pub type ScriptedClient = BcaClient<ScriptedHttpClient, RecordingTransportErrorMapper>;

/// Builds a client on top of scripted transport replies.
pub fn scripted_client(
	replies: impl IntoIterator<Item = Reply>,
	clock: &ManualClock,
) -> (ScriptedClient, ScriptedHttpClient, RecordingTransportErrorMapper) {
	let transport = ScriptedHttpClient::new(replies);
	let mapper = RecordingTransportErrorMapper::default();
	let client = ScriptedClient::with_http_client(
		config("https://sandbox.bca.co.id"),
		transport.clone(),
		mapper.clone(),
	)
	.expect("Test configuration should validate.")
	.with_clock(Arc::new(clock.clone()));

	(client, transport, mapper)
}
