//! Immutable credential set supplied at construction.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
// self
use crate::{_prelude::*, auth::Secret};

/// OAuth client credentials plus the API key pair used for request signatures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
	/// OAuth client identifier.
	pub client_id: String,
	/// OAuth client secret.
	pub client_secret: Secret,
	/// API key sent in the key header of every signed request.
	pub api_key: String,
	/// API secret keying the request HMAC.
	pub api_secret: Secret,
	/// Value of the `Origin` header.
	pub origin: String,
}
impl Credentials {
	/// Creates a credential set.
	pub fn new(
		client_id: impl Into<String>,
		client_secret: impl Into<Secret>,
		api_key: impl Into<String>,
		api_secret: impl Into<Secret>,
		origin: impl Into<String>,
	) -> Self {
		Self {
			client_id: client_id.into(),
			client_secret: client_secret.into(),
			api_key: api_key.into(),
			api_secret: api_secret.into(),
			origin: origin.into(),
		}
	}

	/// Builds the `Authorization` value for the token endpoint:
	/// `Basic base64(client_id:client_secret)`.
	pub fn basic_authorization(&self) -> String {
		let raw = format!("{}:{}", self.client_id, self.client_secret.expose());

		format!("Basic {}", STANDARD.encode(raw))
	}
}
