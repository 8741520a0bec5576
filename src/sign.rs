//! HMAC-SHA256 request signatures.
//!
//! The signing string is `METHOD:encoded_path:access_token:body_digest:timestamp`, where
//! `body_digest` is the lowercase hex SHA-256 of the body with all whitespace removed and
//! `encoded_path` applies URI encoding that keeps RFC 3986 unreserved characters and
//! `:/?#[]@!$&()*+,;=` literal. `'` is escaped as `%27` because URL parsing escapes it in
//! the query of `http(s)` URLs, and the signed path must match the one sent. The signature is the lowercase hex HMAC-SHA256 of the
//! signing string keyed by the API secret. Signing is a pure function of its inputs.

// crates.io
use hmac::{Hmac, Mac};
use oauth2::http::{
	HeaderMap, HeaderName, HeaderValue,
	header::{AUTHORIZATION, CONTENT_TYPE, ORIGIN},
};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use sha2::{Digest, Sha256};
// self
use crate::{
	_prelude::*,
	auth::{AccessToken, Credentials, Secret},
	error::ConfigError,
};

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the API key.
pub const KEY_HEADER: &str = "X-BCA-Key";
/// Header carrying the literal timestamp covered by the signature.
pub const TIMESTAMP_HEADER: &str = "X-BCA-Timestamp";
/// Header carrying the hex signature.
pub const SIGNATURE_HEADER: &str = "X-BCA-Signature";

/// Characters left literal by URI encoding: everything outside this set is escaped.
const URI_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
	.remove(b'-')
	.remove(b'_')
	.remove(b'.')
	.remove(b'~')
	.remove(b':')
	.remove(b'/')
	.remove(b'?')
	.remove(b'#')
	.remove(b'[')
	.remove(b']')
	.remove(b'@')
	.remove(b'!')
	.remove(b'$')
	.remove(b'&')
	.remove(b'(')
	.remove(b')')
	.remove(b'*')
	.remove(b'+')
	.remove(b',')
	.remove(b';')
	.remove(b'=');

/// Fields covered by a request signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SigningInput<'a> {
	/// Upper-case HTTP method.
	pub method: &'a str,
	/// Relative path (with canonical query) exactly as it will be requested.
	pub relative_path: &'a str,
	/// Bearer token value.
	pub access_token: &'a str,
	/// Serialized request body, `""` for bodiless requests.
	pub body: &'a str,
	/// Literal timestamp string that is also sent as a header.
	pub timestamp: &'a str,
}
impl SigningInput<'_> {
	/// Builds the colon-delimited signing string.
	pub fn signing_string(&self) -> String {
		format!(
			"{}:{}:{}:{}:{}",
			self.method,
			encode_path(self.relative_path),
			self.access_token,
			body_digest(self.body),
			self.timestamp
		)
	}
}

/// Signs requests with an API secret.
#[derive(Clone, Debug)]
pub struct RequestSigner {
	api_secret: Secret,
}
impl RequestSigner {
	/// Creates a signer keyed by `api_secret`.
	pub fn new(api_secret: impl Into<Secret>) -> Self {
		Self { api_secret: api_secret.into() }
	}

	/// Computes the hex signature for `input`.
	pub fn sign(&self, input: &SigningInput<'_>) -> Result<String, ConfigError> {
		hmac_sha256_hex(self.api_secret.expose(), &input.signing_string())
	}
}

/// Signature and final header set for one outbound request.
#[derive(Clone, Debug)]
pub struct SignedRequest {
	/// Literal timestamp covered by the signature.
	pub timestamp: String,
	/// Hex HMAC-SHA256 signature.
	pub signature: String,
	/// Headers to attach: bearer authorization, JSON content type, origin, key, timestamp,
	/// and signature.
	pub headers: HeaderMap,
}
impl SignedRequest {
	/// Signs `input` and assembles the header set.
	pub fn new(
		signer: &RequestSigner,
		credentials: &Credentials,
		token: &AccessToken,
		input: &SigningInput<'_>,
	) -> Result<Self, ConfigError> {
		let signature = signer.sign(input)?;
		let mut headers = HeaderMap::with_capacity(6);

		headers.insert(AUTHORIZATION, header_value("Authorization", &token.bearer())?);
		headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
		headers.insert(ORIGIN, header_value("Origin", &credentials.origin)?);
		headers.insert(HeaderName::from_static("x-bca-key"), header_value(KEY_HEADER, &credentials.api_key)?);
		headers.insert(
			HeaderName::from_static("x-bca-timestamp"),
			header_value(TIMESTAMP_HEADER, input.timestamp)?,
		);
		headers
			.insert(HeaderName::from_static("x-bca-signature"), header_value(SIGNATURE_HEADER, &signature)?);

		Ok(Self { timestamp: input.timestamp.to_owned(), signature, headers })
	}
}

/// Percent-encodes a relative path with URI (not component) rules.
pub fn encode_path(path: &str) -> Cow<'_, str> {
	utf8_percent_encode(path, URI_ENCODE_SET).into()
}

/// Lowercase hex SHA-256 of `body` after removing every whitespace character.
pub fn body_digest(body: &str) -> String {
	let mut hasher = Sha256::new();

	for part in body.split(is_body_whitespace).filter(|part| !part.is_empty()) {
		hasher.update(part.as_bytes());
	}

	hex::encode(hasher.finalize())
}

// ECMAScript `\s`: Unicode `White_Space` minus U+0085, plus U+FEFF.
fn is_body_whitespace(c: char) -> bool {
	(c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

fn hmac_sha256_hex(key: &str, message: &str) -> Result<String, ConfigError> {
	let mut mac =
		HmacSha256::new_from_slice(key.as_bytes()).map_err(|_| ConfigError::InvalidApiSecret)?;

	mac.update(message.as_bytes());

	Ok(hex::encode(mac.finalize().into_bytes()))
}

fn header_value(header: &'static str, value: &str) -> Result<HeaderValue, ConfigError> {
	HeaderValue::from_str(value).map_err(|_| ConfigError::InvalidHeaderValue { header })
}
