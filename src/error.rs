//! Client-level error types shared by the token cache, signer, and request pipeline.
//!
//! Issuer rejections are not errors here: a well-formed JSON error object returned by
//! the bank is a successful result (see [`crate::issuer::IssuerError`]).

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// The network call could not complete.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// A response arrived but its body could not be interpreted.
	#[error(transparent)]
	Parse(#[from] ParseError),
}

/// Configuration and validation failures raised before anything is sent.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// API host cannot be parsed.
	#[error("API host `{host}` is not a valid URL.")]
	InvalidHost {
		/// Raw host value from the configuration.
		host: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// API host is not an absolute HTTP(S) origin.
	#[error("API host `{host}` must be an http or https URL with a host.")]
	UnsupportedHost {
		/// Raw host value from the configuration.
		host: String,
	},
	/// API port cannot be applied to the host.
	#[error("API port {port} cannot be applied to the configured host.")]
	InvalidPort {
		/// Configured port.
		port: u16,
	},
	/// Timestamp format description cannot be parsed.
	#[error("Timestamp format `{format}` is not a valid format description.")]
	InvalidTimestampFormat {
		/// Raw format description.
		format: String,
		/// Underlying parsing failure.
		#[source]
		source: time::error::InvalidFormatDescription,
	},
	/// The clock's instant cannot be rendered with the configured format.
	#[error("Timestamp cannot be rendered with the configured format.")]
	TimestampRender(#[from] time::error::Format),
	/// A header value contains bytes that HTTP does not allow.
	#[error("Header `{header}` contains characters that cannot be sent.")]
	InvalidHeaderValue {
		/// Header name.
		header: &'static str,
	},
	/// The API secret cannot key an HMAC instance.
	#[error("API secret cannot be used as an HMAC key.")]
	InvalidApiSecret,
	/// Request body could not be serialized to JSON.
	#[error("Request body could not be serialized to JSON.")]
	BodySerialize(#[source] serde_json::Error),
	/// Endpoint helper expected a JSON object body.
	#[error("Request body for `{path}` must serialize to a JSON object.")]
	BodyNotObject {
		/// Relative path of the endpoint.
		path: &'static str,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (connection refused, DNS, TLS, timeout, I/O).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling `{endpoint}`.")]
	Network {
		/// Endpoint label (`token` or the relative path).
		endpoint: String,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Transport gave up waiting for the response.
	#[error("Request to `{endpoint}` timed out.")]
	Timeout {
		/// Endpoint label (`token` or the relative path).
		endpoint: String,
		/// Transport-specific timeout error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred during transport.")]
	Io(#[from] std::io::Error),
	/// Transport failed without a typed cause.
	#[error("HTTP client error occurred while calling `{endpoint}`: {message}.")]
	Other {
		/// Endpoint label (`token` or the relative path).
		endpoint: String,
		/// Human-readable failure summary.
		message: String,
		/// HTTP status captured before the failure, when available.
		status: Option<u16>,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(
		endpoint: impl Into<String>,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::Network { endpoint: endpoint.into(), source: Box::new(src) }
	}

	/// Wraps a transport-specific timeout error.
	pub fn timeout(
		endpoint: impl Into<String>,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::Timeout { endpoint: endpoint.into(), source: Box::new(src) }
	}
}

/// Failures interpreting a response body that did arrive.
#[derive(Debug, ThisError)]
pub enum ParseError {
	/// The body is not JSON.
	#[error("Response from `{endpoint}` is not valid JSON (status {status:?}): {preview}")]
	InvalidJson {
		/// Endpoint label (`token` or the relative path).
		endpoint: String,
		/// HTTP status code of the response.
		status: Option<u16>,
		/// Truncated, lossily decoded body.
		preview: String,
		/// Underlying JSON failure.
		#[source]
		source: serde_json::Error,
	},
	/// The token endpoint returned an `access_token` but the rest of the shape is malformed.
	#[error("Token endpoint returned a malformed token response.")]
	TokenShape {
		/// Structured parsing failure, annotated with the failing path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Token endpoint returned a non-positive lifetime.
	#[error("Token endpoint returned a non-positive expires_in ({expires_in}).")]
	NonPositiveExpiresIn {
		/// Raw `expires_in` value.
		expires_in: i64,
	},
	/// Token endpoint returned a lifetime whose expiry instant cannot be represented.
	#[error("Token endpoint returned an out-of-range expires_in ({expires_in}).")]
	ExpiresInOutOfRange {
		/// Raw `expires_in` value.
		expires_in: i64,
	},
}
impl ParseError {
	const PREVIEW_LIMIT: usize = 256;

	pub(crate) fn invalid_json(
		endpoint: impl Into<String>,
		status: Option<u16>,
		body: &[u8],
		source: serde_json::Error,
	) -> Self {
		let lossy = String::from_utf8_lossy(body);
		let preview = if lossy.chars().count() <= Self::PREVIEW_LIMIT {
			lossy.into_owned()
		} else {
			let mut buf = lossy.chars().take(Self::PREVIEW_LIMIT).collect::<String>();

			buf.push('…');

			buf
		};

		Self::InvalidJson { endpoint: endpoint.into(), status, preview, source }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn invalid_json_preview_is_truncated() {
		let body = "x".repeat(400);
		let source = serde_json::from_str::<Value>(&body)
			.expect_err("A run of bare characters should not parse as JSON.");
		let err = ParseError::invalid_json("/general/rate/deposit", Some(502), body.as_bytes(), source);

		match err {
			ParseError::InvalidJson { preview, status, endpoint, .. } => {
				assert_eq!(preview.chars().count(), ParseError::PREVIEW_LIMIT + 1);
				assert!(preview.ends_with('…'));
				assert_eq!(status, Some(502));
				assert_eq!(endpoint, "/general/rate/deposit");
			},
			other => panic!("Unexpected parse error variant: {other:?}."),
		}
	}

	#[test]
	fn transport_error_converts_into_client_error_with_source() {
		let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
		let err: Error = TransportError::network("token", io).into();

		assert!(matches!(err, Error::Transport(TransportError::Network { .. })));
		assert!(err.to_string().contains("token"));
		assert!(StdError::source(&err).is_some());
	}
}
