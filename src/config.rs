//! Client configuration and its validated forms.
//!
//! [`ClientConfig`] is plain serde data so host applications can load it from whatever
//! format they already use. Validation happens once, when a client is built: the host and
//! port collapse into a base URL string and the timestamp format description is parsed.

// crates.io
use time::{
	format_description::{self, BorrowedFormatItem, OwnedFormatItem},
	macros,
};
// self
use crate::{_prelude::*, auth::Credentials, error::ConfigError};

/// Default timestamp layout: ISO-8601 with milliseconds and an explicit offset, e.g.
/// `2016-02-03T10:00:00.000+07:00`.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3][offset_hour sign:mandatory]:[offset_minute]";

const DEFAULT_TIMESTAMP_ITEMS: &[BorrowedFormatItem<'static>] = macros::format_description!(
	"[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3][offset_hour sign:mandatory]:[offset_minute]"
);

/// Connection, credential, and formatting settings for one client instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
	/// API origin, e.g. `https://sandbox.bca.co.id`.
	pub api_host: String,
	/// Optional port overriding the one implied by `api_host`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub api_port: Option<u16>,
	/// OAuth and signing credentials.
	#[serde(flatten)]
	pub credentials: Credentials,
	/// `time` format description (version 2 syntax) for request timestamps.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub timestamp_format: Option<String>,
}
impl ClientConfig {
	/// Creates a configuration using the default port and timestamp format.
	pub fn new(api_host: impl Into<String>, credentials: Credentials) -> Self {
		Self { api_host: api_host.into(), api_port: None, credentials, timestamp_format: None }
	}

	/// Overrides the port implied by the host.
	pub fn with_port(mut self, port: u16) -> Self {
		self.api_port = Some(port);

		self
	}

	/// Overrides the timestamp format description.
	pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Self {
		self.timestamp_format = Some(format.into());

		self
	}

	/// Resolves the base URL that relative paths are appended to, without a trailing slash.
	pub fn base_url(&self) -> Result<String, ConfigError> {
		let host = self.api_host.trim();
		let mut url = Url::parse(host)
			.map_err(|source| ConfigError::InvalidHost { host: host.to_owned(), source })?;

		if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
			return Err(ConfigError::UnsupportedHost { host: host.to_owned() });
		}
		if let Some(port) = self.api_port {
			url.set_port(Some(port)).map_err(|_| ConfigError::InvalidPort { port })?;
		}

		url.set_query(None);
		url.set_fragment(None);

		Ok(url.as_str().trim_end_matches('/').to_owned())
	}

	/// Parses the configured (or default) timestamp format.
	pub fn parsed_timestamp_format(&self) -> Result<TimestampFormat, ConfigError> {
		match &self.timestamp_format {
			Some(format) => TimestampFormat::parse(format),
			None => Ok(TimestampFormat::default()),
		}
	}
}

/// Parsed timestamp layout used for the timestamp header and the signing string.
#[derive(Clone, PartialEq, Eq)]
pub struct TimestampFormat {
	description: String,
	items: Option<OwnedFormatItem>,
}
impl TimestampFormat {
	/// Parses a `time` format description (version 2 syntax).
	pub fn parse(description: &str) -> Result<Self, ConfigError> {
		let items = format_description::parse_owned::<2>(description).map_err(|source| {
			ConfigError::InvalidTimestampFormat { format: description.to_owned(), source }
		})?;

		Ok(Self { description: description.to_owned(), items: Some(items) })
	}

	/// Returns the format description this layout was parsed from.
	pub fn description(&self) -> &str {
		&self.description
	}

	/// Renders `at` with this layout.
	pub fn format(&self, at: OffsetDateTime) -> Result<String, ConfigError> {
		let rendered = match &self.items {
			Some(items) => at.format(items)?,
			None => at.format(DEFAULT_TIMESTAMP_ITEMS)?,
		};

		Ok(rendered)
	}
}
impl Default for TimestampFormat {
	fn default() -> Self {
		Self { description: DEFAULT_TIMESTAMP_FORMAT.to_owned(), items: None }
	}
}
impl Debug for TimestampFormat {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("TimestampFormat").field(&self.description).finish()
	}
}
