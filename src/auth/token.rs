//! Bearer token model, its wire shape, and the issuance outcome.

// self
use crate::{_prelude::*, auth::Secret, error::ParseError, issuer::IssuerError};

/// Token payload returned by the OAuth endpoint on success.
#[derive(Clone, Debug, Deserialize)]
pub struct TokenResponse {
	/// Bearer token value.
	pub access_token: Secret,
	/// Token type label (typically `bearer`).
	#[serde(default)]
	pub token_type: String,
	/// Lifetime in seconds, relative to the moment of issuance.
	pub expires_in: i64,
	/// Granted scope string, when the issuer reports one.
	#[serde(default)]
	pub scope: Option<String>,
}

/// Immutable bearer token with its derived expiry instant.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
	/// Bearer token value; callers must avoid logging it.
	pub access_token: Secret,
	/// Token type label reported by the issuer.
	pub token_type: String,
	/// Lifetime reported by the issuer.
	pub expires_in: Duration,
	/// Granted scope string, when reported.
	pub scope: Option<String>,
	/// Instant the issuance request was started, as observed by the client clock.
	pub issued_at: OffsetDateTime,
	/// `issued_at + expires_in`.
	pub expires_at: OffsetDateTime,
}
impl AccessToken {
	/// Derives a token from the wire response, stamping expiry relative to `issued_at`.
	pub fn from_response(
		response: TokenResponse,
		issued_at: OffsetDateTime,
	) -> Result<Self, ParseError> {
		if response.expires_in <= 0 {
			return Err(ParseError::NonPositiveExpiresIn { expires_in: response.expires_in });
		}

		let expires_in = Duration::seconds(response.expires_in);
		let expires_at = issued_at
			.checked_add(expires_in)
			.ok_or(ParseError::ExpiresInOutOfRange { expires_in: response.expires_in })?;

		Ok(Self {
			access_token: response.access_token,
			token_type: response.token_type,
			expires_in,
			scope: response.scope,
			issued_at,
			expires_at,
		})
	}

	/// Returns `true` while `now < expires_at`; a token expiring exactly at `now` is expired.
	pub fn is_valid_at(&self, now: OffsetDateTime) -> bool {
		now < self.expires_at
	}

	/// Returns the `Authorization` header value for signed requests.
	pub fn bearer(&self) -> String {
		format!("Bearer {}", self.access_token.expose())
	}
}
impl Debug for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AccessToken")
			.field("access_token", &"<redacted>")
			.field("token_type", &self.token_type)
			.field("expires_in", &self.expires_in)
			.field("scope", &self.scope)
			.field("issued_at", &self.issued_at)
			.field("expires_at", &self.expires_at)
			.finish()
	}
}

/// Outcome of asking the client for a valid token.
#[derive(Clone, Debug)]
pub enum TokenGrant {
	/// A cached or freshly issued token.
	Issued(AccessToken),
	/// The issuer answered with its own error object; nothing was cached.
	Rejected(IssuerError),
}
impl TokenGrant {
	/// Returns the token, if one was issued.
	pub fn token(&self) -> Option<&AccessToken> {
		match self {
			Self::Issued(token) => Some(token),
			Self::Rejected(_) => None,
		}
	}

	/// Returns the issuer's error object, if issuance was rejected.
	pub fn rejection(&self) -> Option<&IssuerError> {
		match self {
			Self::Issued(_) => None,
			Self::Rejected(err) => Some(err),
		}
	}

	/// Converts into a `Result`, mapping rejection into the error side.
	pub fn into_result(self) -> Result<AccessToken, IssuerError> {
		match self {
			Self::Issued(token) => Ok(token),
			Self::Rejected(err) => Err(err),
		}
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	fn response(expires_in: i64) -> TokenResponse {
		TokenResponse {
			access_token: Secret::new("token-1"),
			token_type: "bearer".into(),
			expires_in,
			scope: Some("resource.WRITE resource.READ".into()),
		}
	}

	#[test]
	fn expiry_is_derived_from_issue_time() {
		let issued = macros::datetime!(2025-01-01 00:00 UTC);
		let token = AccessToken::from_response(response(3600), issued)
			.expect("Positive lifetimes should produce a token.");

		assert_eq!(token.expires_at, macros::datetime!(2025-01-01 01:00 UTC));
		assert_eq!(token.bearer(), "Bearer token-1");
	}

	#[test]
	fn validity_is_strict_at_the_expiry_instant() {
		let issued = macros::datetime!(2025-01-01 00:00 UTC);
		let token = AccessToken::from_response(response(60), issued)
			.expect("Positive lifetimes should produce a token.");

		assert!(token.is_valid_at(macros::datetime!(2025-01-01 00:00:59 UTC)));
		assert!(!token.is_valid_at(macros::datetime!(2025-01-01 00:01 UTC)));
		assert!(!token.is_valid_at(macros::datetime!(2025-01-01 00:01:01 UTC)));
	}

	#[test]
	fn non_positive_lifetimes_are_rejected() {
		let issued = macros::datetime!(2025-01-01 00:00 UTC);
		let err = AccessToken::from_response(response(0), issued)
			.expect_err("A zero lifetime should not produce a token.");

		assert!(matches!(err, ParseError::NonPositiveExpiresIn { expires_in: 0 }));
	}

	#[test]
	fn lifetimes_past_the_calendar_range_are_rejected() {
		let issued = macros::datetime!(2025-01-01 00:00 UTC);
		let err = AccessToken::from_response(response(9_000_000_000_000), issued)
			.expect_err("An expiry beyond the representable range should not produce a token.");

		assert!(matches!(
			err,
			ParseError::ExpiresInOutOfRange { expires_in: 9_000_000_000_000 }
		));
	}

	#[test]
	fn debug_output_redacts_the_bearer_value() {
		let token =
			AccessToken::from_response(response(60), macros::datetime!(2025-01-01 00:00 UTC))
				.expect("Positive lifetimes should produce a token.");

		assert!(!format!("{token:?}").contains("token-1"));
	}
}
