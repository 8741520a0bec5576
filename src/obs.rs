//! Optional observability for token issuance and signed requests.
//!
//! Both operations report an [`Outcome`] once they settle. An issuer error object counts as
//! [`Outcome::Rejected`], whether it came from the token endpoint or from an API endpoint,
//! even though the caller receives it as `Ok`.
//!
//! # Feature Flags
//!
//! - `tracing`: each operation runs inside a `bca_client.operation` span carrying
//!   `operation`, `stage`, and the settled `outcome`.
//! - `metrics`: `bca_client_operation_total` counts attempts and settled outcomes, labeled
//!   by `operation` and `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::{_prelude::*, auth::TokenGrant, issuer::IssuerError};

/// Operations observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationKind {
	/// Client-credentials token request.
	TokenIssuance,
	/// Signed call to an API endpoint.
	SignedRequest,
}
impl OperationKind {
	/// Label used for the `operation` span field and metric label.
	pub const fn as_str(self) -> &'static str {
		match self {
			OperationKind::TokenIssuance => "token_issuance",
			OperationKind::SignedRequest => "signed_request",
		}
	}
}
impl Display for OperationKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// How an operation settled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
	/// The operation started.
	Attempt,
	/// A token was issued, or an endpoint answered with a non-error body.
	Success,
	/// The bank answered with an `ErrorCode` object.
	Rejected,
	/// An `Err` reached the caller.
	Failure,
}
impl Outcome {
	/// Label used for the `outcome` span field and metric label.
	pub const fn as_str(self) -> &'static str {
		match self {
			Outcome::Attempt => "attempt",
			Outcome::Success => "success",
			Outcome::Rejected => "rejected",
			Outcome::Failure => "failure",
		}
	}

	/// Classifies a token issuance.
	pub fn of_token_grant(result: &Result<TokenGrant>) -> Self {
		match result {
			Ok(TokenGrant::Issued(_)) => Outcome::Success,
			Ok(TokenGrant::Rejected(_)) => Outcome::Rejected,
			Err(_) => Outcome::Failure,
		}
	}

	/// Classifies a signed call by its parsed body.
	pub fn of_response(result: &Result<Value>) -> Self {
		match result {
			Ok(body) if IssuerError::matches(body) => Outcome::Rejected,
			Ok(_) => Outcome::Success,
			Err(_) => Outcome::Failure,
		}
	}
}
impl Display for Outcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;
	use crate::error::{ParseError, TransportError};

	#[test]
	fn issuer_error_bodies_are_rejections() {
		let rejected = Ok(json!({ "ErrorCode": "ESB-14-021", "ErrorMessage": {} }));
		let accepted = Ok(json!({ "Details": [] }));
		let failed = Err(Error::from(TransportError::Io(std::io::Error::other("reset"))));

		assert_eq!(Outcome::of_response(&rejected), Outcome::Rejected);
		assert_eq!(Outcome::of_response(&accepted), Outcome::Success);
		assert_eq!(Outcome::of_response(&failed), Outcome::Failure);
	}

	#[test]
	fn token_grants_classify_by_variant() {
		let rejected =
			Ok(TokenGrant::Rejected(IssuerError::new(json!({ "ErrorCode": "ESB-14-008" }))));
		let failed = Err(Error::from(ParseError::NonPositiveExpiresIn { expires_in: 0 }));

		assert_eq!(Outcome::of_token_grant(&rejected), Outcome::Rejected);
		assert_eq!(Outcome::of_token_grant(&failed), Outcome::Failure);
	}
}
