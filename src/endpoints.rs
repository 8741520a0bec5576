//! Thin endpoint collaborators composed from
//! [`BcaClient::request`](crate::client::BcaClient::request).
//!
//! Each wrapper borrows the client, marshals its arguments into an
//! [`ApiRequest`](crate::client::ApiRequest), and returns the parsed JSON unchanged. Request
//! and response payloads stay opaque JSON; callers own the banking semantics.

pub mod business_banking;
pub mod fire;
pub mod general_information;

pub use business_banking::*;
pub use fire::*;
pub use general_information::*;

// self
use crate::canonical;

/// Appends `params` as a query string and canonicalizes the result. Without params the path
/// is returned as-is.
pub(crate) fn path_with_query<'a, I>(path: &str, params: I) -> String
where
	I: IntoIterator<Item = (&'a str, &'a str)>,
{
	let mut buf = path.to_owned();

	for (idx, (name, value)) in params.into_iter().enumerate() {
		buf.push(if idx == 0 { '?' } else { '&' });
		buf.push_str(name);
		buf.push('=');
		buf.push_str(value);
	}

	canonical::canonicalize(&buf).into_owned()
}

/// Joins list parameters with commas, the separator the API expects.
pub(crate) fn comma_joined<S>(values: &[S]) -> String
where
	S: AsRef<str>,
{
	values.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(",")
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn query_is_appended_in_canonical_order() {
		assert_eq!(
			path_with_query("/general/rate/forex", [("RateType", "e-rate"), ("CurrencyCode", "USD")]),
			"/general/rate/forex?CurrencyCode=USD&RateType=e-rate"
		);
		assert_eq!(path_with_query("/general/rate/forex", []), "/general/rate/forex");
	}

	#[test]
	fn lists_are_comma_joined() {
		assert_eq!(comma_joined(&["0201245680", "0063001004"]), "0201245680,0063001004");
		assert_eq!(comma_joined::<&str>(&[]), "");
	}
}
