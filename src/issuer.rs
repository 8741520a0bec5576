//! Issuer-defined error objects passed through as ordinary JSON results.
//!
//! The bank reports business and authentication failures as JSON bodies shaped like
//! `{"ErrorCode": "ESB-14-008", "ErrorMessage": {...}}`. The pipeline never treats those as
//! Rust errors; endpoint code branches on them with [`IssuerError::detect`].

// self
use crate::_prelude::*;

/// Field carrying the issuer's error code.
pub const ERROR_CODE_FIELD: &str = "ErrorCode";
/// Field carrying the issuer's error message (a string or a per-language object).
pub const ERROR_MESSAGE_FIELD: &str = "ErrorMessage";

/// JSON error object returned by the issuer instead of the expected payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssuerError(Value);
impl IssuerError {
	/// Wraps a raw JSON body without inspecting it.
	pub fn new(body: Value) -> Self {
		Self(body)
	}

	/// Returns the body as an issuer error when it carries an `ErrorCode` field.
	pub fn detect(body: &Value) -> Option<Self> {
		Self::matches(body).then(|| Self(body.clone()))
	}

	/// Returns `true` when `body` carries an `ErrorCode` field.
	pub fn matches(body: &Value) -> bool {
		body.get(ERROR_CODE_FIELD).is_some()
	}

	/// Returns the `ErrorCode` value when it is a string.
	pub fn error_code(&self) -> Option<&str> {
		self.0.get(ERROR_CODE_FIELD).and_then(Value::as_str)
	}

	/// Returns the raw `ErrorMessage` value.
	pub fn error_message(&self) -> Option<&Value> {
		self.0.get(ERROR_MESSAGE_FIELD)
	}

	/// Returns the English message, accepting both plain strings and
	/// `{"Indonesian": ..., "English": ...}` objects.
	pub fn english_message(&self) -> Option<&str> {
		match self.error_message()? {
			Value::String(message) => Some(message),
			Value::Object(map) => map.get("English").and_then(Value::as_str),
			_ => None,
		}
	}

	/// Returns `true` when the error code matches `code`.
	pub fn has_code(&self, code: &str) -> bool {
		self.error_code() == Some(code)
	}

	/// Borrows the raw JSON body.
	pub fn as_json(&self) -> &Value {
		&self.0
	}

	/// Returns the raw JSON body.
	pub fn into_json(self) -> Value {
		self.0
	}
}
impl Display for IssuerError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match (self.error_code(), self.english_message()) {
			(Some(code), Some(message)) => write!(f, "{code}: {message}"),
			(Some(code), None) => f.write_str(code),
			_ => write!(f, "{}", self.0),
		}
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	#[test]
	fn detect_requires_error_code() {
		assert!(IssuerError::detect(&json!({ "Currencies": [] })).is_none());

		let err = IssuerError::detect(&json!({
			"ErrorCode": "ESB-14-008",
			"ErrorMessage": { "Indonesian": "Client_Id/Client_Secret/Grant_Type tidak valid", "English": "Invalid Client_Id/Client_Secret/Grant_Type" }
		}))
		.expect("Bodies carrying ErrorCode should be detected.");

		assert!(err.has_code("ESB-14-008"));
		assert_eq!(err.english_message(), Some("Invalid Client_Id/Client_Secret/Grant_Type"));
		assert_eq!(err.to_string(), "ESB-14-008: Invalid Client_Id/Client_Secret/Grant_Type");
	}

	#[test]
	fn plain_string_messages_are_supported() {
		let err = IssuerError::new(json!({ "ErrorCode": "0409", "ErrorMessage": "Account closed" }));

		assert_eq!(err.english_message(), Some("Account closed"));
		assert_eq!(err.into_json()["ErrorCode"], "0409");
	}
}
