//! Token acquisition with caching + singleflight issuance.
//!
//! [`BcaClient::get_valid_token`] serves the cached token while `now < expires_at` and
//! otherwise performs one client-credentials request. Concurrent callers that find the
//! cache empty queue on the cache's issuance guard and re-check it once they hold the
//! guard, so only the first of them reaches the token endpoint. Rejections and failures
//! leave the cache untouched.

// self
use crate::{
	_prelude::*,
	auth::TokenGrant,
	client::BcaClient,
	http::ApiHttpClient,
	oauth::{self, TOKEN_ENDPOINT_LABEL, TransportErrorMapper},
	obs::{self, OperationKind, OperationSpan, Outcome},
};

impl<C, M> BcaClient<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Returns a valid bearer token, issuing a new one when the cache is empty or expired.
	///
	/// An issuer error object comes back as [`TokenGrant::Rejected`]; nothing is cached
	/// and the next call tries again.
	pub async fn get_valid_token(&self) -> Result<TokenGrant> {
		if let Some(token) = self.token_cache().valid_at(self.clock().now()) {
			return Ok(TokenGrant::Issued(token));
		}

		let _singleflight = self.token_cache().issuance_guard().lock().await;

		if let Some(token) = self.token_cache().valid_at(self.clock().now()) {
			return Ok(TokenGrant::Issued(token));
		}

		self.issue_token().await
	}

	/// Discards the cached token regardless of expiry.
	pub fn clear_token_cache(&self) {
		self.token_cache().clear();
	}

	async fn issue_token(&self) -> Result<TokenGrant> {
		const KIND: OperationKind = OperationKind::TokenIssuance;

		let span = OperationSpan::new(KIND, "issue_token");

		obs::record_operation_outcome(KIND, Outcome::Attempt);

		let result = span
			.instrument(async move {
				let request = oauth::token_request(self.base_url(), self.credentials())?;
				let issued_at = self.clock().now();
				let response = self.dispatch(TOKEN_ENDPOINT_LABEL, request).await?;
				let grant = oauth::interpret_token_response(&response, issued_at)?;

				if let TokenGrant::Issued(token) = &grant {
					self.token_cache().replace(token.clone());
				}

				Ok(grant)
			})
			.await;

		obs::record_settled(&span, KIND, Outcome::of_token_grant(&result));

		result
	}
}
