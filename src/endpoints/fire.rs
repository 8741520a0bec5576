//! FIRe (Financial Institution Remittance) endpoints.
//!
//! Every call posts an opaque JSON body and returns the bank's JSON answer.

// crates.io
use oauth2::http::Method;
// self
use crate::{
	_prelude::*,
	client::{ApiRequest, BcaClient},
	http::ApiHttpClient,
	oauth::TransportErrorMapper,
};

/// Borrowing wrapper for FIRe endpoints.
pub struct Fire<'a, C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	client: &'a BcaClient<C, M>,
}
impl<'a, C, M> Fire<'a, C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Wraps `client`.
	pub fn new(client: &'a BcaClient<C, M>) -> Self {
		Self { client }
	}

	/// Transfer to a BCA account or to another bank.
	pub async fn transfer<T>(&self, body: &T) -> Result<Value>
	where
		T: ?Sized + Serialize,
	{
		self.send(Method::POST, "/fire/transactions/to-account", body).await
	}

	/// Beneficiary account name inquiry (BCA or other bank).
	pub async fn inquiry_account<T>(&self, body: &T) -> Result<Value>
	where
		T: ?Sized + Serialize,
	{
		self.send(Method::POST, "/fire/accounts", body).await
	}

	/// Vostro account balance inquiry.
	pub async fn inquiry_account_balance<T>(&self, body: &T) -> Result<Value>
	where
		T: ?Sized + Serialize,
	{
		self.send(Method::POST, "/fire/accounts/balance", body).await
	}

	/// Status of a previously submitted transaction.
	pub async fn inquiry_transaction<T>(&self, body: &T) -> Result<Value>
	where
		T: ?Sized + Serialize,
	{
		self.send(Method::POST, "/fire/transactions", body).await
	}

	/// Cash transfer to a non-account holder.
	pub async fn cash_transfer<T>(&self, body: &T) -> Result<Value>
	where
		T: ?Sized + Serialize,
	{
		self.send(Method::POST, "/fire/transactions/cash-transfer", body).await
	}

	/// Amends a cash transfer.
	pub async fn amend_cash_transfer<T>(&self, body: &T) -> Result<Value>
	where
		T: ?Sized + Serialize,
	{
		self.send(Method::PUT, "/fire/transactions/cash-transfer/amend", body).await
	}

	/// Cancels a cash transfer.
	pub async fn cancel_cash_transfer<T>(&self, body: &T) -> Result<Value>
	where
		T: ?Sized + Serialize,
	{
		self.send(Method::POST, "/fire/transactions/cash-transfer/cancel", body).await
	}

	async fn send<T>(&self, method: Method, path: &'static str, body: &T) -> Result<Value>
	where
		T: ?Sized + Serialize,
	{
		let request = ApiRequest::json(method, path, body)?;

		self.client.request(&request).await
	}
}
