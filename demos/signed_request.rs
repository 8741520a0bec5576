//! Issues a token against a mock BCA gateway, then reads deposit rates and ATM locations
//! through signed requests that share the cached token.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use bca_client::{
	auth::Credentials, client::ReqwestBcaClient, config::ClientConfig,
	endpoints::AtmLocatorQuery,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/oauth/token");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"demo-access\",\"token_type\":\"bearer\",\"expires_in\":3600,\"scope\":\"resource.WRITE resource.READ\"}",
			);
		})
		.await;
	let deposit_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/general/rate/deposit").header_exists("x-bca-signature");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"Details\":[{\"ProductName\":\"Tahapan\",\"Rate\":\"0.50\"}]}");
		})
		.await;
	let atm_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/general/info-bca/atm").query_param("SearchBy", "Distance");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"ATMDetails\":[{\"Name\":\"ATM Menara BCA\",\"Distance\":\"0.10\"}]}");
		})
		.await;
	let credentials =
		Credentials::new("demo-client", "demo-secret", "demo-key", "demo-api-secret", "example.com");
	let client = ReqwestBcaClient::new(ClientConfig::new(server.base_url(), credentials))?;
	let info = client.general_information();
	let deposit = info.deposit_rate().await?;

	println!("Deposit rates: {deposit}.");

	let atms = info
		.atm_locator(&AtmLocatorQuery {
			search_by: "Distance".into(),
			latitude: "-6.1900718".into(),
			longitude: "106.797190".into(),
			radius: "20".into(),
			count: None,
		})
		.await?;

	println!("Nearby ATMs: {atms}.");

	token_mock.assert_async().await;
	deposit_mock.assert_async().await;
	atm_mock.assert_async().await;

	Ok(())
}
