//! Signed, token-caching client for the BCA REST API family: OAuth client credentials, HMAC
//! request signatures, and canonical URLs in one crate.
//!
//! Every endpoint call flows through [`client::BcaClient::request`], which obtains a valid
//! bearer token from the instance-owned [`cache::TokenCache`], stamps the request with a
//! timestamp from the injected [`clock::Clock`], signs it with [`sign::RequestSigner`], and
//! hands it to an [`http::ApiHttpClient`] transport before parsing the JSON body.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod cache;
pub mod canonical;
pub mod client;
pub mod clock;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod http;
pub mod issuer;
pub mod oauth;
pub mod obs;
pub mod sign;

mod _prelude {
	pub use std::{
		borrow::Cow,
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::Value;
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use oauth2::http as http_types;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use serde_json;
pub use time;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, tokio as _};
