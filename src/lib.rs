//! Service-principal embed token broker: exchanges client credentials for an identity token,
//! resolves report metadata across workspaces, then cascades token-generation strategies until
//! a renderable credential comes back.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod cache;
pub mod error;
pub mod flows;
pub mod http;
pub mod obs;
pub mod provider;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::ServicePrincipal,
		flows::Broker,
		http::ReqwestHttpClient,
		provider::ProviderEndpoints,
	};

	/// Tenant identifier baked into every test principal.
	pub const TEST_TENANT: &str = "tenant-test";

	/// Builds the service principal shared across integration tests.
	pub fn test_principal() -> ServicePrincipal {
		ServicePrincipal::new(TEST_TENANT, "client-test", "secret-test")
			.expect("Test principal credentials should be valid.")
	}

	/// Constructs a [`Broker`] whose authority and API endpoints both point at a mock server.
	///
	/// The token endpoint resolves under `{base}/tenant-test/oauth2/v2.0/token` and the API
	/// surface under `{base}/api`, so a single `httpmock` instance can serve both roles.
	pub fn build_test_broker(base_url: &str) -> Broker {
		let authority =
			Url::parse(base_url).expect("Mock authority base URL should parse successfully.");
		let api = Url::parse(&format!("{base_url}/api"))
			.expect("Mock API base URL should parse successfully.");

		Broker::with_http_client(
			test_principal(),
			ProviderEndpoints::new(authority, api),
			ReqwestHttpClient::default(),
		)
	}
}

mod _prelude {
	pub use std::{
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::Mutex;
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use reqwest;
pub use url;
#[cfg(test)] use {httpmock as _, tokio as _};
