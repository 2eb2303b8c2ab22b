//! Transport primitives for the broker's upstream REST calls.
//!
//! The module wraps [`ReqwestClient`] so shared HTTP behavior lives in one place and
//! exposes [`RawResponse`], a fully buffered status + body pair. Flows classify upstream
//! failures from the status code and preserved body text, so responses are always read to
//! completion before any mapping happens.

// std
use std::ops::Deref;
// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	error::{InvalidResponseError, TransportError},
};

/// Thin wrapper around [`ReqwestClient`] used for every outbound broker request.
///
/// Request-scoped timeouts come from the wrapped client; construct one with
/// [`reqwest::ClientBuilder::timeout`] and pass it through [`with_client`] when the
/// defaults are not acceptable. A timeout surfaces as [`TransportError::Network`] and is
/// treated by callers exactly like any other transport failure.
///
/// [`with_client`]: ReqwestHttpClient::with_client
#[derive(Clone, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Sends a form-encoded POST without authentication (token endpoint exchange).
	pub(crate) async fn post_form(
		&self,
		url: Url,
		form: &[(&str, &str)],
	) -> Result<RawResponse, TransportError> {
		let response = self.0.post(url).form(form).send().await?;

		RawResponse::read(response).await
	}

	/// Sends an authenticated GET carrying the bearer token.
	pub(crate) async fn get_bearer(
		&self,
		url: Url,
		token: &TokenSecret,
	) -> Result<RawResponse, TransportError> {
		let response = self.0.get(url).bearer_auth(token.expose()).send().await?;

		RawResponse::read(response).await
	}

	/// Sends an authenticated JSON POST carrying the bearer token.
	pub(crate) async fn post_json_bearer<T>(
		&self,
		url: Url,
		token: &TokenSecret,
		body: &T,
	) -> Result<RawResponse, TransportError>
	where
		T: Serialize,
	{
		let response = self.0.post(url).bearer_auth(token.expose()).json(body).send().await?;

		RawResponse::read(response).await
	}
}
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

/// Buffered upstream response: status code plus complete body text.
#[derive(Clone, Debug)]
pub(crate) struct RawResponse {
	/// HTTP status code.
	pub status: u16,
	/// Full response body; kept verbatim for error diagnostics.
	pub body: String,
}
impl RawResponse {
	async fn read(response: reqwest::Response) -> Result<Self, TransportError> {
		let status = response.status().as_u16();
		let body = response.text().await?;

		Ok(Self { status, body })
	}

	/// Returns `true` for 2xx statuses.
	pub(crate) fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Decodes the body as JSON, reporting the failing path on malformed payloads.
	pub(crate) fn decode<T>(&self) -> Result<T, InvalidResponseError>
	where
		T: DeserializeOwned,
	{
		let mut deserializer = serde_json::Deserializer::from_str(&self.body);

		serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| InvalidResponseError::Malformed { source, status: self.status })
	}
}
