//! Identity token acquisition via the client-credentials grant.
//!
//! Every call is a fresh network round trip by design: no retries, no reuse, no
//! coalescing. The tracker snapshot is updated on success for status reporting only, so
//! callers always hold a token valid for the full downstream operation.

// self
use crate::{
	_prelude::*,
	auth::{IdentityToken, TokenSecret},
	error::InvalidResponseError,
	flows::Broker,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

/// Fixed scope targeting the analytics platform's API audience.
const API_SCOPE: &str = "https://analysis.windows.net/powerbi/api/.default";

/// Wire shape of the authority's token endpoint response.
#[derive(Debug, Deserialize)]
struct TokenEndpointResponse {
	#[serde(default)]
	token_type: String,
	#[serde(default)]
	expires_in: i64,
	#[serde(default)]
	access_token: String,
}

impl Broker {
	/// Exchanges the service-principal credentials for a fresh identity token.
	///
	/// Credential presence was validated at [`ServicePrincipal`](crate::auth::ServicePrincipal)
	/// construction, so this call goes straight to the tenant-scoped token endpoint. A
	/// non-success status maps to [`Error::UpstreamAuth`] with the upstream body preserved;
	/// a success payload without an access token maps to
	/// [`InvalidResponseError::MissingToken`].
	pub async fn acquire_identity_token(&self) -> Result<IdentityToken> {
		const KIND: FlowKind = FlowKind::Identity;

		let span = FlowSpan::new(KIND, "acquire_identity_token");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let url = self.endpoints.token_endpoint(self.principal.tenant())?;
				let form = [
					("grant_type", "client_credentials"),
					("client_id", self.principal.client_id()),
					("client_secret", self.principal.client_secret().expose()),
					("scope", API_SCOPE),
				];
				let response = self.http_client.post_form(url, &form).await?;

				if !response.is_success() {
					return Err(Error::UpstreamAuth {
						status: response.status,
						body: response.body,
					});
				}

				let issued_at = OffsetDateTime::now_utc();
				let payload: TokenEndpointResponse = response.decode()?;

				if payload.access_token.is_empty() {
					return Err(InvalidResponseError::MissingToken.into());
				}

				let token = IdentityToken {
					token_type: payload.token_type,
					access_token: TokenSecret::new(payload.access_token),
					issued_at,
					expires_at: issued_at + Duration::seconds(payload.expires_in),
				};

				self.tracker.record(&token);

				Ok(token)
			})
			.await;

		match &result {
			Ok(_) => obs::record_flow_outcome(KIND, FlowOutcome::Success),
			Err(_) => obs::record_flow_outcome(KIND, FlowOutcome::Failure),
		}

		result
	}
}
