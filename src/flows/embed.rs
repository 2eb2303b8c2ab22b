//! Cascading embed token generation and the end-to-end broker operation.
//!
//! Tenants vary in configuration: dataset/report co-location, workspace permission
//! model, and whether direct service-principal embedding is enabled. Rather than asking
//! the caller to pre-diagnose their tenant, the broker probes an ordered sequence of
//! generation tiers from most-specific to least-specific and returns the first credential
//! that comes back. The final tier derives a credential from the already-validated
//! identity token without a network call, so the cascade as a whole cannot fail once
//! metadata resolution has succeeded.

mod metrics;

pub use metrics::CascadeMetrics;

// self
use crate::{
	_prelude::*,
	auth::{IdentityToken, ReportId, TokenSecret, WorkspaceId},
	error::InvalidResponseError,
	flows::{Broker, ReportMetadata},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

/// Nominal lifetime stamped onto direct-identity credentials.
const DIRECT_CREDENTIAL_LIFETIME: Duration = Duration::hours(1);

/// Authentication mode the client SDK must use when initializing the embed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum TokenKind {
	/// Purpose-scoped embed token from the generation endpoint.
	Embed,
	/// Identity token passed through directly; broader-scoped last-resort mode.
	#[serde(rename = "Aad")]
	AadDirect,
}

/// Final broker output: a credential the browser client can render a report with.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedCredential {
	/// Credential value handed to the embedding SDK.
	pub token: TokenSecret,
	/// Authentication mode the SDK must initialize with.
	pub token_kind: TokenKind,
	/// Embed URL for the report.
	pub embed_url: String,
	/// Report the credential is scoped to.
	pub report_id: ReportId,
	/// Expiry instant: endpoint-reported for embed tokens, synthesized for direct ones.
	#[serde(with = "time::serde::rfc3339")]
	pub expires_at: OffsetDateTime,
}

/// Ordered network-backed generation tiers; the direct-identity fallback sits after them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum GenerationTier {
	/// Dataset + report ids only; the common co-located case.
	Simple,
	/// Adds read-only qualifiers and an explicit target workspace for the dataset.
	WorkspaceQualified,
}
impl GenerationTier {
	const CASCADE: [Self; 2] = [Self::Simple, Self::WorkspaceQualified];

	const fn as_str(self) -> &'static str {
		match self {
			Self::Simple => "simple",
			Self::WorkspaceQualified => "workspace_qualified",
		}
	}

	fn payload(self, metadata: &ReportMetadata) -> GenerateTokenRequest {
		match self {
			Self::Simple => GenerateTokenRequest {
				datasets: vec![DatasetRef {
					id: metadata.dataset_id.to_string(),
					xmla_permissions: None,
				}],
				reports: vec![ReportRef {
					id: metadata.report_id.to_string(),
					allow_edit: None,
				}],
				target_workspaces: None,
			},
			Self::WorkspaceQualified => GenerateTokenRequest {
				datasets: vec![DatasetRef {
					id: metadata.dataset_id.to_string(),
					xmla_permissions: Some("ReadOnly"),
				}],
				reports: vec![ReportRef {
					id: metadata.report_id.to_string(),
					allow_edit: Some(false),
				}],
				target_workspaces: Some(vec![WorkspaceRef {
					id: metadata.dataset_workspace_id.to_string(),
				}]),
			},
		}
	}
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateTokenRequest {
	datasets: Vec<DatasetRef>,
	reports: Vec<ReportRef>,
	#[serde(skip_serializing_if = "Option::is_none")]
	target_workspaces: Option<Vec<WorkspaceRef>>,
}
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DatasetRef {
	id: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	xmla_permissions: Option<&'static str>,
}
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportRef {
	id: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	allow_edit: Option<bool>,
}
#[derive(Debug, Serialize)]
struct WorkspaceRef {
	id: String,
}

#[derive(Debug, Deserialize)]
struct GenerateTokenResponse {
	#[serde(default)]
	token: String,
	#[serde(default)]
	expiration: String,
}

impl Broker {
	/// Produces an embeddable credential for the given workspace/report pair.
	///
	/// Validates both identifiers, acquires a fresh identity token, resolves report
	/// metadata, and runs the generation cascade. Identity and metadata errors propagate
	/// unchanged; cascade tier failures are absorbed until the guaranteed-success
	/// direct-identity fallback.
	pub async fn embed_token(
		&self,
		workspace_id: &str,
		report_id: &str,
	) -> Result<EmbedCredential> {
		let workspace_id = WorkspaceId::new(workspace_id)?;
		let report_id = ReportId::new(report_id)?;
		let token = self.acquire_identity_token().await?;
		let metadata = self.fetch_report(&token, &workspace_id, &report_id).await?;

		self.generate_embed_token(&token, &metadata).await
	}

	/// Runs the cascading generation strategy over resolved report metadata.
	///
	/// Tiers are attempted strictly in order; each failure (transport error, non-success
	/// status, malformed payload) falls through to the next. The only error path left is
	/// endpoint construction, which precedes the first attempt.
	pub async fn generate_embed_token(
		&self,
		token: &IdentityToken,
		metadata: &ReportMetadata,
	) -> Result<EmbedCredential> {
		const KIND: FlowKind = FlowKind::EmbedGeneration;

		let span = FlowSpan::new(KIND, "generate_embed_token");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let url = self.endpoints.generate_token()?;

				for tier in GenerationTier::CASCADE {
					self.cascade_metrics.record_attempt(tier);

					match self.attempt_generation(url.clone(), token, metadata, tier).await {
						Ok(credential) => {
							self.cascade_metrics.record_success(tier);

							return Ok(credential);
						},
						Err(err) => obs::note_tier_fallthrough(tier.as_str(), &err),
					}
				}

				self.cascade_metrics.record_direct_fallback();

				Ok(EmbedCredential {
					token: token.access_token.clone(),
					token_kind: TokenKind::AadDirect,
					embed_url: metadata.embed_url.clone(),
					report_id: metadata.report_id.clone(),
					expires_at: OffsetDateTime::now_utc() + DIRECT_CREDENTIAL_LIFETIME,
				})
			})
			.await;

		match &result {
			Ok(_) => obs::record_flow_outcome(KIND, FlowOutcome::Success),
			Err(_) => obs::record_flow_outcome(KIND, FlowOutcome::Failure),
		}

		result
	}

	async fn attempt_generation(
		&self,
		url: Url,
		token: &IdentityToken,
		metadata: &ReportMetadata,
		tier: GenerationTier,
	) -> Result<EmbedCredential> {
		let payload = tier.payload(metadata);
		let response =
			self.http_client.post_json_bearer(url, &token.access_token, &payload).await?;

		if !response.is_success() {
			return Err(Error::UpstreamApi { status: response.status, body: response.body });
		}

		let generated: GenerateTokenResponse = response.decode()?;

		if generated.token.is_empty() {
			return Err(InvalidResponseError::MissingToken.into());
		}

		let expires_at = OffsetDateTime::parse(
			&generated.expiration,
			&time::format_description::well_known::Rfc3339,
		)
		.map_err(|source| InvalidResponseError::InvalidExpiration { source })?;

		Ok(EmbedCredential {
			token: TokenSecret::new(generated.token),
			token_kind: TokenKind::Embed,
			embed_url: metadata.embed_url.clone(),
			report_id: metadata.report_id.clone(),
			expires_at,
		})
	}
}
