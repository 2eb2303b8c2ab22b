//! Report metadata resolution, including cross-workspace dataset bindings.

// self
use crate::{
	_prelude::*,
	auth::{DatasetId, IdentityToken, ReportId, WorkspaceId},
	error::InvalidResponseError,
	flows::Broker,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

/// Wire shape of a report resource, shared by the metadata fetch and report listings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
	/// Report identifier.
	pub id: String,
	/// Display name.
	#[serde(default)]
	pub name: String,
	/// Portal URL for the report.
	#[serde(default)]
	pub web_url: String,
	/// Embed URL consumed by the client-side viewer.
	#[serde(default)]
	pub embed_url: String,
	/// Identifier of the dataset backing the report.
	#[serde(default)]
	pub dataset_id: String,
	/// Workspace owning the dataset, when it differs from the report's workspace.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub dataset_workspace_id: Option<String>,
}

/// Resolved report metadata consumed by the embed generation cascade.
///
/// `dataset_workspace_id` is always populated: absent upstream values default to the
/// requested workspace, and a differing value marks a cross-workspace dataset binding
/// that tier-2 generation must name as a target workspace.
#[derive(Clone, Debug)]
pub struct ReportMetadata {
	/// Report identifier as reported by upstream.
	pub report_id: ReportId,
	/// Display name.
	pub name: String,
	/// Portal URL for the report.
	pub web_url: String,
	/// Embed URL consumed by the client-side viewer.
	pub embed_url: String,
	/// Dataset backing the report.
	pub dataset_id: DatasetId,
	/// Workspace owning the dataset.
	pub dataset_workspace_id: WorkspaceId,
}
impl ReportMetadata {
	/// Returns `true` when the dataset lives outside the given workspace.
	pub fn is_cross_workspace(&self, requested: &WorkspaceId) -> bool {
		self.dataset_workspace_id != *requested
	}
}

impl Broker {
	/// Fetches and resolves metadata for a report scoped to a workspace.
	///
	/// Maps upstream 403 to [`Error::PermissionDenied`] naming the missing read scope and
	/// 404 to [`Error::NotFound`]; any other non-success status surfaces as
	/// [`Error::UpstreamApi`] with the body preserved.
	pub async fn fetch_report(
		&self,
		token: &IdentityToken,
		workspace_id: &WorkspaceId,
		report_id: &ReportId,
	) -> Result<ReportMetadata> {
		const KIND: FlowKind = FlowKind::ReportMetadata;

		let span = FlowSpan::new(KIND, "fetch_report");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let url = self.endpoints.report(workspace_id, report_id)?;
				let response = self.http_client.get_bearer(url, &token.access_token).await?;

				match response.status {
					403 => {
						return Err(Error::PermissionDenied {
							permission: "Report.Read.All",
							status: response.status,
						});
					},
					404 => {
						return Err(Error::NotFound {
							resource: format!(
								"Report `{report_id}` in workspace `{workspace_id}`"
							),
							status: response.status,
						});
					},
					_ if !response.is_success() => {
						return Err(Error::UpstreamApi {
							status: response.status,
							body: response.body,
						});
					},
					_ => {},
				}

				let resource: ReportSummary = response.decode()?;

				resolve_metadata(resource, workspace_id)
			})
			.await;

		match &result {
			Ok(_) => obs::record_flow_outcome(KIND, FlowOutcome::Success),
			Err(_) => obs::record_flow_outcome(KIND, FlowOutcome::Failure),
		}

		result
	}
}

fn resolve_metadata(
	resource: ReportSummary,
	requested_workspace: &WorkspaceId,
) -> Result<ReportMetadata> {
	let report_id = parse_id(ReportId::new(&resource.id))?;
	let dataset_id = parse_id(DatasetId::new(&resource.dataset_id))?;
	let dataset_workspace_id = match resource.dataset_workspace_id.as_deref() {
		Some(raw) => parse_id(WorkspaceId::new(raw))?,
		None => requested_workspace.clone(),
	};

	if dataset_workspace_id != *requested_workspace {
		obs::note_cross_workspace(requested_workspace, &dataset_workspace_id);
	}

	Ok(ReportMetadata {
		report_id,
		name: resource.name,
		web_url: resource.web_url,
		embed_url: resource.embed_url,
		dataset_id,
		dataset_workspace_id,
	})
}

// Identifier failures inside an upstream payload are the upstream's fault, not the
// caller's, so they classify as invalid responses rather than validation errors.
fn parse_id<T>(parsed: Result<T, crate::auth::IdentifierError>) -> Result<T> {
	parsed.map_err(|source| InvalidResponseError::InvalidIdentifier { source }.into())
}
