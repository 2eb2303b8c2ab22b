//! Workspace and report listing operations.

// self
use crate::{
	_prelude::*,
	auth::WorkspaceId,
	flows::{Broker, ReportSummary},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

/// Workspace resource as reported by the listing endpoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
	/// Workspace identifier.
	pub id: String,
	/// Display name.
	#[serde(default)]
	pub name: String,
	/// `true` when the workspace is read-only for the identity.
	#[serde(default)]
	pub is_read_only: bool,
	/// `true` when the workspace runs on dedicated capacity.
	#[serde(default)]
	pub is_on_dedicated_capacity: bool,
	/// Workspace type label reported by upstream.
	#[serde(default, rename = "type")]
	pub kind: String,
}

/// Envelope the listing endpoints wrap their items in.
///
/// The `default` path must name `Vec::new` so the derived impl does not require
/// `T: Default` for item types that carry no default.
#[derive(Debug, Deserialize)]
struct Listing<T> {
	#[serde(default = "Vec::new")]
	value: Vec<T>,
}

/// Workspaces visible to the service principal.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceList {
	/// Number of workspaces returned.
	pub workspace_count: usize,
	/// The workspaces themselves.
	pub workspaces: Vec<Workspace>,
}

/// Reports hosted in a single workspace.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportList {
	/// Workspace the listing was scoped to.
	pub workspace_id: WorkspaceId,
	/// Number of reports returned.
	pub report_count: usize,
	/// The reports themselves.
	pub reports: Vec<ReportSummary>,
}

impl Broker {
	/// Lists every workspace the service principal has access to.
	///
	/// Maps upstream 403 to [`Error::PermissionDenied`] naming the workspace read scope.
	pub async fn list_workspaces(&self) -> Result<WorkspaceList> {
		const KIND: FlowKind = FlowKind::Catalog;

		let span = FlowSpan::new(KIND, "list_workspaces");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let token = self.acquire_identity_token().await?;
				let url = self.endpoints.workspaces()?;
				let response = self.http_client.get_bearer(url, &token.access_token).await?;

				if response.status == 403 {
					return Err(Error::PermissionDenied {
						permission: "Workspace.Read.All",
						status: response.status,
					});
				}
				if !response.is_success() {
					return Err(Error::UpstreamApi {
						status: response.status,
						body: response.body,
					});
				}

				let listing: Listing<Workspace> = response.decode()?;

				Ok(WorkspaceList {
					workspace_count: listing.value.len(),
					workspaces: listing.value,
				})
			})
			.await;

		match &result {
			Ok(_) => obs::record_flow_outcome(KIND, FlowOutcome::Success),
			Err(_) => obs::record_flow_outcome(KIND, FlowOutcome::Failure),
		}

		result
	}

	/// Lists the reports hosted in a workspace.
	///
	/// Maps upstream 403 to [`Error::PermissionDenied`] and 404 to [`Error::NotFound`];
	/// any other non-success status surfaces as [`Error::UpstreamApi`].
	pub async fn list_reports(&self, workspace_id: &str) -> Result<ReportList> {
		const KIND: FlowKind = FlowKind::Catalog;

		let span = FlowSpan::new(KIND, "list_reports");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let workspace_id = WorkspaceId::new(workspace_id)?;
				let token = self.acquire_identity_token().await?;
				let url = self.endpoints.workspace_reports(&workspace_id)?;
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
							resource: format!("Workspace `{workspace_id}`"),
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

				let listing: Listing<ReportSummary> = response.decode()?;

				Ok(ReportList {
					workspace_id,
					report_count: listing.value.len(),
					reports: listing.value,
				})
			})
			.await;

		match &result {
			Ok(_) => obs::record_flow_outcome(KIND, FlowOutcome::Success),
			Err(_) => obs::record_flow_outcome(KIND, FlowOutcome::Failure),
		}

		result
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn listing_envelope_decodes_without_default_items() {
		let listing: Listing<Workspace> = serde_json::from_str(
			"{\"value\":[{\"id\":\"ws-1\",\"name\":\"Finance\"}]}",
		)
		.expect("Populated envelope should decode successfully.");

		assert_eq!(listing.value.len(), 1);
		assert_eq!(listing.value[0].id, "ws-1");

		let empty: Listing<ReportSummary> = serde_json::from_str("{}")
			.expect("An envelope without a value field should decode to an empty listing.");

		assert!(empty.value.is_empty());
	}
}
