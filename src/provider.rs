//! Upstream endpoint descriptor for the authority and the analytics REST API.

// self
use crate::{_prelude::*, auth::{ReportId, TenantId, WorkspaceId}, error::ConfigError};

/// Default OAuth 2.0 authority base.
pub const DEFAULT_AUTHORITY: &str = "https://login.microsoftonline.com";
/// Default analytics REST API base (organization scope).
pub const DEFAULT_API: &str = "https://api.powerbi.com/v1.0/myorg";

/// Base URLs for the token authority and the analytics REST surface.
///
/// [`Default`] points at the public cloud endpoints used by the platform; tests and
/// sovereign-cloud deployments construct their own pair via [`ProviderEndpoints::new`].
#[derive(Clone, Debug)]
pub struct ProviderEndpoints {
	authority: Url,
	api: Url,
}
impl ProviderEndpoints {
	/// Creates a descriptor from explicit authority and API base URLs.
	pub fn new(authority: Url, api: Url) -> Self {
		Self { authority, api }
	}

	/// Returns the authority base URL.
	pub fn authority(&self) -> &Url {
		&self.authority
	}

	/// Returns the API base URL.
	pub fn api(&self) -> &Url {
		&self.api
	}

	/// Tenant-scoped client-credentials token endpoint.
	pub(crate) fn token_endpoint(&self, tenant: &TenantId) -> Result<Url, ConfigError> {
		self.join_authority(&format!("{tenant}/oauth2/v2.0/token"))
	}

	/// Report resource scoped to a workspace.
	pub(crate) fn report(
		&self,
		workspace: &WorkspaceId,
		report: &ReportId,
	) -> Result<Url, ConfigError> {
		self.join_api(&format!("groups/{workspace}/reports/{report}"))
	}

	/// Embed token generation endpoint.
	pub(crate) fn generate_token(&self) -> Result<Url, ConfigError> {
		self.join_api("GenerateToken")
	}

	/// Workspace listing endpoint.
	pub(crate) fn workspaces(&self) -> Result<Url, ConfigError> {
		self.join_api("groups")
	}

	/// Report listing endpoint scoped to a workspace.
	pub(crate) fn workspace_reports(&self, workspace: &WorkspaceId) -> Result<Url, ConfigError> {
		self.join_api(&format!("groups/{workspace}/reports"))
	}

	fn join_authority(&self, path: &str) -> Result<Url, ConfigError> {
		join(&self.authority, path)
	}

	fn join_api(&self, path: &str) -> Result<Url, ConfigError> {
		join(&self.api, path)
	}
}
impl Default for ProviderEndpoints {
	fn default() -> Self {
		Self {
			authority: Url::parse(DEFAULT_AUTHORITY)
				.expect("Built-in authority URL should parse."),
			api: Url::parse(DEFAULT_API).expect("Built-in API URL should parse."),
		}
	}
}

// Url::join treats a base without a trailing slash as a file segment, so paths are
// appended textually instead.
fn join(base: &Url, path: &str) -> Result<Url, ConfigError> {
	let joined = format!("{}/{path}", base.as_str().trim_end_matches('/'));

	Url::parse(&joined).map_err(|source| ConfigError::InvalidEndpoint { source })
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn fixture() -> ProviderEndpoints {
		ProviderEndpoints::new(
			Url::parse("https://login.example.test").expect("Authority fixture should parse."),
			Url::parse("https://api.example.test/v1.0/myorg")
				.expect("API fixture should parse."),
		)
	}

	#[test]
	fn token_endpoint_is_tenant_scoped() {
		let tenant = TenantId::new("tenant-1").expect("Tenant fixture should be valid.");
		let url = fixture().token_endpoint(&tenant).expect("Token endpoint should build.");

		assert_eq!(url.as_str(), "https://login.example.test/tenant-1/oauth2/v2.0/token");
	}

	#[test]
	fn api_paths_survive_trailing_slashes() {
		let endpoints = ProviderEndpoints::new(
			Url::parse("https://login.example.test/").expect("Authority fixture should parse."),
			Url::parse("https://api.example.test/v1.0/myorg/")
				.expect("API fixture should parse."),
		);
		let workspace = WorkspaceId::new("ws-1").expect("Workspace fixture should be valid.");
		let report = ReportId::new("r-1").expect("Report fixture should be valid.");
		let url = endpoints.report(&workspace, &report).expect("Report endpoint should build.");

		assert_eq!(url.as_str(), "https://api.example.test/v1.0/myorg/groups/ws-1/reports/r-1");
	}

	#[test]
	fn default_targets_the_public_cloud() {
		let endpoints = ProviderEndpoints::default();

		assert_eq!(endpoints.authority().as_str(), "https://login.microsoftonline.com/");
		assert!(endpoints.api().as_str().starts_with("https://api.powerbi.com/"));
	}
}
