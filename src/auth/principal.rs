//! Service-principal credential bundle validated before any network call.

// self
use crate::{
	_prelude::*,
	auth::{TenantId, TokenSecret},
	error::ConfigError,
};

/// Non-interactive application identity authenticated via client id and secret.
///
/// Construction validates every field so an incomplete configuration fails with
/// [`ConfigError::MissingCredential`] before the broker touches the network.
#[derive(Clone)]
pub struct ServicePrincipal {
	tenant: TenantId,
	client_id: String,
	client_secret: TokenSecret,
}
impl ServicePrincipal {
	/// Validates and assembles a service principal from raw configuration values.
	pub fn new(
		tenant_id: impl AsRef<str>,
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
	) -> Result<Self, ConfigError> {
		let tenant_id = tenant_id.as_ref();
		let client_id = client_id.into();
		let client_secret = client_secret.into();

		if tenant_id.is_empty() {
			return Err(ConfigError::MissingCredential { field: "tenant_id" });
		}
		if client_id.is_empty() {
			return Err(ConfigError::MissingCredential { field: "client_id" });
		}
		if client_secret.is_empty() {
			return Err(ConfigError::MissingCredential { field: "client_secret" });
		}

		let tenant =
			TenantId::new(tenant_id).map_err(|source| ConfigError::InvalidTenant { source })?;

		Ok(Self { tenant, client_id, client_secret: TokenSecret::new(client_secret) })
	}

	/// Returns the tenant the principal authenticates against.
	pub fn tenant(&self) -> &TenantId {
		&self.tenant
	}

	/// Returns the OAuth 2.0 client identifier.
	pub fn client_id(&self) -> &str {
		&self.client_id
	}

	/// Returns the confidential client secret.
	pub fn client_secret(&self) -> &TokenSecret {
		&self.client_secret
	}
}
impl Debug for ServicePrincipal {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ServicePrincipal")
			.field("tenant", &self.tenant)
			.field("client_id", &self.client_id)
			.field("client_secret", &"<redacted>")
			.finish()
	}
}
