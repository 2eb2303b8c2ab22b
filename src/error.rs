//! Broker-level error taxonomy shared across flows.
//!
//! Every failure a caller can observe maps to exactly one [`Error`] variant so the routing
//! layer on top can translate kinds into transport status codes without string matching.
//! Upstream status and body text are preserved wherever they carry diagnostic value.

// self
use crate::_prelude::*;

/// Broker-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical broker error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem; fatal and never retried.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Caller-supplied identifier failed validation.
	#[error(transparent)]
	Validation(#[from] crate::auth::IdentifierError),
	/// Transport failure (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Upstream payload was malformed or missing required fields.
	#[error(transparent)]
	InvalidResponse(#[from] InvalidResponseError),

	/// Identity token exchange was rejected by the authority.
	#[error("Identity token exchange failed with status {status}.")]
	UpstreamAuth {
		/// HTTP status code returned by the token endpoint.
		status: u16,
		/// Raw response body for diagnostics.
		body: String,
	},
	/// Upstream returned 403; the identity lacks a permission.
	#[error("Upstream denied access; the identity is missing the {permission} permission.")]
	PermissionDenied {
		/// Scope or permission the identity needs to be granted.
		permission: &'static str,
		/// HTTP status code returned by upstream.
		status: u16,
	},
	/// Upstream returned 404; the resource is absent or inaccessible.
	#[error("{resource} was not found or is not accessible.")]
	NotFound {
		/// Human-readable description of the missing resource.
		resource: String,
		/// HTTP status code returned by upstream.
		status: u16,
	},
	/// Any other non-success upstream status.
	#[error("Upstream API call failed with status {status}.")]
	UpstreamApi {
		/// HTTP status code returned by upstream.
		status: u16,
		/// Raw response body for diagnostics.
		body: String,
	},
}

/// Configuration failures raised before any network call is made.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// A required service-principal credential was missing or empty.
	#[error("Required credential `{field}` is missing or empty.")]
	MissingCredential {
		/// Name of the missing configuration field.
		field: &'static str,
	},
	/// Tenant identifier failed validation.
	#[error("Tenant identifier is invalid.")]
	InvalidTenant {
		/// Underlying identifier validation failure.
		#[source]
		source: crate::auth::IdentifierError,
	},
	/// A derived endpoint URL could not be constructed.
	#[error("Endpoint URL could not be constructed.")]
	InvalidEndpoint {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
}

/// Malformed upstream payload variants.
#[derive(Debug, ThisError)]
pub enum InvalidResponseError {
	/// Upstream response omitted the token value or returned it empty.
	#[error("Upstream response is missing a token value.")]
	MissingToken,
	/// Upstream responded with JSON that could not be parsed.
	#[error("Upstream returned a malformed JSON payload.")]
	Malformed {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code the payload arrived with.
		status: u16,
	},
	/// Upstream embedded an identifier that fails validation.
	#[error("Upstream payload carries an invalid identifier.")]
	InvalidIdentifier {
		/// Underlying identifier validation failure.
		#[source]
		source: crate::auth::IdentifierError,
	},
	/// Token expiration timestamp could not be parsed.
	#[error("Upstream token expiration timestamp is malformed.")]
	InvalidExpiration {
		/// Underlying timestamp parsing failure.
		#[source]
		source: time::error::Parse,
	},
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the upstream endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the upstream endpoint.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
