//! Identity token model produced by the client-credentials exchange.

// self
use crate::{_prelude::*, auth::TokenSecret};

/// Bearer token obtained from the authority via the client-credentials grant.
///
/// Instances are transient by design: every broker operation acquires a fresh one and the
/// previous instance is superseded, never merged. The cache tracker keeps a copy of the
/// latest token purely for status reporting.
#[derive(Clone, Serialize, Deserialize)]
pub struct IdentityToken {
	/// Token type reported by the authority, typically `Bearer`.
	pub token_type: String,
	/// Access token secret; callers must avoid logging it.
	pub access_token: TokenSecret,
	/// Instant the broker received the token.
	#[serde(with = "time::serde::rfc3339")]
	pub issued_at: OffsetDateTime,
	/// Nominal expiry instant derived from the authority's `expires_in`.
	#[serde(with = "time::serde::rfc3339")]
	pub expires_at: OffsetDateTime,
}
impl IdentityToken {
	/// Returns the total nominal lifetime from issue to expiry.
	pub fn lifetime(&self) -> Duration {
		self.expires_at - self.issued_at
	}

	/// Returns `true` if the token is nominally valid at the provided instant.
	pub fn is_valid_at(&self, instant: OffsetDateTime) -> bool {
		instant < self.expires_at
	}
}
impl Debug for IdentityToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("IdentityToken")
			.field("token_type", &self.token_type)
			.field("access_token", &"<redacted>")
			.field("issued_at", &self.issued_at)
			.field("expires_at", &self.expires_at)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	#[test]
	fn validity_tracks_the_expiry_instant() {
		let token = IdentityToken {
			token_type: "Bearer".into(),
			access_token: TokenSecret::new("access"),
			issued_at: macros::datetime!(2025-01-01 00:00 UTC),
			expires_at: macros::datetime!(2025-01-01 01:00 UTC),
		};

		assert!(token.is_valid_at(macros::datetime!(2025-01-01 00:59 UTC)));
		assert!(!token.is_valid_at(macros::datetime!(2025-01-01 01:00 UTC)));
		assert_eq!(token.lifetime(), Duration::hours(1));
	}
}
