//! Informational tracker for the most recently acquired identity token.
//!
//! The tracker exists purely for the status/clear observability pair: it records each
//! acquisition but is never consulted to skip one. Identity tokens are fetched fresh on
//! every operation so callers always hold a token valid for the full downstream call
//! chain, and the reported expiry is therefore nominal, not relied upon.

// self
use crate::{_prelude::*, auth::IdentityToken};

/// Shared, injectable holder for the latest identity token snapshot.
///
/// Concurrent acquisitions perform independent single read-modify-write updates;
/// last-write-wins is acceptable because the snapshot never gates behavior.
#[derive(Debug, Default)]
pub struct TokenStatusTracker {
	slot: Mutex<Option<IdentityToken>>,
}
impl TokenStatusTracker {
	/// Records the latest acquisition, superseding any previous snapshot.
	pub fn record(&self, token: &IdentityToken) {
		*self.slot.lock() = Some(token.clone());
	}

	/// Discards the stored snapshot. Has no effect on subsequent acquisitions.
	pub fn clear(&self) {
		*self.slot.lock() = None;
	}

	/// Computes the status against the current clock.
	pub fn status(&self) -> CacheStatus {
		self.status_at(OffsetDateTime::now_utc())
	}

	/// Computes the status at the provided instant.
	pub fn status_at(&self, now: OffsetDateTime) -> CacheStatus {
		let slot = self.slot.lock();
		let Some(token) = slot.as_ref() else {
			return CacheStatus { cached: false, valid: false, expires_at: None, seconds_remaining: 0 };
		};
		let valid = token.is_valid_at(now);
		let seconds_remaining = if valid {
			u64::try_from((token.expires_at - now).whole_seconds()).unwrap_or(0)
		} else {
			0
		};

		CacheStatus { cached: true, valid, expires_at: Some(token.expires_at), seconds_remaining }
	}
}

/// Derived, non-authoritative view over the tracker's snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatus {
	/// `true` when a snapshot is present.
	pub cached: bool,
	/// `true` when the snapshot's nominal expiry lies in the future.
	pub valid: bool,
	/// Nominal expiry instant of the snapshot, if any.
	#[serde(with = "time::serde::rfc3339::option")]
	pub expires_at: Option<OffsetDateTime>,
	/// Whole seconds until expiry; zero when absent or already expired.
	pub seconds_remaining: u64,
}
