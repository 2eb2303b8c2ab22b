// std
use std::sync::atomic::{AtomicU64, Ordering};

// self
use super::GenerationTier;

/// Thread-safe counters for the generation cascade.
///
/// The counters make tier ordering observable without a metrics backend: tests assert
/// that the simple tier is attempted exactly once before the workspace-qualified tier,
/// and that exhausted cascades land on the direct-identity fallback.
#[derive(Debug, Default)]
pub struct CascadeMetrics {
	simple_attempts: AtomicU64,
	simple_successes: AtomicU64,
	qualified_attempts: AtomicU64,
	qualified_successes: AtomicU64,
	direct_fallbacks: AtomicU64,
}
impl CascadeMetrics {
	/// Returns the number of simple-tier generation attempts.
	pub fn simple_attempts(&self) -> u64 {
		self.simple_attempts.load(Ordering::Relaxed)
	}

	/// Returns the number of simple-tier successes.
	pub fn simple_successes(&self) -> u64 {
		self.simple_successes.load(Ordering::Relaxed)
	}

	/// Returns the number of workspace-qualified generation attempts.
	pub fn qualified_attempts(&self) -> u64 {
		self.qualified_attempts.load(Ordering::Relaxed)
	}

	/// Returns the number of workspace-qualified successes.
	pub fn qualified_successes(&self) -> u64 {
		self.qualified_successes.load(Ordering::Relaxed)
	}

	/// Returns the number of cascades that exhausted into the direct-identity fallback.
	pub fn direct_fallbacks(&self) -> u64 {
		self.direct_fallbacks.load(Ordering::Relaxed)
	}

	pub(super) fn record_attempt(&self, tier: GenerationTier) {
		match tier {
			GenerationTier::Simple => self.simple_attempts.fetch_add(1, Ordering::Relaxed),
			GenerationTier::WorkspaceQualified =>
				self.qualified_attempts.fetch_add(1, Ordering::Relaxed),
		};
	}

	pub(super) fn record_success(&self, tier: GenerationTier) {
		match tier {
			GenerationTier::Simple => self.simple_successes.fetch_add(1, Ordering::Relaxed),
			GenerationTier::WorkspaceQualified =>
				self.qualified_successes.fetch_add(1, Ordering::Relaxed),
		};
	}

	pub(super) fn record_direct_fallback(&self) {
		self.direct_fallbacks.fetch_add(1, Ordering::Relaxed);
	}
}
