//! High-level broker operations over the authority and analytics REST surface.

pub mod catalog;
pub mod embed;
pub mod report;

mod identity;

pub use catalog::*;
pub use embed::*;
pub use report::*;

// self
use crate::{
	_prelude::*,
	auth::ServicePrincipal,
	cache::{CacheStatus, TokenStatusTracker},
	http::ReqwestHttpClient,
	provider::ProviderEndpoints,
};

/// Brokers embed credentials for a single service principal.
///
/// The broker owns the HTTP client, endpoint descriptor, principal credentials, and the
/// informational token tracker so individual operations can focus on protocol sequencing.
/// Every operation is a linear sequence of blocking network calls; independent operations
/// may run concurrently and share nothing mutable beyond the tracker snapshot.
#[derive(Clone)]
pub struct Broker {
	/// HTTP client wrapper used for every outbound request.
	pub http_client: ReqwestHttpClient,
	/// Authority + API endpoint descriptor.
	pub endpoints: ProviderEndpoints,
	/// Service-principal credentials used for every token exchange.
	pub principal: ServicePrincipal,
	/// Informational tracker recording the latest identity token.
	pub tracker: Arc<TokenStatusTracker>,
	/// Per-tier counters for the embed generation cascade.
	pub cascade_metrics: Arc<embed::CascadeMetrics>,
}
impl Broker {
	/// Creates a broker against the default public-cloud endpoints.
	pub fn new(principal: ServicePrincipal) -> Self {
		Self::with_http_client(principal, ProviderEndpoints::default(), ReqwestHttpClient::default())
	}

	/// Creates a broker that reuses the caller-provided endpoints and transport.
	pub fn with_http_client(
		principal: ServicePrincipal,
		endpoints: ProviderEndpoints,
		http_client: ReqwestHttpClient,
	) -> Self {
		Self {
			http_client,
			endpoints,
			principal,
			tracker: Default::default(),
			cascade_metrics: Default::default(),
		}
	}

	/// Replaces the token tracker, e.g. to share one across brokers in tests.
	pub fn with_tracker(mut self, tracker: Arc<TokenStatusTracker>) -> Self {
		self.tracker = tracker;

		self
	}

	/// Reports the informational status of the latest identity token snapshot.
	///
	/// The status never influences token acquisition; see [`crate::cache`].
	pub fn cache_status(&self) -> CacheStatus {
		self.tracker.status()
	}

	/// Discards the tracked snapshot. Subsequent acquisitions are unaffected.
	pub fn clear_cache(&self) {
		self.tracker.clear();
	}
}
impl Debug for Broker {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Broker")
			.field("endpoints", &self.endpoints)
			.field("principal", &self.principal)
			.finish()
	}
}
