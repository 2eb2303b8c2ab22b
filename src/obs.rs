//! Optional observability helpers for broker flows.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `embed_broker.flow` with the `flow`
//!   (operation family) and `stage` (call site) fields, plus warning events for cascade
//!   fallthroughs and cross-workspace dataset bindings.
//! - Enable `metrics` to increment the `embed_broker_flow_total` counter for every
//!   attempt/success/failure, labeled by `flow` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Broker operation families observed by the instrumentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowKind {
	/// Identity token acquisition via client credentials.
	Identity,
	/// Report metadata resolution.
	ReportMetadata,
	/// Cascading embed token generation.
	EmbedGeneration,
	/// Workspace and report listings.
	Catalog,
}
impl FlowKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowKind::Identity => "identity",
			FlowKind::ReportMetadata => "report_metadata",
			FlowKind::EmbedGeneration => "embed_generation",
			FlowKind::Catalog => "catalog",
		}
	}
}
impl Display for FlowKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowOutcome {
	/// Entry to a broker operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl FlowOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowOutcome::Attempt => "attempt",
			FlowOutcome::Success => "success",
			FlowOutcome::Failure => "failure",
		}
	}
}
impl Display for FlowOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
