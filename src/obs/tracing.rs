// self
use crate::{_prelude::*, auth::WorkspaceId, obs::FlowKind};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedFlow<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedFlow<F> = F;

/// A span builder used by broker flows.
#[derive(Clone, Debug)]
pub struct FlowSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl FlowSpan {
	/// Creates a new span tagged with the provided flow kind + stage.
	pub fn new(kind: FlowKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("embed_broker.flow", flow = kind.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedFlow<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Warns that a report's dataset lives outside the requested workspace.
///
/// The condition is not an error; it only changes which workspace must be named during
/// token generation.
pub(crate) fn note_cross_workspace(requested: &WorkspaceId, dataset: &WorkspaceId) {
	#[cfg(feature = "tracing")]
	tracing::warn!(
		requested_workspace = %requested,
		dataset_workspace = %dataset,
		"dataset is bound to a different workspace",
	);
	#[cfg(not(feature = "tracing"))]
	let _ = (requested, dataset);
}

/// Warns that a generation tier failed and the cascade is falling through.
pub(crate) fn note_tier_fallthrough(tier: &'static str, error: &Error) {
	#[cfg(feature = "tracing")]
	tracing::warn!(tier, error = %error, "embed token generation tier failed; falling through");
	#[cfg(not(feature = "tracing"))]
	let _ = (tier, error);
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn flow_span_noop_without_tracing() {
		let span = FlowSpan::new(FlowKind::Identity, "test");
		let _ = &span;
	}

	#[cfg(feature = "tracing")]
	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = FlowSpan::new(FlowKind::Catalog, "instrument_wraps_future");
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}
}
