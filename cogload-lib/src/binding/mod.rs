//! Recompute-on-change binding between raw input and a rendering layer
//!
//! A [`MetricsBinding`] owns the latest outcome of running the validation and
//! aggregation [`Pipeline`] over its input and publishes it as a
//! [`BindingState`]. Callers push new input with [`MetricsBinding::set`];
//! renderers either read [`MetricsBinding::state`] or register a listener with
//! [`MetricsBinding::subscribe`].
//!
//! Recomputation happens only when the input or the metric type actually
//! changes. On failure the state carries a human-readable message and no data,
//! so a renderer never shows stale numbers next to an error.

mod binding_state;
mod metrics_binding;
mod pipeline;

pub use binding_state::BindingState;
pub use metrics_binding::{MetricsBinding, NO_INPUT_MESSAGE, SubscriptionId};
pub use pipeline::Pipeline;

pub(crate) const LOG_TARGET: &str = "   binding";
