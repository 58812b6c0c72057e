//! Summary statistics over normalized metric input
//!
//! This module reduces a [`CanonicalSet`](crate::input::CanonicalSet) to a
//! handful of numbers that a dashboard can show at a glance.
//!
//! # Implementation Model
//!
//! The [`Aggregator`] extracts the flat value sequence of a canonical set and
//! computes an [`AggregatedMetrics`] in a single call:
//!
//! - **average** and **median** of all values
//! - **trend**: the mean of the second half compared against the mean of the
//!   first half, split at `floor(n / 2)`, with a relative tolerance band that
//!   yields [`Trend::Neutral`]
//! - **confidence**: `1 - stddev / mean` using the population variance,
//!   clamped to `[0, 1]`
//!
//! Aggregation is pure and deterministic; the same input always yields
//! bit-identical output. Empty input is rejected rather than producing `NaN`.

mod aggregated_metrics;
mod aggregator;
mod stats;

pub use aggregated_metrics::{AggregatedMetrics, Trend};
pub use aggregator::{Aggregator, DEFAULT_TREND_TOLERANCE, aggregate, aggregate_values};

pub(crate) const LOG_TARGET: &str = "   metrics";
