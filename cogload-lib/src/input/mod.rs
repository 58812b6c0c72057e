//! Validation and normalization of raw metric input
//!
//! This module turns loosely-typed JSON, as produced by forms, mocked HTTP
//! responses or fixture files, into one of two canonical shapes that the rest
//! of the pipeline can trust.
//!
//! # Implementation Model
//!
//! Raw input arrives as a [`serde_json::Value`] plus a metric type
//! discriminator, optionally wrapped in a [`RawMetricInput`] envelope. The
//! [`Normalizer`] dispatches on the discriminator:
//!
//! - **subjective**: an object of named ratings becomes a [`SubjectiveScaleSet`].
//!   Values are coerced like JavaScript's `Number()` and must all fall within the
//!   configured [`ScalePolicy`]; a single bad rating rejects the whole set.
//! - **progress**: an array of `{timestamp, value, label?}` records becomes a
//!   [`ProgressSeries`] sorted by timestamp, with missing labels defaulted to
//!   `Point N`.
//!
//! Normalization is a pure function of its inputs. Failures are reported as
//! [`MetricsError`](crate::MetricsError) values naming the offending key or
//! record index.

mod canonical_set;
mod coerce;
mod metric_type;
mod normalizer;
mod progress_series;
mod raw_metric_input;
mod scale_policy;
mod subjective_scale_set;

pub use canonical_set::CanonicalSet;
pub use coerce::{to_number, to_timestamp};
pub use metric_type::MetricType;
pub use normalizer::{Normalizer, normalize};
pub use progress_series::{ProgressPoint, ProgressSeries, validate_progress};
pub use raw_metric_input::RawMetricInput;
pub use scale_policy::ScalePolicy;
pub use subjective_scale_set::{SubjectiveRating, SubjectiveScaleSet, validate_subjective};

pub(crate) const LOG_TARGET: &str = "     input";
