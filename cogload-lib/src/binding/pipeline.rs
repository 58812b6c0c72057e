use crate::MetricsError;
use crate::input::{CanonicalSet, Normalizer};
use crate::metrics::{AggregatedMetrics, Aggregator};
use serde_json::Value;

/// Normalization followed by aggregation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pipeline {
    normalizer: Normalizer,
    aggregator: Aggregator,
}

impl Pipeline {
    #[must_use]
    pub const fn new(normalizer: Normalizer, aggregator: Aggregator) -> Self {
        Self { normalizer, aggregator }
    }

    pub fn run(&self, raw: &Value, metric_type: &str) -> Result<(CanonicalSet, AggregatedMetrics), MetricsError> {
        let validated = self.normalizer.normalize(raw, metric_type)?;
        let metrics = self.aggregator.aggregate(&validated)?;
        Ok((validated, metrics))
    }
}
