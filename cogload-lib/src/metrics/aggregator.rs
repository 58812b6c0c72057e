use super::stats::{mean, median, min_max, population_std_dev};
use super::{AggregatedMetrics, LOG_TARGET, Trend};
use crate::MetricsError;
use crate::input::CanonicalSet;

/// Relative difference between half-means below which a trend is neutral.
pub const DEFAULT_TREND_TOLERANCE: f64 = 0.05;

/// Computes [`AggregatedMetrics`] with a configurable trend tolerance.
#[derive(Debug, Clone, Copy)]
pub struct Aggregator {
    trend_tolerance: f64,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(DEFAULT_TREND_TOLERANCE)
    }
}

impl Aggregator {
    #[must_use]
    pub const fn new(trend_tolerance: f64) -> Self {
        Self { trend_tolerance }
    }

    #[must_use]
    pub const fn trend_tolerance(&self) -> f64 {
        self.trend_tolerance
    }

    /// Summarize the values of a canonical set.
    pub fn aggregate(&self, set: &CanonicalSet) -> Result<AggregatedMetrics, MetricsError> {
        self.aggregate_values(&set.values())
    }

    /// Summarize a flat value sequence, in the order given.
    pub fn aggregate_values(&self, values: &[f64]) -> Result<AggregatedMetrics, MetricsError> {
        if values.is_empty() {
            return Err(MetricsError::EmptyInput);
        }

        let average = mean(values);
        let std_dev = population_std_dev(values, average);
        let (min, max) = min_max(values);

        let metrics = AggregatedMetrics {
            count: values.len(),
            average,
            median: median(values),
            trend: self.trend(values),
            confidence: confidence(average, std_dev),
            std_dev,
            min,
            max,
        };

        log::debug!(
            target: LOG_TARGET,
            "Aggregated {} value(s): average {:.3}, trend {}, confidence {:.3}",
            metrics.count,
            metrics.average,
            metrics.trend,
            metrics.confidence
        );

        Ok(metrics)
    }

    /// Compare the mean of `[k, n)` against the mean of `[0, k)` where `k = floor(n / 2)`.
    ///
    /// For odd `n` the middle element belongs to the second half only.
    fn trend(&self, values: &[f64]) -> Trend {
        if values.len() < 2 {
            return Trend::Neutral;
        }

        let (first, second) = values.split_at(values.len() / 2);
        let first_mean = mean(first);
        let second_mean = mean(second);

        if second_mean > first_mean * (1.0 + self.trend_tolerance) {
            Trend::Positive
        } else if second_mean < first_mean * (1.0 - self.trend_tolerance) {
            Trend::Negative
        } else {
            Trend::Neutral
        }
    }
}

/// `1 - stddev / mean`, clamped to `[0, 1]`; zero when the mean is zero or the ratio is not finite.
#[expect(clippy::float_cmp, reason = "only an exact zero mean is undefined")]
fn confidence(average: f64, std_dev: f64) -> f64 {
    if average == 0.0 {
        return 0.0;
    }

    let ratio = std_dev / average;
    if !ratio.is_finite() {
        return 0.0;
    }

    (1.0 - ratio).clamp(0.0, 1.0)
}

/// Summarize a canonical set with the default trend tolerance.
pub fn aggregate(set: &CanonicalSet) -> Result<AggregatedMetrics, MetricsError> {
    Aggregator::default().aggregate(set)
}

/// Summarize a flat value sequence with the default trend tolerance.
pub fn aggregate_values(values: &[f64]) -> Result<AggregatedMetrics, MetricsError> {
    Aggregator::default().aggregate_values(values)
}
