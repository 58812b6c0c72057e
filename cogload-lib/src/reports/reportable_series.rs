use crate::input::{CanonicalSet, MetricType, ScalePolicy};
use crate::metrics::AggregatedMetrics;
use compact_str::CompactString;

/// A validated series with its summary, ready for reporting.
#[derive(Debug, Clone)]
pub struct ReportableSeries {
    /// Where the series came from, typically a file path or `<stdin>`
    pub source: CompactString,
    pub data: CanonicalSet,
    pub metrics: AggregatedMetrics,
    /// Bounds the subjective ratings were validated against
    pub scale: ScalePolicy,
    pub low_confidence: bool,
}

impl ReportableSeries {
    #[must_use]
    pub fn new(source: impl Into<CompactString>, data: CanonicalSet, metrics: AggregatedMetrics, scale: ScalePolicy, low_confidence: bool) -> Self {
        Self {
            source: source.into(),
            data,
            metrics,
            scale,
            low_confidence,
        }
    }

    #[must_use]
    pub const fn metric_type(&self) -> MetricType {
        self.data.metric_type()
    }
}
