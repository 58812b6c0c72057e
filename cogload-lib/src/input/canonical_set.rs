use super::{MetricType, ProgressSeries, SubjectiveScaleSet};
use serde::Serialize;

/// The output of normalization: one of the two trusted shapes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "lowercase")]
pub enum CanonicalSet {
    Subjective(SubjectiveScaleSet),
    Progress(ProgressSeries),
}

impl CanonicalSet {
    #[must_use]
    pub const fn metric_type(&self) -> MetricType {
        match self {
            Self::Subjective(_) => MetricType::Subjective,
            Self::Progress(_) => MetricType::Progress,
        }
    }

    /// The flat numeric sequence to summarize: ratings in input order, or
    /// observation values in timestamp order.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        match self {
            Self::Subjective(set) => set.values().collect(),
            Self::Progress(series) => series.values().collect(),
        }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        match self {
            Self::Subjective(set) => set.len(),
            Self::Progress(series) => series.len(),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<SubjectiveScaleSet> for CanonicalSet {
    fn from(set: SubjectiveScaleSet) -> Self {
        Self::Subjective(set)
    }
}

impl From<ProgressSeries> for CanonicalSet {
    fn from(series: ProgressSeries) -> Self {
        Self::Progress(series)
    }
}
