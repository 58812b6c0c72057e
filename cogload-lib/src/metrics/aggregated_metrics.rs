use serde::Serialize;
use strum::{Display, EnumIter};

/// Coarse direction of a series, comparing its second half against its first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Positive,
    Negative,
    Neutral,
}

impl Trend {
    /// A single-character arrow for compact displays.
    #[must_use]
    pub const fn arrow(self) -> &'static str {
        match self {
            Self::Positive => "↑",
            Self::Negative => "↓",
            Self::Neutral => "→",
        }
    }
}

/// Summary of a canonical set. Always recomputed as a whole, never patched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AggregatedMetrics {
    pub count: usize,
    pub average: f64,
    pub median: f64,
    pub trend: Trend,
    pub confidence: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}
