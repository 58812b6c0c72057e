use crate::input::CanonicalSet;
use crate::metrics::AggregatedMetrics;

/// What a rendering layer sees: either data and metrics, or an error message.
#[derive(Debug, Clone, PartialEq)]
pub struct BindingState {
    pub is_validating: bool,
    pub validated: Option<CanonicalSet>,
    pub metrics: Option<AggregatedMetrics>,
    pub error: Option<String>,
    pub is_valid: bool,
}

impl BindingState {
    /// The state before any input has been supplied.
    #[must_use]
    pub const fn pending() -> Self {
        Self {
            is_validating: true,
            validated: None,
            metrics: None,
            error: None,
            is_valid: false,
        }
    }

    #[must_use]
    pub const fn succeeded(validated: CanonicalSet, metrics: AggregatedMetrics) -> Self {
        Self {
            is_validating: false,
            validated: Some(validated),
            metrics: Some(metrics),
            error: None,
            is_valid: true,
        }
    }

    #[must_use]
    pub const fn failed(error: String) -> Self {
        Self {
            is_validating: false,
            validated: None,
            metrics: None,
            error: Some(error),
            is_valid: false,
        }
    }
}

impl Default for BindingState {
    fn default() -> Self {
        Self::pending()
    }
}
