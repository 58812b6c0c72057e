use compact_str::CompactString;
use core::fmt::{Display, Formatter};
use strum::{Display as StrumDisplay, IntoStaticStr};

/// The broad category of a [`MetricsError`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, IntoStaticStr)]
pub enum ErrorKind {
    InvalidFormat,
    InvalidValue,
    IncompleteRecord,
    InvalidTimestamp,
    NonNumericValue,
    UnsupportedMetricType,
    EmptyInput,
}

/// Failures raised while validating or aggregating metric input.
///
/// Every variant is recoverable: the caller can resubmit corrected input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricsError {
    /// The top-level shape of the input does not match the metric type.
    InvalidFormat { expected: &'static str },

    /// A subjective rating is not a number or lies outside the scale.
    InvalidValue { key: CompactString },

    /// A progress record lacks its timestamp or its value.
    IncompleteRecord { index: usize },

    /// A progress record carries a timestamp that cannot be interpreted.
    InvalidTimestamp { index: usize },

    /// A progress record carries a value that does not coerce to a number.
    NonNumericValue { index: usize },

    /// The metric type discriminator is not recognized.
    UnsupportedMetricType { metric_type: CompactString },

    /// There are no values to summarize.
    EmptyInput,
}

impl MetricsError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidFormat { .. } => ErrorKind::InvalidFormat,
            Self::InvalidValue { .. } => ErrorKind::InvalidValue,
            Self::IncompleteRecord { .. } => ErrorKind::IncompleteRecord,
            Self::InvalidTimestamp { .. } => ErrorKind::InvalidTimestamp,
            Self::NonNumericValue { .. } => ErrorKind::NonNumericValue,
            Self::UnsupportedMetricType { .. } => ErrorKind::UnsupportedMetricType,
            Self::EmptyInput => ErrorKind::EmptyInput,
        }
    }
}

impl Display for MetricsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidFormat { expected } => write!(f, "invalid input format: expected {expected}"),
            Self::InvalidValue { key } => write!(f, "invalid value for metric '{key}': must be a number within the rating scale"),
            Self::IncompleteRecord { index } => write!(f, "incomplete record at index {index}: both 'timestamp' and 'value' are required"),
            Self::InvalidTimestamp { index } => write!(f, "record at index {index} has a timestamp that cannot be parsed"),
            Self::NonNumericValue { index } => write!(f, "record at index {index} has a value that is not a number"),
            Self::UnsupportedMetricType { metric_type } => write!(f, "unsupported metric type '{metric_type}'"),
            Self::EmptyInput => write!(f, "no values to summarize"),
        }
    }
}

impl core::error::Error for MetricsError {}
