use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Untyped input paired with the discriminator that says how to read it.
///
/// `kind` is kept as free text so an unknown kind is reported as an unsupported
/// metric type rather than as a parse failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawMetricInput {
    pub kind: CompactString,
    pub payload: Value,
}

impl RawMetricInput {
    #[must_use]
    pub fn new(kind: impl Into<CompactString>, payload: Value) -> Self {
        Self {
            kind: kind.into(),
            payload,
        }
    }
}
