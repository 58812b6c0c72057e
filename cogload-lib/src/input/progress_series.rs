use super::{LOG_TARGET, to_number, to_timestamp};
use crate::MetricsError;
use chrono::{DateTime, Utc};
use compact_str::{CompactString, ToCompactString, format_compact};
use serde::Serialize;
use serde_json::Value;

/// A single timestamped observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
    pub label: CompactString,
}

/// Validated progress observations, ordered by timestamp.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct ProgressSeries {
    points: Vec<ProgressPoint>,
}

impl ProgressSeries {
    #[must_use]
    pub const fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn points(&self) -> &[ProgressPoint] {
        &self.points
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.value)
    }
}

/// Validate an array of progress records.
///
/// Each record needs a `timestamp` and a `value`; `label` is optional and defaults
/// to `Point N` using the record's 1-based position in the input. The result is
/// sorted by timestamp, keeping the input order of records with equal timestamps.
pub fn validate_progress(raw: &Value) -> Result<ProgressSeries, MetricsError> {
    let Value::Array(records) = raw else {
        return Err(MetricsError::InvalidFormat {
            expected: "an array of progress records",
        });
    };

    let mut points = records
        .iter()
        .enumerate()
        .map(|(index, record)| parse_record(index, record))
        .collect::<Result<Vec<_>, _>>()?;

    points.sort_by_key(|p| p.timestamp);

    Ok(ProgressSeries { points })
}

fn parse_record(index: usize, record: &Value) -> Result<ProgressPoint, MetricsError> {
    let (Some(raw_timestamp), Some(raw_value)) = (field(record, "timestamp"), field(record, "value")) else {
        return Err(MetricsError::IncompleteRecord { index });
    };

    let timestamp = to_timestamp(raw_timestamp).ok_or(MetricsError::InvalidTimestamp { index })?;

    let value = to_number(raw_value);
    if !value.is_finite() {
        log::trace!(target: LOG_TARGET, "Record {index} has non-numeric value {raw_value}");
        return Err(MetricsError::NonNumericValue { index });
    }

    let label = field(record, "label")
        .and_then(label_text)
        .unwrap_or_else(|| format_compact!("Point {}", index + 1));

    Ok(ProgressPoint { timestamp, value, label })
}

/// A present, non-null field of a record object.
fn field<'a>(record: &'a Value, name: &str) -> Option<&'a Value> {
    record.as_object()?.get(name).filter(|v| !v.is_null())
}

fn label_text(value: &Value) -> Option<CompactString> {
    match value {
        Value::String(s) if !s.is_empty() => Some(CompactString::from(s.as_str())),
        Value::Number(n) => Some(n.to_compact_string()),
        Value::Bool(true) => Some(CompactString::const_new("true")),
        _ => None,
    }
}
