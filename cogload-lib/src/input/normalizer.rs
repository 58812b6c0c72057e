use super::{CanonicalSet, LOG_TARGET, MetricType, RawMetricInput, ScalePolicy, validate_progress, validate_subjective};
use crate::MetricsError;
use compact_str::CompactString;
use serde_json::Value;

/// Dispatches raw input to the validator for its metric type.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    policy: ScalePolicy,
}

impl Normalizer {
    #[must_use]
    pub const fn new(policy: ScalePolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub const fn policy(&self) -> &ScalePolicy {
        &self.policy
    }

    /// Normalize `raw` according to a metric type given by name.
    pub fn normalize(&self, raw: &Value, metric_type: &str) -> Result<CanonicalSet, MetricsError> {
        let Some(metric_type) = MetricType::from_name(metric_type) else {
            return Err(MetricsError::UnsupportedMetricType {
                metric_type: CompactString::from(metric_type),
            });
        };

        self.normalize_as(raw, metric_type)
    }

    /// Normalize `raw` according to an already-resolved metric type.
    pub fn normalize_as(&self, raw: &Value, metric_type: MetricType) -> Result<CanonicalSet, MetricsError> {
        let set: CanonicalSet = match metric_type {
            MetricType::Subjective => validate_subjective(raw, &self.policy)?.into(),
            MetricType::Progress => validate_progress(raw)?.into(),
        };

        log::debug!(target: LOG_TARGET, "Normalized {} {metric_type} value(s)", set.len());
        Ok(set)
    }

    /// Normalize a `{kind, payload}` envelope.
    pub fn normalize_input(&self, input: &RawMetricInput) -> Result<CanonicalSet, MetricsError> {
        self.normalize(&input.payload, &input.kind)
    }
}

/// Normalize `raw` with the default `[1, 5]` rating scale.
pub fn normalize(raw: &Value, metric_type: &str) -> Result<CanonicalSet, MetricsError> {
    Normalizer::default().normalize(raw, metric_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dispatches_subjective() {
        let set = normalize(&json!({"a": 1, "b": 3, "c": 5}), "subjective").unwrap();
        assert_eq!(set.metric_type(), MetricType::Subjective);
        assert_eq!(set.values(), vec![1.0, 3.0, 5.0]);
    }

    #[test]
    fn test_dispatches_progress() {
        let set = normalize(
            &json!([
                {"timestamp": "2024-01-01", "value": 10},
                {"timestamp": "2024-01-02", "value": 20},
            ]),
            "progress",
        )
        .unwrap();
        assert_eq!(set.metric_type(), MetricType::Progress);
        assert_eq!(set.values(), vec![10.0, 20.0]);
    }

    #[test]
    fn test_unsupported_metric_type() {
        let err = normalize(&json!({}), "objective").unwrap_err();
        assert_eq!(
            err,
            MetricsError::UnsupportedMetricType {
                metric_type: "objective".into()
            }
        );
    }

    #[test]
    fn test_progress_payload_given_as_subjective() {
        let err = normalize(&json!([{"timestamp": 1, "value": 1}]), "subjective").unwrap_err();
        assert!(matches!(err, MetricsError::InvalidFormat { .. }));
    }

    #[test]
    fn test_normalize_input_envelope() {
        let input = RawMetricInput::new("subjective", json!({"focus": "4"}));
        let set = Normalizer::default().normalize_input(&input).unwrap();
        assert_eq!(set.values(), vec![4.0]);
    }

    #[test]
    fn test_configured_policy_is_applied() {
        let normalizer = Normalizer::new(ScalePolicy::new(1.0, 7.0));
        assert!(normalizer.normalize(&json!({"a": 7}), "subjective").is_ok());
        assert!(normalize(&json!({"a": 7}), "subjective").is_err());
    }

    #[test]
    fn test_is_pure() {
        let raw = json!({"a": 2, "b": 4});
        let first = normalize(&raw, "subjective").unwrap();
        let second = normalize(&raw, "subjective").unwrap();
        assert_eq!(first, second);
        assert_eq!(raw, json!({"a": 2, "b": 4}));
    }
}
