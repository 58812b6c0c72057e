//! End-to-end properties of the normalize, aggregate and bind pipeline, driven
//! through the public library API.

use cogload_lib::binding::{MetricsBinding, NO_INPUT_MESSAGE, Pipeline};
use cogload_lib::input::{CanonicalSet, Normalizer, ScalePolicy, normalize};
use cogload_lib::metrics::{Aggregator, Trend, aggregate};
use cogload_lib::{ErrorKind, MetricsError};
use serde_json::json;

fn assert_close(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < 1e-4, "expected {expected}, got {actual}");
}

#[test]
fn test_in_range_ratings_keep_their_keys() {
    let set = normalize(&json!({"focus": 1, "clarity": "2.5", "effort": 5}), "subjective").expect("valid ratings");
    let CanonicalSet::Subjective(ratings) = set else {
        unreachable!("subjective input yields a subjective set");
    };
    assert_eq!(ratings.names().collect::<Vec<_>>(), ["focus", "clarity", "effort"]);
    assert_close(ratings.get("clarity").expect("clarity"), 2.5);
}

#[test]
fn test_any_bad_rating_fails_the_whole_set() {
    for bad in [json!(0), json!(6), json!("high"), json!([]), json!(f64::MAX)] {
        let err = normalize(&json!({"ok": 3, "bad": bad}), "subjective").expect_err("out of range rating");
        assert_eq!(err, MetricsError::InvalidValue { key: "bad".into() });
    }
}

#[test]
fn test_progress_requires_array() {
    let err = normalize(&json!({"timestamp": 1, "value": 2}), "progress").expect_err("object is not a series");
    assert_eq!(err.kind(), ErrorKind::InvalidFormat);
}

#[test]
fn test_progress_missing_fields_report_index() {
    let raw = json!([
        {"timestamp": "2024-01-01", "value": 1},
        {"timestamp": "2024-01-02"},
    ]);
    assert_eq!(normalize(&raw, "progress").expect_err("missing value"), MetricsError::IncompleteRecord { index: 1 });
}

#[test]
fn test_progress_sorted_and_stable() {
    let raw = json!([
        {"timestamp": 3000, "value": 3},
        {"timestamp": 1000, "value": 1, "label": "first"},
        {"timestamp": 2000, "value": 2},
        {"timestamp": 1000, "value": 9, "label": "second"},
    ]);
    let CanonicalSet::Progress(series) = normalize(&raw, "progress").expect("valid series") else {
        unreachable!("progress input yields a progress series");
    };
    let labels: Vec<_> = series.points().iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, ["first", "second", "Point 3", "Point 1"]);
}

#[test]
fn test_documented_scenarios() {
    let metrics = aggregate(&normalize(&json!({"a": 1, "b": 3, "c": 5}), "subjective").expect("scenario 1")).expect("metrics");
    assert_close(metrics.average, 3.0);
    assert_close(metrics.median, 3.0);
    assert_close(metrics.std_dev, 1.633);
    assert_close(metrics.confidence, 0.4557);
    assert_eq!(metrics.trend, Trend::Positive);

    let err = normalize(&json!({"a": 0, "b": 2}), "subjective").expect_err("scenario 2");
    assert_eq!(err, MetricsError::InvalidValue { key: "a".into() });

    let raw = json!([{"timestamp": "2024-01-01", "value": 10}, {"timestamp": "2024-01-02", "value": 20}]);
    let metrics = aggregate(&normalize(&raw, "progress").expect("scenario 3")).expect("metrics");
    assert_close(metrics.average, 15.0);
    assert_close(metrics.median, 15.0);
    assert_eq!(metrics.trend, Trend::Positive);

    let empty = normalize(&json!({}), "subjective").expect("scenario 4 normalizes");
    assert_eq!(aggregate(&empty).expect_err("scenario 4"), MetricsError::EmptyInput);
}

#[test]
fn test_unsupported_metric_type() {
    let err = normalize(&json!({"a": 1}), "Subjective").expect_err("type names are case sensitive");
    assert_eq!(err, MetricsError::UnsupportedMetricType { metric_type: "Subjective".into() });
}

#[test]
fn test_binding_with_configured_pipeline() {
    let pipeline = Pipeline::new(Normalizer::new(ScalePolicy::new(0.0, 10.0)), Aggregator::new(0.2));
    let mut binding = MetricsBinding::new(pipeline);

    let state = binding.set(Some(&json!({"a": 8, "b": 9})), "subjective");
    assert!(state.is_valid);
    assert_eq!(state.metrics.expect("metrics").trend, Trend::Neutral);

    let state = binding.set(None, "subjective");
    assert!(!state.is_valid);
    assert_eq!(state.error.as_deref(), Some(NO_INPUT_MESSAGE));
    assert!(state.metrics.is_none());
}
