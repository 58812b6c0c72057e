//! Lenient conversions from JSON values into numbers and instants.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

/// Date-time layouts accepted when a timestamp is not RFC 3339. Interpreted as UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Coerce a JSON value to a number the way JavaScript's `Number()` does.
///
/// Returns `NaN` for values that have no numeric interpretation.
#[must_use]
pub fn to_number(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => parse_numeric_str(s),
        Value::Array(_) | Value::Object(_) => f64::NAN,
    }
}

/// Interpret a JSON value as an instant.
///
/// Strings may be RFC 3339, a date-time without offset, or a plain date.
/// Numbers are milliseconds since the Unix epoch.
#[must_use]
pub fn to_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_timestamp_str(s.trim()),
        Value::Number(n) => {
            #[expect(clippy::cast_possible_truncation, reason = "fractional milliseconds are dropped")]
            let millis = n.as_i64().or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))?;
            DateTime::from_timestamp_millis(millis)
        }
        _ => None,
    }
}

fn parse_numeric_str(s: &str) -> f64 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    if let Some(value) = parse_radix_literal(trimmed) {
        return value;
    }

    // Rust's float parser also accepts "inf" and "nan", which Number() does not
    if trimmed.bytes().all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-')) {
        trimmed.parse::<f64>().unwrap_or(f64::NAN)
    } else {
        f64::NAN
    }
}

fn parse_radix_literal(s: &str) -> Option<f64> {
    let (radix, digits) = if let Some(digits) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        (16, digits)
    } else if let Some(digits) = s.strip_prefix("0o").or_else(|| s.strip_prefix("0O")) {
        (8, digits)
    } else if let Some(digits) = s.strip_prefix("0b").or_else(|| s.strip_prefix("0B")) {
        (2, digits)
    } else {
        return None;
    };

    if digits.is_empty() {
        return Some(f64::NAN);
    }

    // accumulate in f64 so literals wider than 64 bits round instead of failing
    let value = digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix).map(|d| acc.mul_add(f64::from(radix), f64::from(d)))
    });
    Some(value.unwrap_or(f64::NAN))
}

fn parse_timestamp_str(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_to_number_plain_numbers() {
        assert!((to_number(&json!(3)) - 3.0).abs() < f64::EPSILON);
        assert!((to_number(&json!(2.5)) - 2.5).abs() < f64::EPSILON);
        assert!((to_number(&json!(-4)) + 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_to_number_strings() {
        assert!((to_number(&json!("4")) - 4.0).abs() < f64::EPSILON);
        assert!((to_number(&json!("  3.5 ")) - 3.5).abs() < f64::EPSILON);
        assert!((to_number(&json!("1e2")) - 100.0).abs() < f64::EPSILON);
        assert!((to_number(&json!("0x1A")) - 26.0).abs() < f64::EPSILON);
        assert!((to_number(&json!("0b101")) - 5.0).abs() < f64::EPSILON);
        assert!((to_number(&json!("")) - 0.0).abs() < f64::EPSILON);
        assert!((to_number(&json!("   ")) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_to_number_rejects_garbage() {
        assert!(to_number(&json!("abc")).is_nan());
        assert!(to_number(&json!("3 stars")).is_nan());
        assert!(to_number(&json!("1.2.3")).is_nan());
        assert!(to_number(&json!("inf")).is_nan());
        assert!(to_number(&json!("NaN")).is_nan());
        assert!(to_number(&json!("0x")).is_nan());
        assert!(to_number(&json!([1])).is_nan());
        assert!(to_number(&json!({"a": 1})).is_nan());
    }

    #[test]
    fn test_to_number_wide_radix_literals() {
        let wide = to_number(&json!("0x1FFFFFFFFFFFFFFFFF"));
        assert!(wide.is_finite());
        assert!((wide - 2.0_f64.powi(69)).abs() / 2.0_f64.powi(69) < 1e-12);

        assert!((to_number(&json!("0o777")) - 511.0).abs() < f64::EPSILON);
        assert!((to_number(&json!("0XfF")) - 255.0).abs() < f64::EPSILON);
        assert!(to_number(&json!("0x1G")).is_nan());
        assert!(to_number(&json!("0b102")).is_nan());
    }

    #[test]
    fn test_to_number_infinity_literals() {
        assert!(to_number(&json!("Infinity")).is_infinite());
        assert!(to_number(&json!("-Infinity")).is_sign_negative());
    }

    #[test]
    fn test_to_number_null_and_booleans() {
        assert!((to_number(&Value::Null) - 0.0).abs() < f64::EPSILON);
        assert!((to_number(&json!(true)) - 1.0).abs() < f64::EPSILON);
        assert!((to_number(&json!(false)) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_to_timestamp_plain_date() {
        let ts = to_timestamp(&json!("2024-01-02")).unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_to_timestamp_rfc3339_with_offset() {
        let ts = to_timestamp(&json!("2024-01-02T10:00:00+02:00")).unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 1, 2, 8, 0, 0).unwrap());
    }

    #[test]
    fn test_to_timestamp_naive_datetime() {
        let ts = to_timestamp(&json!("2024-03-04T05:06:07")).unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 3, 4, 5, 6, 7).unwrap());

        let ts = to_timestamp(&json!("2024-03-04 05:06:07.250")).unwrap();
        assert_eq!(ts.timestamp_millis() % 1000, 250);
    }

    #[test]
    fn test_to_timestamp_epoch_millis() {
        let ts = to_timestamp(&json!(86_400_000)).unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(1970, 1, 2, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_to_timestamp_invalid() {
        assert!(to_timestamp(&json!("yesterday")).is_none());
        assert!(to_timestamp(&json!("2024-13-01")).is_none());
        assert!(to_timestamp(&json!(true)).is_none());
        assert!(to_timestamp(&json!({"date": "2024-01-01"})).is_none());
    }
}
