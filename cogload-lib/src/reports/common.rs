//! Common utilities shared across report generators.

use crate::input::ScalePolicy;
use crate::metrics::Trend;
use chrono::{DateTime, Utc};

/// Most points drawn for a subjective rating, whatever the width of the scale.
const MAX_SCALE_POINTS: u32 = 10;

/// Width in cells of the confidence bar.
pub const CONFIDENCE_BAR_WIDTH: u32 = 20;

/// Format a statistic or rating with two decimals.
pub fn format_value(value: f64) -> String {
    format!("{value:.2}")
}

/// Format a confidence in `[0, 1]` as a whole percentage.
pub fn format_percent(confidence: f64) -> String {
    format!("{:.0}%", confidence * 100.0)
}

/// Dates are shown without a time of day.
pub fn format_date(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d").to_string()
}

/// Arrow followed by the trend name, e.g. `↑ positive`.
pub fn format_trend(trend: Trend) -> String {
    format!("{} {trend}", trend.arrow())
}

pub const fn format_confidence_status(low_confidence: bool) -> &'static str {
    if low_confidence { "LOW CONFIDENCE" } else { "OK" }
}

/// Render a confidence in `[0, 1]` as a bar of `width` cells.
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss, reason = "value is clamped to [0, width] before the cast")]
pub fn confidence_bar(confidence: f64, width: u32) -> String {
    let filled = (confidence.clamp(0.0, 1.0) * f64::from(width)).round() as u32;
    let mut bar = "█".repeat(filled as usize);
    bar.push_str(&"░".repeat((width - filled) as usize));
    bar
}

/// Render a rating as filled and empty points along its scale, e.g. `●●●○○` for 3 on 1..5.
///
/// Integral scales of up to ten steps get one point per step; anything else is
/// drawn with ten points.
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss, reason = "values are range checked before the cast")]
pub fn scale_points(value: f64, scale: &ScalePolicy) -> String {
    let span = scale.max - scale.min;
    let steps = if span.fract().abs() < f64::EPSILON && (1.0..f64::from(MAX_SCALE_POINTS)).contains(&span) {
        span as u32 + 1
    } else {
        MAX_SCALE_POINTS
    };

    let position = if span > 0.0 { ((value - scale.min) / span).clamp(0.0, 1.0) } else { 0.0 };
    let filled = (position * f64::from(steps - 1)).round() as u32 + 1;

    let mut points = "●".repeat(filled as usize);
    points.push_str(&"○".repeat((steps - filled) as usize));
    points
}
