//! Elementary statistics over non-empty slices.

/// Arithmetic mean. Stays finite for finite input even when the plain sum would overflow.
#[expect(clippy::cast_precision_loss, reason = "series are far shorter than 2^52 elements")]
pub fn mean(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let sum = values.iter().sum::<f64>();
    if sum.is_finite() {
        sum / n
    } else {
        values.iter().map(|v| v / n).sum()
    }
}

pub fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        f64::midpoint(sorted[mid - 1], sorted[mid])
    } else {
        sorted[mid]
    }
}

/// Variance dividing by `n`, not `n - 1`.
#[expect(clippy::cast_precision_loss, reason = "series are far shorter than 2^52 elements")]
pub fn population_variance(values: &[f64], mean: f64) -> f64 {
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64
}

/// Square root of the population variance, scaled by the largest deviation so
/// squaring cannot overflow for finite input.
pub fn population_std_dev(values: &[f64], mean: f64) -> f64 {
    let variance = population_variance(values, mean);
    if variance.is_finite() {
        return variance.sqrt();
    }

    let scale = values.iter().map(|v| (v - mean).abs()).fold(0.0, f64::max);
    if !scale.is_finite() || scale <= 0.0 {
        return scale;
    }

    let scaled: Vec<f64> = values.iter().map(|v| (v - mean) / scale).collect();
    scale * population_variance(&scaled, 0.0).sqrt()
}

pub fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
}
