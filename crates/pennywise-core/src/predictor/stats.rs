//! Small numeric helpers shared by the heuristics
//!
//! All of these return finite values for finite input; callers never have to
//! check for NaN.

/// Arithmetic mean; 0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    saturating_sum(values.iter().copied()) / values.len() as f64
}

/// Population standard deviation; 0 for an empty slice
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance =
        saturating_sum(values.iter().map(|v| saturate((v - m).powi(2)))) / values.len() as f64;
    variance.sqrt()
}

/// Standard deviation over mean. A zero mean counts as perfectly consistent.
pub fn coefficient_of_variation(values: &[f64]) -> f64 {
    let m = mean(values);
    if m.abs() < f64::EPSILON {
        return 0.0;
    }
    (std_dev(values) / m).abs()
}

/// `numerator / denominator`, or `fallback` when the denominator is zero
pub fn ratio_or(numerator: f64, denominator: f64, fallback: f64) -> f64 {
    if denominator == 0.0 {
        return fallback;
    }
    let value = numerator / denominator;
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

/// Clamp an overflowed sum or product to the largest finite value; NaN becomes 0
pub fn saturate(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(f64::MIN, f64::MAX)
    }
}

/// Sum that saturates instead of overflowing to infinity
pub fn saturating_sum<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    values.into_iter().fold(0.0, |acc, v| saturate(acc + v))
}
