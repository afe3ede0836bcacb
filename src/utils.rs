//! Numeric helper functions shared across the crate

use std::f64::consts::PI;

/// Compute the dot product of two equal-length slices.
///
/// # Examples
///
/// ```
/// use tdlab::utils::dot;
///
/// assert_eq!(dot(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]), 32.0);
/// ```
pub fn dot(x: &[f64], y: &[f64]) -> f64 {
    debug_assert_eq!(x.len(), y.len(), "dot product of mismatched lengths");
    x.iter().zip(y).map(|(a, b)| a * b).sum()
}

/// Compute the sample mean of a slice.
///
/// Returns 0.0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Compute the sample variance of a slice (N−1 denominator).
///
/// Requires at least two values; callers validate their sample sizes up
/// front.
///
/// # Examples
///
/// ```
/// use tdlab::utils::sample_variance;
///
/// assert_eq!(sample_variance(&[1.0, 3.0]), 2.0);
/// assert_eq!(sample_variance(&[5.0, 5.0, 5.0]), 0.0);
/// ```
pub fn sample_variance(values: &[f64]) -> f64 {
    debug_assert!(values.len() >= 2, "sample variance needs at least 2 values");
    let mu = mean(values);
    let squared: f64 = values.iter().map(|v| (v - mu) * (v - mu)).sum();
    squared / (values.len() - 1) as f64
}

/// Floating-point modulo where the result carries the sign of the divisor.
///
/// Unlike `f64::rem_euclid` relative to `%`, this matches MATLAB's `mod`:
/// `floor_mod(-3.0, 4.0) == 1.0`. A zero divisor returns the dividend
/// unchanged. Boundary cases produced by floating-point cutoff are collapsed
/// to zero so the result always lies in `[0, y)` for positive `y`.
pub fn floor_mod(x: f64, y: f64) -> f64 {
    if y == 0.0 {
        return x;
    }
    let m = x - y * (x / y).floor();
    if y > 0.0 {
        if m >= y {
            return 0.0;
        }
        if m < 0.0 {
            return if y + m == y { 0.0 } else { y + m };
        }
    } else {
        if m <= y {
            return 0.0;
        }
        if m > 0.0 {
            return if y + m == y { 0.0 } else { y + m };
        }
    }
    m
}

/// Wrap an angle in radians to `[-PI, PI)`.
pub fn wrap_pos_neg_pi(theta: f64) -> f64 {
    floor_mod(theta + PI, 2.0 * PI) - PI
}

/// Wrap an angle in radians to `[0, 2*PI)`.
pub fn wrap_two_pi(theta: f64) -> f64 {
    floor_mod(theta, 2.0 * PI)
}

/// Sign of a double: 1.0, -1.0, or 0.0.
pub fn sign(x: f64) -> f64 {
    ((x > 0.0) as i32 - (x < 0.0) as i32) as f64
}

/// Normalize `x` from `[min_value, max_value]` to `[0, 1]`.
///
/// A zero-width range is a disallowed input (division by zero); every
/// environment's configured bounds must satisfy `min_value < max_value`.
/// Callers clamp `x` into range before normalizing.
pub fn normalize(x: f64, min_value: f64, max_value: f64) -> f64 {
    debug_assert!(
        min_value < max_value,
        "normalization range [{min_value}, {max_value}] has zero or negative width"
    );
    (x - min_value) / (max_value - min_value)
}
