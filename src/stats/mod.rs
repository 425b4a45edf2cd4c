//! Descriptive statistics engine
//!
//! Pure functions over numeric slices with no knowledge of the region
//! hierarchy. All functions return full floating-point precision; rounding
//! happens only at the display boundary.
//!
//! Numerically undefined cases with a domain policy are not errors: a
//! single-point sample has standard deviation 0.0, a zero-variance input
//! has correlation 0.0, and a zero-magnitude vector has similarity 0.0.

use crate::error::{AnalyticsError, Result};

/// Arithmetic mean of a sample.
///
/// # Errors
/// Returns `EmptyInput` for an empty slice
pub fn mean(xs: &[f64]) -> Result<f64> {
    if xs.is_empty() {
        return Err(AnalyticsError::EmptyInput("mean of zero records"));
    }
    Ok(xs.iter().sum::<f64>() / xs.len() as f64)
}

/// Sample standard deviation, using the n-1 denominator.
///
/// A single data point has no dispersion to estimate and yields 0.0.
///
/// # Errors
/// Returns `EmptyInput` for an empty slice
pub fn sample_stddev(xs: &[f64]) -> Result<f64> {
    if xs.is_empty() {
        return Err(AnalyticsError::EmptyInput("standard deviation of zero records"));
    }
    let n = xs.len();
    if n == 1 {
        return Ok(0.0);
    }
    let mean = xs.iter().sum::<f64>() / n as f64;
    let squared_diff_sum: f64 = xs.iter().map(|x| (x - mean) * (x - mean)).sum();
    let variance = squared_diff_sum / (n - 1) as f64;
    Ok(variance.sqrt())
}

/// Pearson correlation coefficient between two equal-length vectors.
///
/// Covariance and variance terms both use population-style sums, keeping
/// the deviation convention internally consistent. A zero-variance input
/// carries no linear relationship signal and yields 0.0.
///
/// # Errors
/// Returns `DimensionMismatch` unless both vectors have the same length
/// and at least two elements
pub fn pearson_correlation(xs: &[f64], ys: &[f64]) -> Result<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return Err(AnalyticsError::DimensionMismatch {
            left: xs.len(),
            right: ys.len(),
        });
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (&x, &y) in xs.iter().zip(ys.iter()) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        covariance += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return Ok(0.0);
    }
    Ok(covariance / (var_x * var_y).sqrt())
}

/// Cosine similarity between two equal-length vectors, in [-1, 1].
///
/// A zero-magnitude vector has no direction to compare and yields 0.0.
///
/// # Errors
/// Returns `DimensionMismatch` for vectors of unequal length
pub fn cosine_similarity(xs: &[f64], ys: &[f64]) -> Result<f64> {
    if xs.len() != ys.len() {
        return Err(AnalyticsError::DimensionMismatch {
            left: xs.len(),
            right: ys.len(),
        });
    }

    let mut dot = 0.0;
    let mut mag_x = 0.0;
    let mut mag_y = 0.0;
    for (&x, &y) in xs.iter().zip(ys.iter()) {
        dot += x * y;
        mag_x += x * x;
        mag_y += y * y;
    }

    let denominator = mag_x.sqrt() * mag_y.sqrt();
    if denominator == 0.0 {
        return Ok(0.0);
    }
    // Guard against floating-point drift pushing the ratio past the bounds
    Ok((dot / denominator).clamp(-1.0, 1.0))
}
