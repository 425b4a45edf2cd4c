//! Utility functions for key canonicalization and display rounding.

pub mod test_utils;

use crate::error::{AnalyticsError, Result};

/// Canonicalize a grouping or lookup key.
///
/// All name-based aggregation keys (state names, SA3 names) pass through
/// this single function so that aggregation never compares raw strings.
///
/// # Arguments
/// * `raw` - The raw name as it appears in the source table
///
/// # Returns
/// The trimmed, lower-cased key
#[must_use]
pub fn canonical_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Round a value to the given number of decimal places.
///
/// Applied only at the display boundary; intermediate calculations keep
/// full floating-point precision.
#[must_use]
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Validate a caller-supplied SA2 code.
///
/// SA2 codes are exactly nine digits. Surrounding whitespace is tolerated
/// and stripped.
///
/// # Errors
/// Returns `InvalidRegionCode` if the trimmed code is not nine digits
pub fn validate_sa2_code(code: &str) -> Result<&str> {
    let trimmed = code.trim();
    if trimmed.len() == 9 && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        Ok(trimmed)
    } else {
        Err(AnalyticsError::InvalidRegionCode(code.to_string()))
    }
}
