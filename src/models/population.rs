//! Population entity model

use serde::{Deserialize, Serialize};

use crate::models::age_band::AgeBand;

/// A single population count: one (SA2 region, age band) pair
///
/// The loader contract guarantees `count` is already parsed and blank
/// cells are normalized to 0. Duplicate (region, band) pairs are detected
/// at index-build time; the later entry is discarded, never summed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationRecord {
    /// SA2 region code
    pub sa2_code: String,
    /// Age band the count belongs to
    pub age_band: AgeBand,
    /// Number of people in the band
    pub count: u64,
}

impl PopulationRecord {
    /// Create a new population record
    #[must_use]
    pub fn new(sa2_code: impl Into<String>, age_band: AgeBand, count: u64) -> Self {
        Self {
            sa2_code: sa2_code.into(),
            age_band,
            count,
        }
    }
}
