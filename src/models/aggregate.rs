//! Derived region aggregates
//!
//! A `RegionAggregate` is never an input: it is produced by summing child
//! region counts grouped through the membership maps of the index.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Administrative level of a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegionLevel {
    /// State or territory
    State,
    /// Statistical Area level 3
    Sa3,
    /// Statistical Area level 2
    Sa2,
}

impl fmt::Display for RegionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::State => write!(f, "state"),
            Self::Sa3 => write!(f, "SA3"),
            Self::Sa2 => write!(f, "SA2"),
        }
    }
}

/// Aggregated population for one region at one hierarchy level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionAggregate {
    /// Hierarchy level of the region
    pub level: RegionLevel,
    /// Region key: code for SA2/SA3, canonical name key for states
    pub key: String,
    /// Total population across all age bands
    pub total_population: u64,
    /// Per-band counts, indexed by the band set's ordering
    pub age_distribution: Vec<u64>,
}

impl RegionAggregate {
    /// Age distribution as floats, for the statistics engine
    #[must_use]
    pub fn distribution_f64(&self) -> Vec<f64> {
        self.age_distribution.iter().map(|&c| c as f64).collect()
    }
}
