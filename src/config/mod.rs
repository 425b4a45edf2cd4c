//! Configuration for the analysis engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum total population a state or SA3 must have to be eligible as a
/// maximum-population winner (OP1) or a qualifying SA3 (OP2)
pub const DEFAULT_POPULATION_THRESHOLD: u64 = 150_000;

/// Minimum number of populated member SA2s an SA3 must have before its
/// members take part in the similarity search (OP3)
pub const DEFAULT_MIN_SIMILARITY_GROUP: usize = 15;

/// Number of decimal places used when rounding results for display
pub const DEFAULT_DISPLAY_DECIMALS: u32 = 4;

/// Configuration for index construction and aggregate queries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Total-population threshold for candidacy at the state and SA3 levels
    pub population_threshold: u64,
    /// Minimum populated-SA2 group size for the similarity search
    pub min_similarity_group: usize,
    /// Decimal places applied at the display boundary
    pub display_decimals: u32,
    /// Whether a population row referencing an unknown region aborts the
    /// build instead of being skipped and counted
    pub strict: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            population_threshold: DEFAULT_POPULATION_THRESHOLD,
            min_similarity_group: DEFAULT_MIN_SIMILARITY_GROUP,
            display_decimals: DEFAULT_DISPLAY_DECIMALS,
            strict: false, // Skip and count malformed rows by default
        }
    }
}

impl fmt::Display for AnalysisConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Analysis Configuration:")?;
        writeln!(f, "  Population Threshold: {}", self.population_threshold)?;
        writeln!(f, "  Min Similarity Group: {}", self.min_similarity_group)?;
        writeln!(f, "  Display Decimals: {}", self.display_decimals)?;
        writeln!(f, "  Strict: {}", self.strict)?;
        Ok(())
    }
}
