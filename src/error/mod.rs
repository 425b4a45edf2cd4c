//! Error handling for the statistical analysis engine.

/// Errors that can occur while resolving age bands, building the region
/// index, or running aggregate queries
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    /// A negative age was passed to the age band resolver
    #[error("invalid age {0}: age must be a non-negative integer")]
    InvalidAge(i64),

    /// No age band in the band set contains the requested age
    #[error("no age band contains age {0}")]
    AgeOutOfRange(u32),

    /// Two vectors of different lengths were passed to a pairwise statistic
    #[error("dimension mismatch: left vector has {left} elements, right vector has {right}")]
    DimensionMismatch {
        /// Length of the left-hand vector
        left: usize,
        /// Length of the right-hand vector
        right: usize,
    },

    /// A statistic was requested over zero records
    #[error("empty input: {0}")]
    EmptyInput(&'static str),

    /// A query referenced a region code absent from the index
    #[error("region not found: {0}")]
    RegionNotFound(String),

    /// A population row referenced an SA2 code absent from the area table
    #[error("population row references unknown region {0}")]
    UnknownRegion(String),

    /// A caller-supplied region code is not a valid 9-digit SA2 code
    #[error("invalid region code '{0}': SA2 codes are exactly 9 digits")]
    InvalidRegionCode(String),
}

/// Result type for analysis operations
pub type Result<T> = std::result::Result<T, AnalyticsError>;
