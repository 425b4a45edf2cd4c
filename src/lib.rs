//! A Rust library for hierarchical demographic aggregation and
//! comparative statistics over Australian statistical areas (SA2 within
//! SA3 within state), with age-band resolution and the numeric
//! comparison measures used for planning queries.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod index;
pub mod models;
pub mod stats;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::AnalysisConfig;
pub use error::{AnalyticsError, Result};
pub use models::{AgeBand, AgeBandSet, AreaRecord, PopulationRecord, RegionAggregate, RegionLevel};

// Index construction
pub use index::{IngestReport, RegionIndex, RegionIndexBuilder};

// Aggregate queries
pub use algorithm::{
    P1Analysis, P2Analysis, analyze_p1, analyze_p1_with_config, analyze_p2,
    analyze_p2_with_config,
};
pub use algorithm::{
    AgeGroupMaxima, BandStats, LargestSa2, SimilarityMatch, StateMaxSa3, correlate_regions,
    op1_age_group_maxima, op2_largest_sa2, op3_most_similar, sa3_band_stats, state_max_sa3,
};

// Statistics engine
pub use stats::{cosine_similarity, mean, pearson_correlation, sample_stddev};
