//! Aggregate query algorithms
//!
//! This module composes the region index and the statistics engine into
//! the analytical queries: SA3 band statistics, per-state maxima, the
//! three Project 2 outputs, and the two entry contracts.

pub mod op1;
pub mod op2;
pub mod op3;
pub mod p1;
pub mod p2;
pub mod queries;

pub use op1::{AgeGroupMaxima, op1_age_group_maxima};
pub use op2::{LargestSa2, op2_largest_sa2};
pub use op3::{SimilarityMatch, op3_most_similar};
pub use p1::{P1Analysis, analyze_p1, analyze_p1_with_config};
pub use p2::{P2Analysis, analyze_p2, analyze_p2_with_config};
pub use queries::{BandStats, StateMaxSa3, correlate_regions, sa3_band_stats, state_max_sa3};
