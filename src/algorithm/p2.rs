//! Entry contract for the regional comparison run
//!
//! Produces the three comparison outputs in one pass over a shared index:
//! per-band maxima (OP1), largest SA2 per qualifying SA3 (OP2), and the
//! most similar SA2 pairs (OP3).

use serde::{Deserialize, Serialize};

use crate::algorithm::op1::{AgeGroupMaxima, op1_age_group_maxima};
use crate::algorithm::op2::{LargestSa2, op2_largest_sa2};
use crate::algorithm::op3::{SimilarityMatch, op3_most_similar};
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::index::{IngestReport, RegionIndex};
use crate::models::{AreaRecord, PopulationRecord};

/// Results of the regional comparison run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct P2Analysis {
    /// Per-band maximum regions at each level
    pub op1: Vec<AgeGroupMaxima>,
    /// Largest SA2 per qualifying SA3
    pub op2: Vec<LargestSa2>,
    /// Best similarity match per SA2 in qualifying groups
    pub op3: Vec<SimilarityMatch>,
    /// Row counts observed while building the index
    pub ingest: IngestReport,
}

impl P2Analysis {
    /// Copy with all display-bound numbers rounded
    #[must_use]
    pub fn rounded(&self, decimals: u32) -> Self {
        Self {
            op1: self.op1.clone(),
            op2: self.op2.iter().map(|entry| entry.rounded(decimals)).collect(),
            op3: self.op3.iter().map(|entry| entry.rounded(decimals)).collect(),
            ingest: self.ingest.clone(),
        }
    }

    /// Human-readable summary with numbers rounded for display
    #[must_use]
    pub fn summary(&self, decimals: u32) -> String {
        let rounded = self.rounded(decimals);
        let mut summary = String::new();
        summary.push_str("Regional Comparison Summary:\n");
        summary.push_str(&format!("  Age Bands: {}\n", rounded.op1.len()));
        summary.push_str(&format!("  Qualifying SA3s: {}\n", rounded.op2.len()));
        summary.push_str(&format!("  Similarity Matches: {}\n", rounded.op3.len()));
        summary.push_str(&format!("  Skipped Rows: {}\n", rounded.ingest.skipped_rows()));
        summary
    }
}

/// Run the regional comparison with the default configuration.
///
/// # Errors
/// Propagates index-build errors (strict mode) and statistics-engine
/// errors from the individual operations
pub fn analyze_p2(areas: &[AreaRecord], populations: &[PopulationRecord]) -> Result<P2Analysis> {
    analyze_p2_with_config(areas, populations, &AnalysisConfig::default())
}

/// Run the regional comparison with an explicit configuration
pub fn analyze_p2_with_config(
    areas: &[AreaRecord],
    populations: &[PopulationRecord],
    config: &AnalysisConfig,
) -> Result<P2Analysis> {
    log::info!(
        "Running regional comparison over {} area rows and {} population rows",
        areas.len(),
        populations.len()
    );

    let (index, ingest) = RegionIndex::from_records(areas, populations, config)?;

    let op1 = op1_age_group_maxima(&index, config);
    let op2 = op2_largest_sa2(&index, config)?;
    let op3 = op3_most_similar(&index, config)?;

    Ok(P2Analysis {
        op1,
        op2,
        op3,
        ingest,
    })
}
