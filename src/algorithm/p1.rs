//! Entry contract for the age-group analysis run
//!
//! Resolves the target age to its band, computes band statistics for the
//! SA3 containing the first query region, finds each state's
//! maximum-population SA3 for the band, and correlates the two query
//! regions' age distributions.

use serde::{Deserialize, Serialize};

use crate::algorithm::queries::{self, BandStats, StateMaxSa3};
use crate::config::AnalysisConfig;
use crate::error::{AnalyticsError, Result};
use crate::index::{IngestReport, RegionIndex};
use crate::models::{AgeBand, AreaRecord, PopulationRecord};
use crate::utils::{round_to, validate_sa2_code};

/// Results of the age-group analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct P1Analysis {
    /// The band containing the target age
    pub age_band: AgeBand,
    /// SA3 whose statistics are reported (the first query region's SA3)
    pub sa3_code: String,
    /// Mean and sample standard deviation of the band's per-SA2 counts
    /// within that SA3
    pub sa3_stats: BandStats,
    /// Per-state maximum-population SA3 for the band
    pub state_max_sa3: Vec<StateMaxSa3>,
    /// Pearson correlation between the two query regions' distributions
    pub correlation: f64,
    /// Row counts observed while building the index
    pub ingest: IngestReport,
}

impl P1Analysis {
    /// Copy with all display-bound numbers rounded
    #[must_use]
    pub fn rounded(&self, decimals: u32) -> Self {
        Self {
            sa3_stats: self.sa3_stats.rounded(decimals),
            state_max_sa3: self
                .state_max_sa3
                .iter()
                .map(|winner| winner.rounded(decimals))
                .collect(),
            correlation: round_to(self.correlation, decimals),
            ..self.clone()
        }
    }

    /// Human-readable summary with numbers rounded for display
    #[must_use]
    pub fn summary(&self, decimals: u32) -> String {
        let rounded = self.rounded(decimals);
        let mut summary = String::new();
        summary.push_str("Age Group Analysis Summary:\n");
        summary.push_str(&format!("  Age Band: {}\n", rounded.age_band));
        summary.push_str(&format!(
            "  SA3 {}: mean {} / stddev {} over {} SA2s\n",
            rounded.sa3_code,
            rounded.sa3_stats.mean,
            rounded.sa3_stats.stddev,
            rounded.sa3_stats.regions
        ));
        summary.push_str(&format!("  Correlation: {}\n", rounded.correlation));
        summary.push_str("  Per-State Maximum SA3:\n");
        for winner in &rounded.state_max_sa3 {
            summary.push_str(&format!(
                "    {}: {} (population {}, proportion {})\n",
                winner.state, winner.sa3_name, winner.population, winner.proportion
            ));
        }
        summary
    }
}

/// Run the age-group analysis with the default configuration.
///
/// # Errors
/// * `InvalidRegionCode` for a query code that is not nine digits
/// * `InvalidAge` / `AgeOutOfRange` from band resolution
/// * `RegionNotFound` for a query code absent from the area table
pub fn analyze_p1(
    areas: &[AreaRecord],
    populations: &[PopulationRecord],
    target_age: i64,
    sa2_code_a: &str,
    sa2_code_b: &str,
) -> Result<P1Analysis> {
    analyze_p1_with_config(
        areas,
        populations,
        target_age,
        sa2_code_a,
        sa2_code_b,
        &AnalysisConfig::default(),
    )
}

/// Run the age-group analysis with an explicit configuration
pub fn analyze_p1_with_config(
    areas: &[AreaRecord],
    populations: &[PopulationRecord],
    target_age: i64,
    sa2_code_a: &str,
    sa2_code_b: &str,
    config: &AnalysisConfig,
) -> Result<P1Analysis> {
    // Argument validation happens before the index is built
    let sa2_code_a = validate_sa2_code(sa2_code_a)?;
    let sa2_code_b = validate_sa2_code(sa2_code_b)?;

    log::info!(
        "Analyzing age {target_age} for regions {sa2_code_a} and {sa2_code_b}"
    );

    let (index, ingest) = RegionIndex::from_records(areas, populations, config)?;

    let age_band = *index.bands().resolve(target_age)?;

    let sa3_code = index
        .sa3_of(sa2_code_a)
        .ok_or_else(|| AnalyticsError::RegionNotFound(sa2_code_a.to_string()))?
        .to_string();

    let sa3_stats = queries::sa3_band_stats(&index, &sa3_code, &age_band)?;
    let state_max_sa3 = queries::state_max_sa3(&index, &age_band)?;
    let correlation = queries::correlate_regions(&index, sa2_code_a, sa2_code_b)?;

    Ok(P1Analysis {
        age_band,
        sa3_code,
        sa3_stats,
        state_max_sa3,
        correlation,
        ingest,
    })
}
