//! OP2: largest SA2 within each qualifying SA3

use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::index::RegionIndex;
use crate::stats;
use crate::utils::round_to;

/// The largest SA2 within one qualifying SA3
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LargestSa2 {
    /// Display name of the containing state
    pub state: String,
    /// Containing SA3 code
    pub sa3_code: String,
    /// Winning SA2 code
    pub sa2_code: String,
    /// The SA2's total population across all bands
    pub population: u64,
    /// Sample standard deviation of the SA2's age distribution
    pub stddev: f64,
}

impl LargestSa2 {
    /// Copy with the standard deviation rounded for display
    #[must_use]
    pub fn rounded(&self, decimals: u32) -> Self {
        Self {
            stddev: round_to(self.stddev, decimals),
            ..self.clone()
        }
    }
}

/// For every SA3 with total population at or above the threshold, find
/// the member SA2 with the largest total population and report it with
/// the sample standard deviation of its age distribution.
///
/// Results walk states then SA3s in input order; ties are broken by
/// first-encountered order.
///
/// # Errors
/// Propagates `EmptyInput` from the statistics engine; unreachable for a
/// qualifying SA3, which always has at least one populated member
pub fn op2_largest_sa2(index: &RegionIndex, config: &AnalysisConfig) -> Result<Vec<LargestSa2>> {
    let mut results = Vec::new();

    for state_key in index.states() {
        for sa3_code in index.sa3s_in_state(state_key) {
            if index.sa3_total(sa3_code) < config.population_threshold {
                continue;
            }

            let mut best: Option<(&str, u64)> = None;
            for sa2_code in index.populated_sa2s_in_sa3(sa3_code) {
                let population = index.sa2_total(sa2_code);
                if best.is_none_or(|(_, best_population)| population > best_population) {
                    best = Some((sa2_code, population));
                }
            }
            let Some((sa2_code, population)) = best else {
                continue;
            };

            let distribution = index
                .distribution_f64(sa2_code)
                .unwrap_or_default();
            let stddev = stats::sample_stddev(&distribution)?;

            results.push(LargestSa2 {
                state: index.state_name(state_key).unwrap_or(state_key).to_string(),
                sa3_code: sa3_code.clone(),
                sa2_code: sa2_code.to_string(),
                population,
                stddev,
            });
        }
    }

    log::debug!(
        "OP2 found {} qualifying SA3s over threshold {}",
        results.len(),
        config.population_threshold
    );
    Ok(results)
}
