//! Core aggregate queries over the region index
//!
//! Pure read operations; nothing here mutates the index.

use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, Result};
use crate::index::RegionIndex;
use crate::models::AgeBand;
use crate::stats;
use crate::utils::round_to;

/// Mean and sample standard deviation of per-SA2 counts for one band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandStats {
    /// Mean count across the SA3's populated SA2s
    pub mean: f64,
    /// Sample standard deviation of those counts
    pub stddev: f64,
    /// Number of SA2 regions the statistics were computed over
    pub regions: usize,
}

impl BandStats {
    /// Copy with both statistics rounded for display
    #[must_use]
    pub fn rounded(&self, decimals: u32) -> Self {
        Self {
            mean: round_to(self.mean, decimals),
            stddev: round_to(self.stddev, decimals),
            regions: self.regions,
        }
    }
}

/// The SA3 with the highest population for a band within one state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateMaxSa3 {
    /// State display name
    pub state: String,
    /// Winning SA3 code
    pub sa3_code: String,
    /// Winning SA3 display name
    pub sa3_name: String,
    /// The SA3's population for the band
    pub population: u64,
    /// That population as a proportion of the state's band total
    pub proportion: f64,
}

impl StateMaxSa3 {
    /// Copy with the proportion rounded for display
    #[must_use]
    pub fn rounded(&self, decimals: u32) -> Self {
        Self {
            proportion: round_to(self.proportion, decimals),
            ..self.clone()
        }
    }
}

/// Mean and sample standard deviation of the per-SA2 counts for one age
/// band across an SA3's populated member SA2s.
///
/// # Errors
/// * `RegionNotFound` for an SA3 code absent from the index
/// * `AgeOutOfRange` for a band outside the index's band set
/// * `EmptyInput` when no member SA2 carries population data
pub fn sa3_band_stats(index: &RegionIndex, sa3_code: &str, band: &AgeBand) -> Result<BandStats> {
    if !index.contains_sa3(sa3_code) {
        return Err(AnalyticsError::RegionNotFound(sa3_code.to_string()));
    }
    let band_idx = index
        .bands()
        .index_of(band)
        .ok_or(AnalyticsError::AgeOutOfRange(band.lower))?;

    let counts: Vec<f64> = index
        .populated_sa2s_in_sa3(sa3_code)
        .iter()
        .map(|sa2_code| index.sa2_band_count(sa2_code, band_idx) as f64)
        .collect();

    Ok(BandStats {
        mean: stats::mean(&counts)?,
        stddev: stats::sample_stddev(&counts)?,
        regions: counts.len(),
    })
}

/// For every state, the SA3 with the highest population for the band.
///
/// Ties are broken by first-encountered input order. The proportion is
/// the winner's band population over the state's band total, or 0.0 for
/// a state with no population in the band.
///
/// # Errors
/// Returns `AgeOutOfRange` for a band outside the index's band set
pub fn state_max_sa3(index: &RegionIndex, band: &AgeBand) -> Result<Vec<StateMaxSa3>> {
    let band_idx = index
        .bands()
        .index_of(band)
        .ok_or(AnalyticsError::AgeOutOfRange(band.lower))?;

    let mut winners = Vec::with_capacity(index.states().len());
    for state_key in index.states() {
        let mut best: Option<(&str, u64)> = None;
        for sa3_code in index.sa3s_in_state(state_key) {
            let population = index.sa3_band_total(sa3_code, band_idx);
            // Strict comparison keeps the first-encountered SA3 on ties
            if best.is_none_or(|(_, best_population)| population > best_population) {
                best = Some((sa3_code, population));
            }
        }
        let Some((sa3_code, population)) = best else {
            continue;
        };

        let state_total = index.state_band_total(state_key, band_idx);
        let proportion = if state_total == 0 {
            0.0
        } else {
            population as f64 / state_total as f64
        };

        winners.push(StateMaxSa3 {
            state: index.state_name(state_key).unwrap_or(state_key).to_string(),
            sa3_code: sa3_code.to_string(),
            sa3_name: index.sa3_name(sa3_code).unwrap_or(sa3_code).to_string(),
            population,
            proportion,
        });
    }
    Ok(winners)
}

/// Pearson correlation between the age distributions of two SA2 regions.
///
/// An SA2 defined in the area table but carrying no population rows is
/// treated as an all-zero distribution, which resolves to the
/// zero-variance sentinel of 0.0.
///
/// # Errors
/// * `RegionNotFound` for a code absent from the area table
/// * `DimensionMismatch` when the index has fewer than two bands
pub fn correlate_regions(index: &RegionIndex, sa2_a: &str, sa2_b: &str) -> Result<f64> {
    let distribution = |code: &str| -> Result<Vec<f64>> {
        if !index.contains_sa2(code) {
            return Err(AnalyticsError::RegionNotFound(code.to_string()));
        }
        Ok(index
            .distribution_f64(code)
            .unwrap_or_else(|| vec![0.0; index.bands().len()]))
    };

    let xs = distribution(sa2_a)?;
    let ys = distribution(sa2_b)?;
    stats::pearson_correlation(&xs, &ys)
}
