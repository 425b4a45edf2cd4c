//! OP1: maximum-population region per age band, per hierarchy level

use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::index::RegionIndex;
use crate::models::AgeBand;

/// The maximum-population regions for one age band
///
/// State and SA3 winners are `None` when no region at that level meets
/// the population threshold; a sub-threshold region is never promoted in
/// its place. The SA2 level is unthresholded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeGroupMaxima {
    /// The age band
    pub band: AgeBand,
    /// Display name of the winning state, if any is eligible
    pub state: Option<String>,
    /// Display name of the winning SA3, if any is eligible
    pub sa3: Option<String>,
    /// Display name of the winning SA2, if any carries data
    pub sa2: Option<String>,
}

/// Highest-population candidate; strict comparison keeps the
/// first-encountered region on ties
fn max_by<'a>(candidates: &[&'a str], population_of: impl Fn(&str) -> u64) -> Option<&'a str> {
    let mut best: Option<(&'a str, u64)> = None;
    for &candidate in candidates {
        let population = population_of(candidate);
        if best.is_none_or(|(_, best_population)| population > best_population) {
            best = Some((candidate, population));
        }
    }
    best.map(|(candidate, _)| candidate)
}

/// For each age band, find the region with the highest population in
/// that band, independently at the state, SA3, and SA2 levels.
///
/// Candidacy at the state and SA3 levels requires a total population of
/// at least `config.population_threshold`; the threshold excludes regions
/// from candidacy, not from the dataset. Ties are broken by
/// first-encountered input order.
#[must_use]
pub fn op1_age_group_maxima(index: &RegionIndex, config: &AnalysisConfig) -> Vec<AgeGroupMaxima> {
    let threshold = config.population_threshold;

    // Candidate lists are fixed across bands; eligibility depends only on
    // each region's total population
    let eligible_states: Vec<&str> = index
        .states()
        .iter()
        .map(String::as_str)
        .filter(|state_key| index.state_total(state_key) >= threshold)
        .collect();
    let eligible_sa3s: Vec<&str> = index
        .sa3_codes_ordered()
        .into_iter()
        .filter(|sa3_code| index.sa3_total(sa3_code) >= threshold)
        .collect();
    let populated_sa2s: Vec<&str> = index
        .sa2_codes_ordered()
        .into_iter()
        .filter(|sa2_code| index.distribution(sa2_code).is_some())
        .collect();

    log::debug!(
        "OP1 candidates: {} states, {} SA3s over threshold {}, {} populated SA2s",
        eligible_states.len(),
        eligible_sa3s.len(),
        threshold,
        populated_sa2s.len()
    );

    index
        .bands()
        .bands()
        .iter()
        .enumerate()
        .map(|(band_idx, band)| {
            let state = max_by(&eligible_states, |key| index.state_band_total(key, band_idx))
                .map(|key| index.state_name(key).unwrap_or(key).to_string());
            let sa3 = max_by(&eligible_sa3s, |code| index.sa3_band_total(code, band_idx))
                .map(|code| index.sa3_name(code).unwrap_or(code).to_string());
            let sa2 = max_by(&populated_sa2s, |code| index.sa2_band_count(code, band_idx))
                .map(|code| index.sa2_name(code).unwrap_or(code).to_string());

            AgeGroupMaxima {
                band: *band,
                state,
                sa3,
                sa2,
            }
        })
        .collect()
}
