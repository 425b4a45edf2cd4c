//! Read-only region index structure
//!
//! The state -> SA3 -> SA2 hierarchy is stored as a flat collection of
//! per-SA2 distribution vectors plus two membership maps, which makes the
//! hierarchy invariants (each SA2 belongs to exactly one SA3, each SA3 to
//! exactly one state) enforceable by construction.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::models::{AgeBandSet, RegionAggregate, RegionLevel};

/// Dense per-band counts for one SA2; ABS data has 18 five-year bands
pub type AgeCounts = SmallVec<[u64; 24]>;

static EMPTY_CODES: &[String] = &[];

/// Immutable hierarchical lookup structure over areas and populations
///
/// Grouping keys are SA2/SA3 codes and canonical (lower-cased) state
/// names; original casing is kept separately for display. All orderings
/// are first-encountered input order, which keeps tie-breaking and output
/// ordering deterministic regardless of map iteration order.
#[derive(Debug, Clone)]
pub struct RegionIndex {
    /// Band ordering shared by every distribution vector
    pub(crate) bands: AgeBandSet,
    /// SA2 code -> containing SA3 code
    pub(crate) sa2_to_sa3: FxHashMap<String, String>,
    /// SA3 code -> containing state key
    pub(crate) sa3_to_state: FxHashMap<String, String>,
    /// SA2 code -> display name
    pub(crate) sa2_names: FxHashMap<String, String>,
    /// SA3 code -> display name
    pub(crate) sa3_names: FxHashMap<String, String>,
    /// State key -> display name (first-encountered casing)
    pub(crate) state_names: FxHashMap<String, String>,
    /// State keys in first-encountered order
    pub(crate) state_order: Vec<String>,
    /// State key -> SA3 codes in first-encountered order
    pub(crate) sa3_order: FxHashMap<String, Vec<String>>,
    /// SA3 code -> SA2 codes in first-encountered order
    pub(crate) sa2_order: FxHashMap<String, Vec<String>>,
    /// SA2 code -> per-band counts (only SA2s with population data)
    pub(crate) distributions: FxHashMap<String, AgeCounts>,
}

impl RegionIndex {
    /// The band set shared by all distribution vectors
    #[must_use]
    pub fn bands(&self) -> &AgeBandSet {
        &self.bands
    }

    /// State keys in first-encountered order
    #[must_use]
    pub fn states(&self) -> &[String] {
        &self.state_order
    }

    /// Display name for a state key
    #[must_use]
    pub fn state_name(&self, state_key: &str) -> Option<&str> {
        self.state_names.get(state_key).map(String::as_str)
    }

    /// Display name for an SA3 code
    #[must_use]
    pub fn sa3_name(&self, sa3_code: &str) -> Option<&str> {
        self.sa3_names.get(sa3_code).map(String::as_str)
    }

    /// Display name for an SA2 code
    #[must_use]
    pub fn sa2_name(&self, sa2_code: &str) -> Option<&str> {
        self.sa2_names.get(sa2_code).map(String::as_str)
    }

    /// SA3 codes belonging to a state, in input order
    #[must_use]
    pub fn sa3s_in_state(&self, state_key: &str) -> &[String] {
        self.sa3_order.get(state_key).map_or(EMPTY_CODES, Vec::as_slice)
    }

    /// SA2 codes belonging to an SA3, in input order
    #[must_use]
    pub fn sa2s_in_sa3(&self, sa3_code: &str) -> &[String] {
        self.sa2_order.get(sa3_code).map_or(EMPTY_CODES, Vec::as_slice)
    }

    /// SA2 codes in an SA3 that carry population data, in input order
    #[must_use]
    pub fn populated_sa2s_in_sa3(&self, sa3_code: &str) -> Vec<&str> {
        self.sa2s_in_sa3(sa3_code)
            .iter()
            .filter(|code| self.distributions.contains_key(*code))
            .map(String::as_str)
            .collect()
    }

    /// Whether the area table defined this SA2
    #[must_use]
    pub fn contains_sa2(&self, sa2_code: &str) -> bool {
        self.sa2_to_sa3.contains_key(sa2_code)
    }

    /// Whether the area table defined this SA3
    #[must_use]
    pub fn contains_sa3(&self, sa3_code: &str) -> bool {
        self.sa3_to_state.contains_key(sa3_code)
    }

    /// Containing SA3 code for an SA2
    #[must_use]
    pub fn sa3_of(&self, sa2_code: &str) -> Option<&str> {
        self.sa2_to_sa3.get(sa2_code).map(String::as_str)
    }

    /// Containing state key for an SA3
    #[must_use]
    pub fn state_of(&self, sa3_code: &str) -> Option<&str> {
        self.sa3_to_state.get(sa3_code).map(String::as_str)
    }

    /// Per-band counts for an SA2, if it has population data
    #[must_use]
    pub fn distribution(&self, sa2_code: &str) -> Option<&[u64]> {
        self.distributions.get(sa2_code).map(SmallVec::as_slice)
    }

    /// Per-band counts for an SA2 as floats, for the statistics engine
    #[must_use]
    pub fn distribution_f64(&self, sa2_code: &str) -> Option<Vec<f64>> {
        self.distribution(sa2_code)
            .map(|counts| counts.iter().map(|&c| c as f64).collect())
    }

    /// Count for one (SA2, band index) cell; 0 when absent
    #[must_use]
    pub fn sa2_band_count(&self, sa2_code: &str, band_idx: usize) -> u64 {
        self.distribution(sa2_code)
            .and_then(|counts| counts.get(band_idx).copied())
            .unwrap_or(0)
    }

    /// Total population of an SA2 across all bands
    #[must_use]
    pub fn sa2_total(&self, sa2_code: &str) -> u64 {
        self.distribution(sa2_code).map_or(0, |counts| counts.iter().sum())
    }

    /// Per-band counts summed over an SA3's member SA2s
    #[must_use]
    pub fn sa3_distribution(&self, sa3_code: &str) -> AgeCounts {
        let mut totals: AgeCounts = smallvec::smallvec![0; self.bands.len()];
        for sa2_code in self.sa2s_in_sa3(sa3_code) {
            if let Some(counts) = self.distribution(sa2_code) {
                for (slot, &count) in totals.iter_mut().zip(counts.iter()) {
                    *slot += count;
                }
            }
        }
        totals
    }

    /// Population of an SA3 for one band
    #[must_use]
    pub fn sa3_band_total(&self, sa3_code: &str, band_idx: usize) -> u64 {
        self.sa2s_in_sa3(sa3_code)
            .iter()
            .map(|sa2_code| self.sa2_band_count(sa2_code, band_idx))
            .sum()
    }

    /// Total population of an SA3 across all bands
    #[must_use]
    pub fn sa3_total(&self, sa3_code: &str) -> u64 {
        self.sa2s_in_sa3(sa3_code)
            .iter()
            .map(|sa2_code| self.sa2_total(sa2_code))
            .sum()
    }

    /// Per-band counts summed over a state's SA3s
    #[must_use]
    pub fn state_distribution(&self, state_key: &str) -> AgeCounts {
        let mut totals: AgeCounts = smallvec::smallvec![0; self.bands.len()];
        for sa3_code in self.sa3s_in_state(state_key) {
            let sa3_counts = self.sa3_distribution(sa3_code);
            for (slot, count) in totals.iter_mut().zip(sa3_counts) {
                *slot += count;
            }
        }
        totals
    }

    /// Population of a state for one band
    #[must_use]
    pub fn state_band_total(&self, state_key: &str, band_idx: usize) -> u64 {
        self.sa3s_in_state(state_key)
            .iter()
            .map(|sa3_code| self.sa3_band_total(sa3_code, band_idx))
            .sum()
    }

    /// Total population of a state across all bands
    #[must_use]
    pub fn state_total(&self, state_key: &str) -> u64 {
        self.sa3s_in_state(state_key)
            .iter()
            .map(|sa3_code| self.sa3_total(sa3_code))
            .sum()
    }

    /// All SA3 codes, walking states then SA3s in input order
    #[must_use]
    pub fn sa3_codes_ordered(&self) -> Vec<&str> {
        self.state_order
            .iter()
            .flat_map(|state_key| self.sa3s_in_state(state_key))
            .map(String::as_str)
            .collect()
    }

    /// All SA2 codes, walking states, SA3s, then SA2s in input order
    #[must_use]
    pub fn sa2_codes_ordered(&self) -> Vec<&str> {
        self.sa3_codes_ordered()
            .into_iter()
            .flat_map(|sa3_code| self.sa2s_in_sa3(sa3_code))
            .map(String::as_str)
            .collect()
    }

    /// Build the aggregate for one region, or `None` for an unknown key
    #[must_use]
    pub fn aggregate(&self, level: RegionLevel, key: &str) -> Option<RegionAggregate> {
        let age_distribution: Vec<u64> = match level {
            RegionLevel::State => {
                if !self.state_names.contains_key(key) {
                    return None;
                }
                self.state_distribution(key).into_vec()
            }
            RegionLevel::Sa3 => {
                if !self.contains_sa3(key) {
                    return None;
                }
                self.sa3_distribution(key).into_vec()
            }
            RegionLevel::Sa2 => {
                if !self.contains_sa2(key) {
                    return None;
                }
                let mut counts = vec![0; self.bands.len()];
                if let Some(dist) = self.distribution(key) {
                    counts.copy_from_slice(dist);
                }
                counts
            }
        };
        Some(RegionAggregate {
            level,
            key: key.to_string(),
            total_population: age_distribution.iter().sum(),
            age_distribution,
        })
    }
}
