//! Region index construction
//!
//! The builder folds area and population records into the index under an
//! [`AnalysisConfig`]. Row-level problems (unknown regions, duplicates)
//! are recovered locally: the row is skipped and counted, and the run
//! continues unless strict mode is configured.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use smallvec::smallvec;
use std::fmt;

use crate::config::AnalysisConfig;
use crate::error::{AnalyticsError, Result};
use crate::index::core::{AgeCounts, RegionIndex};
use crate::models::{AgeBandSet, AreaRecord, PopulationRecord};

/// Row counts observed while folding the input tables into the index
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReport {
    /// Area rows consumed
    pub area_rows: usize,
    /// Population rows consumed
    pub population_rows: usize,
    /// Area rows discarded because their SA2 code was already defined
    pub duplicate_area_rows: usize,
    /// Population rows discarded because their SA2 code is absent from
    /// the area table
    pub unknown_region_rows: usize,
    /// Population rows discarded as duplicate (SA2, band) pairs
    pub duplicate_population_rows: usize,
    /// Population rows discarded because their band is not in the band set
    pub unmatched_band_rows: usize,
}

impl IngestReport {
    /// Total number of discarded rows
    #[must_use]
    pub fn skipped_rows(&self) -> usize {
        self.duplicate_area_rows
            + self.unknown_region_rows
            + self.duplicate_population_rows
            + self.unmatched_band_rows
    }
}

impl fmt::Display for IngestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Ingest Report:")?;
        writeln!(f, "  Area Rows: {}", self.area_rows)?;
        writeln!(f, "  Population Rows: {}", self.population_rows)?;
        writeln!(f, "  Duplicate Area Rows: {}", self.duplicate_area_rows)?;
        writeln!(f, "  Unknown Region Rows: {}", self.unknown_region_rows)?;
        writeln!(
            f,
            "  Duplicate Population Rows: {}",
            self.duplicate_population_rows
        )?;
        writeln!(f, "  Unmatched Band Rows: {}", self.unmatched_band_rows)?;
        Ok(())
    }
}

/// Builder for constructing a region index step by step
pub struct RegionIndexBuilder {
    /// Configuration governing strictness
    config: AnalysisConfig,
    /// Explicit band set; derived from the population records if absent
    bands: Option<AgeBandSet>,
    /// Staged area rows
    areas: Vec<AreaRecord>,
    /// Staged population rows
    populations: Vec<PopulationRecord>,
}

impl RegionIndexBuilder {
    /// Create a new builder with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: AnalysisConfig::default(),
            bands: None,
            areas: Vec::new(),
            populations: Vec::new(),
        }
    }

    /// Set the analysis configuration
    #[must_use]
    pub fn with_config(mut self, config: AnalysisConfig) -> Self {
        self.config = config;
        self
    }

    /// Use an explicit band set instead of deriving one from the data
    #[must_use]
    pub fn with_bands(mut self, bands: AgeBandSet) -> Self {
        self.bands = Some(bands);
        self
    }

    /// Stage area rows for the build
    #[must_use]
    pub fn add_areas(mut self, areas: &[AreaRecord]) -> Self {
        self.areas.extend_from_slice(areas);
        self
    }

    /// Stage population rows for the build
    #[must_use]
    pub fn add_populations(mut self, populations: &[PopulationRecord]) -> Self {
        self.populations.extend_from_slice(populations);
        self
    }

    /// Fold the staged rows into an immutable index.
    ///
    /// Two runs over the same input produce identical totals and
    /// orderings regardless of row order within each region, because all
    /// walks use recorded first-encountered insertion order.
    ///
    /// # Errors
    /// In strict mode, returns `UnknownRegion` for the first population
    /// row whose SA2 code is absent from the area table
    pub fn build(self) -> Result<(RegionIndex, IngestReport)> {
        let mut report = IngestReport {
            area_rows: self.areas.len(),
            population_rows: self.populations.len(),
            ..IngestReport::default()
        };

        log::info!(
            "Building region index from {} area rows and {} population rows",
            report.area_rows,
            report.population_rows
        );

        let mut sa2_to_sa3 = FxHashMap::default();
        let mut sa3_to_state = FxHashMap::default();
        let mut sa2_names = FxHashMap::default();
        let mut sa3_names = FxHashMap::default();
        let mut state_names: FxHashMap<String, String> = FxHashMap::default();
        let mut state_order = Vec::new();
        let mut sa3_order: FxHashMap<String, Vec<String>> = FxHashMap::default();
        let mut sa2_order: FxHashMap<String, Vec<String>> = FxHashMap::default();

        for area in &self.areas {
            // First definition of an SA2 wins; later rows are discarded
            if sa2_to_sa3.contains_key(&area.sa2_code) {
                report.duplicate_area_rows += 1;
                log::debug!("Discarding duplicate area row for SA2 {}", area.sa2_code);
                continue;
            }

            let state_key = area.state_key();
            if !state_names.contains_key(&state_key) {
                state_names.insert(state_key.clone(), area.state_name.trim().to_string());
                state_order.push(state_key.clone());
            }

            if !sa3_to_state.contains_key(&area.sa3_code) {
                sa3_to_state.insert(area.sa3_code.clone(), state_key.clone());
                sa3_names.insert(area.sa3_code.clone(), area.sa3_name.trim().to_string());
                sa3_order.entry(state_key).or_default().push(area.sa3_code.clone());
            } else if sa3_to_state[&area.sa3_code] != state_key {
                // Hierarchy invariant: an SA3 belongs to exactly one state
                log::warn!(
                    "SA3 {} already assigned to state '{}'; keeping first assignment",
                    area.sa3_code,
                    sa3_to_state[&area.sa3_code]
                );
            }

            sa2_to_sa3.insert(area.sa2_code.clone(), area.sa3_code.clone());
            sa2_names.insert(area.sa2_code.clone(), area.sa2_name.trim().to_string());
            sa2_order
                .entry(area.sa3_code.clone())
                .or_default()
                .push(area.sa2_code.clone());
        }

        let bands = match self.bands {
            Some(bands) => bands,
            None => AgeBandSet::from_bands(self.populations.iter().map(|p| p.age_band)),
        };

        let mut distributions: FxHashMap<String, AgeCounts> = FxHashMap::default();
        let mut seen_cells: FxHashSet<(String, usize)> = FxHashSet::default();

        for record in &self.populations {
            if !sa2_to_sa3.contains_key(&record.sa2_code) {
                if self.config.strict {
                    return Err(AnalyticsError::UnknownRegion(record.sa2_code.clone()));
                }
                report.unknown_region_rows += 1;
                log::debug!(
                    "Excluding population row for unknown region {}",
                    record.sa2_code
                );
                continue;
            }

            let Some(band_idx) = bands.index_of(&record.age_band) else {
                report.unmatched_band_rows += 1;
                log::debug!(
                    "Excluding population row for {} with band {} outside the band set",
                    record.sa2_code,
                    record.age_band
                );
                continue;
            };

            if !seen_cells.insert((record.sa2_code.clone(), band_idx)) {
                // Duplicate (region, band) pairs are discarded, never summed
                report.duplicate_population_rows += 1;
                log::debug!(
                    "Discarding duplicate population row for ({}, {})",
                    record.sa2_code,
                    record.age_band
                );
                continue;
            }

            distributions
                .entry(record.sa2_code.clone())
                .or_insert_with(|| smallvec![0; bands.len()])[band_idx] = record.count;
        }

        if report.skipped_rows() > 0 {
            log::warn!(
                "Skipped {} rows during index build ({} unknown region, {} duplicate population, {} duplicate area, {} unmatched band)",
                report.skipped_rows(),
                report.unknown_region_rows,
                report.duplicate_population_rows,
                report.duplicate_area_rows,
                report.unmatched_band_rows
            );
        }
        log::info!(
            "Region index built: {} states, {} SA3s, {} SA2s, {} age bands",
            state_order.len(),
            sa3_to_state.len(),
            sa2_to_sa3.len(),
            bands.len()
        );

        let index = RegionIndex {
            bands,
            sa2_to_sa3,
            sa3_to_state,
            sa2_names,
            sa3_names,
            state_names,
            state_order,
            sa3_order,
            sa2_order,
            distributions,
        };
        Ok((index, report))
    }
}

impl Default for RegionIndexBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionIndex {
    /// Build an index from record slices under the given configuration
    pub fn from_records(
        areas: &[AreaRecord],
        populations: &[PopulationRecord],
        config: &AnalysisConfig,
    ) -> Result<(Self, IngestReport)> {
        RegionIndexBuilder::new()
            .with_config(config.clone())
            .add_areas(areas)
            .add_populations(populations)
            .build()
    }
}
