//! Shared fixtures for unit and integration tests

use crate::config::AnalysisConfig;
use crate::models::{AgeBand, AgeBandSet, AreaRecord, PopulationRecord};

/// The five-year bands used by the fixture tables: 0-4 through 20-24
#[must_use]
pub fn five_band_set() -> AgeBandSet {
    AgeBandSet::from_bands((0..25).step_by(5).map(|lower| AgeBand::new(lower, lower + 4)))
}

/// One population record per fixture band for a single SA2
#[must_use]
pub fn records_for(sa2_code: &str, counts: &[u64]) -> Vec<PopulationRecord> {
    five_band_set()
        .bands()
        .iter()
        .zip(counts.iter())
        .map(|(band, &count)| PopulationRecord::new(sa2_code, *band, count))
        .collect()
}

/// Area table fixture: two states, three SA3s, eight SA2s
#[must_use]
pub fn sample_areas() -> Vec<AreaRecord> {
    vec![
        AreaRecord::new("401011001", "Avoca Beach", "40101", "Gosford", "New South Wales"),
        AreaRecord::new("401011002", "Box Head", "40101", "Gosford", "New South Wales"),
        AreaRecord::new("401011003", "Calga", "40101", "Gosford", "New South Wales"),
        AreaRecord::new("401021003", "Blue Haven", "40102", "Wyong", "New South Wales"),
        AreaRecord::new("401021004", "Budgewoi", "40102", "Wyong", "New South Wales"),
        AreaRecord::new("401021005", "Chittaway Bay", "40102", "Wyong", "New South Wales"),
        AreaRecord::new("402011001", "Adelaide", "40201", "Adelaide City", "South Australia"),
        AreaRecord::new("402011002", "North Adelaide", "40201", "Adelaide City", "South Australia"),
    ]
}

/// Population table fixture matching [`sample_areas`]
#[must_use]
pub fn sample_populations() -> Vec<PopulationRecord> {
    let mut records = Vec::new();
    // Gosford SA2s
    records.extend(records_for("401011001", &[100, 150, 130, 90, 110]));
    records.extend(records_for("401011002", &[80, 120, 140, 70, 60]));
    records.extend(records_for("401011003", &[30, 40, 35, 25, 20]));
    // Wyong SA2s
    records.extend(records_for("401021003", &[200, 180, 160, 150, 140]));
    records.extend(records_for("401021004", &[50, 60, 70, 80, 90]));
    records.extend(records_for("401021005", &[10, 15, 20, 25, 30]));
    // Adelaide City SA2s
    records.extend(records_for("402011001", &[300, 280, 260, 240, 220]));
    records.extend(records_for("402011002", &[90, 85, 80, 75, 70]));
    records
}

/// Configuration with thresholds sized for the small fixture tables
#[must_use]
pub fn test_config() -> AnalysisConfig {
    AnalysisConfig {
        population_threshold: 500,
        min_similarity_group: 3,
        ..AnalysisConfig::default()
    }
}
