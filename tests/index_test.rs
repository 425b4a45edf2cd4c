//! Tests for region index construction and hierarchical aggregation

mod utils;

use sa_analytics::config::AnalysisConfig;
use sa_analytics::error::AnalyticsError;
use sa_analytics::index::{RegionIndex, RegionIndexBuilder};
use sa_analytics::models::{AgeBand, AreaRecord, PopulationRecord, RegionLevel};
use sa_analytics::utils::test_utils::{five_band_set, records_for, sample_areas, sample_populations};

fn build_fixture() -> RegionIndex {
    let (index, report) = RegionIndex::from_records(
        &sample_areas(),
        &sample_populations(),
        &AnalysisConfig::default(),
    )
    .unwrap();
    assert_eq!(report.skipped_rows(), 0);
    index
}

#[test]
fn test_membership_maps() {
    utils::init_logging();
    let index = build_fixture();

    assert_eq!(index.sa3_of("401011001"), Some("40101"));
    assert_eq!(index.sa3_of("401021003"), Some("40102"));
    assert_eq!(index.state_of("40101"), Some("new south wales"));
    assert_eq!(index.state_of("40201"), Some("south australia"));
    assert_eq!(index.sa3_of("999999999"), None);

    // Display names keep original casing; grouping keys are canonical
    assert_eq!(index.state_name("new south wales"), Some("New South Wales"));
    assert_eq!(index.sa3_name("40102"), Some("Wyong"));
    assert_eq!(index.sa2_name("402011002"), Some("North Adelaide"));
}

#[test]
fn test_first_encountered_ordering() {
    let index = build_fixture();

    assert_eq!(index.states(), &["new south wales", "south australia"]);
    assert_eq!(index.sa3s_in_state("new south wales"), &["40101", "40102"]);
    assert_eq!(
        index.sa2s_in_sa3("40101"),
        &["401011001", "401011002", "401011003"]
    );
}

#[test]
fn test_totals_and_band_totals() {
    let index = build_fixture();

    assert_eq!(index.sa2_total("401011001"), 580);
    assert_eq!(index.sa3_total("40101"), 1200);
    assert_eq!(index.sa3_total("40102"), 1280);
    assert_eq!(index.state_total("new south wales"), 2480);
    assert_eq!(index.state_total("south australia"), 1700);

    let band_idx = index.bands().index_of(&AgeBand::new(15, 19)).unwrap();
    assert_eq!(index.sa3_band_total("40101", band_idx), 90 + 70 + 25);
    assert_eq!(index.state_band_total("new south wales", band_idx), 440);
}

#[test]
fn test_hierarchical_consistency() {
    // The sum of member SA2 counts equals the SA3 total for every band
    let index = build_fixture();
    for sa3_code in ["40101", "40102", "40201"] {
        for band_idx in 0..index.bands().len() {
            let from_members: u64 = index
                .sa2s_in_sa3(sa3_code)
                .iter()
                .map(|sa2| index.sa2_band_count(sa2, band_idx))
                .sum();
            assert_eq!(from_members, index.sa3_band_total(sa3_code, band_idx));
        }
    }
}

#[test]
fn test_unknown_region_rows_are_excluded_not_fatal() {
    let mut populations = sample_populations();
    populations.push(PopulationRecord::new(
        "999999999",
        AgeBand::new(0, 4),
        1_000_000,
    ));

    let (index, report) =
        RegionIndex::from_records(&sample_areas(), &populations, &AnalysisConfig::default())
            .unwrap();

    assert_eq!(report.unknown_region_rows, 1);
    assert_eq!(index.sa2_total("999999999"), 0);
    // The excluded row never leaks into any aggregate
    assert_eq!(index.state_total("new south wales"), 2480);
}

#[test]
fn test_unknown_region_is_fatal_in_strict_mode() {
    let mut populations = sample_populations();
    populations.push(PopulationRecord::new("999999999", AgeBand::new(0, 4), 1));

    let config = AnalysisConfig {
        strict: true,
        ..AnalysisConfig::default()
    };
    let result = RegionIndex::from_records(&sample_areas(), &populations, &config);
    assert!(matches!(
        result,
        Err(AnalyticsError::UnknownRegion(code)) if code == "999999999"
    ));
}

#[test]
fn test_duplicate_population_rows_keep_first() {
    let mut populations = sample_populations();
    // Same (region, band) pair again with a different count
    populations.push(PopulationRecord::new(
        "401011001",
        AgeBand::new(0, 4),
        9999,
    ));

    let (index, report) =
        RegionIndex::from_records(&sample_areas(), &populations, &AnalysisConfig::default())
            .unwrap();

    assert_eq!(report.duplicate_population_rows, 1);
    let band_idx = index.bands().index_of(&AgeBand::new(0, 4)).unwrap();
    // Never summed, never replaced
    assert_eq!(index.sa2_band_count("401011001", band_idx), 100);
}

#[test]
fn test_duplicate_area_rows_keep_first() {
    let mut areas = sample_areas();
    areas.push(AreaRecord::new(
        "401011001",
        "Avoca Beach Again",
        "40102",
        "Wyong",
        "New South Wales",
    ));

    let (index, report) =
        RegionIndex::from_records(&areas, &sample_populations(), &AnalysisConfig::default())
            .unwrap();

    assert_eq!(report.duplicate_area_rows, 1);
    assert_eq!(index.sa3_of("401011001"), Some("40101"));
    assert_eq!(index.sa2_name("401011001"), Some("Avoca Beach"));
}

#[test]
fn test_state_name_case_is_normalized() {
    // Mixed-casing state names group under one canonical key
    let areas = vec![
        AreaRecord::new("401011001", "Avoca Beach", "40101", "Gosford", "New South Wales"),
        AreaRecord::new("401021003", "Blue Haven", "40102", "Wyong", "NEW SOUTH WALES"),
        AreaRecord::new("401021004", "Budgewoi", "40102", "Wyong", " new south wales "),
    ];
    let (index, _) = RegionIndexBuilder::new()
        .add_areas(&areas)
        .add_populations(&records_for("401011001", &[10, 10, 10, 10, 10]))
        .build()
        .unwrap();

    assert_eq!(index.states().len(), 1);
    assert_eq!(index.sa3s_in_state("new south wales"), &["40101", "40102"]);
    assert_eq!(index.state_name("new south wales"), Some("New South Wales"));
}

#[test]
fn test_deterministic_rebuild() {
    let (first, _) = RegionIndex::from_records(
        &sample_areas(),
        &sample_populations(),
        &AnalysisConfig::default(),
    )
    .unwrap();
    // Population row order must not affect totals or orderings
    let mut reversed = sample_populations();
    reversed.reverse();
    let (second, _) =
        RegionIndex::from_records(&sample_areas(), &reversed, &AnalysisConfig::default()).unwrap();

    assert_eq!(first.states(), second.states());
    for sa2 in first.sa2_codes_ordered() {
        assert_eq!(first.sa2_total(sa2), second.sa2_total(sa2));
        assert_eq!(first.distribution(sa2), second.distribution(sa2));
    }
}

#[test]
fn test_explicit_band_set_skips_unmatched_rows() {
    let bands = five_band_set();
    let mut populations = sample_populations();
    populations.push(PopulationRecord::new(
        "401011001",
        AgeBand::new(95, 99),
        7,
    ));

    let (index, report) = RegionIndexBuilder::new()
        .with_bands(bands)
        .add_areas(&sample_areas())
        .add_populations(&populations)
        .build()
        .unwrap();

    assert_eq!(report.unmatched_band_rows, 1);
    assert_eq!(index.sa2_total("401011001"), 580);
}

#[test]
fn test_region_aggregates() {
    let index = build_fixture();

    let sa3 = index.aggregate(RegionLevel::Sa3, "40101").unwrap();
    assert_eq!(sa3.total_population, 1200);
    assert_eq!(sa3.age_distribution, vec![210, 310, 305, 185, 190]);

    let state = index.aggregate(RegionLevel::State, "south australia").unwrap();
    assert_eq!(state.total_population, 1700);

    let sa2 = index.aggregate(RegionLevel::Sa2, "401011003").unwrap();
    assert_eq!(sa2.total_population, 150);

    assert!(index.aggregate(RegionLevel::Sa2, "000000000").is_none());
}
