//! Tests for age band resolution

use sa_analytics::error::AnalyticsError;
use sa_analytics::models::{AgeBand, AgeBandSet};

#[test]
fn test_standard_bands_cover_all_ages() {
    let bands = AgeBandSet::standard_abs();
    assert_eq!(bands.len(), 18);

    // Every non-negative age resolves to exactly one band
    for age in 0..=120 {
        let band = bands.resolve(age).unwrap();
        assert!(band.contains(age as u32));
        let containing = bands
            .bands()
            .iter()
            .filter(|candidate| candidate.contains(age as u32))
            .count();
        assert_eq!(containing, 1, "age {age} contained by {containing} bands");
    }
}

#[test]
fn test_resolution_boundaries() {
    let bands = AgeBandSet::standard_abs();

    assert_eq!(*bands.resolve(14).unwrap(), AgeBand::new(10, 14));
    assert_eq!(*bands.resolve(15).unwrap(), AgeBand::new(15, 19));
    assert_eq!(*bands.resolve(18).unwrap(), AgeBand::new(15, 19));
    assert_eq!(*bands.resolve(84).unwrap(), AgeBand::new(80, 84));
    assert_eq!(*bands.resolve(85).unwrap(), AgeBand::open_ended(85));
}

#[test]
fn test_negative_age_is_invalid() {
    let bands = AgeBandSet::standard_abs();
    assert!(matches!(
        bands.resolve(-5),
        Err(AnalyticsError::InvalidAge(-5))
    ));
}

#[test]
fn test_empty_band_set_is_out_of_range() {
    let bands = AgeBandSet::from_bands([]);
    assert!(matches!(
        bands.resolve(30),
        Err(AnalyticsError::AgeOutOfRange(30))
    ));
}

#[test]
fn test_band_set_orders_and_dedups() {
    let bands = AgeBandSet::from_bands([
        AgeBand::new(5, 9),
        AgeBand::new(0, 4),
        AgeBand::new(5, 9),
        AgeBand::open_ended(10),
    ]);
    assert_eq!(
        bands.bands(),
        &[
            AgeBand::new(0, 4),
            AgeBand::new(5, 9),
            AgeBand::open_ended(10)
        ]
    );
    assert_eq!(bands.index_of(&AgeBand::new(5, 9)), Some(1));
}
