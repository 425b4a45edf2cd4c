//! Age band definitions and resolution
//!
//! An age band is a contiguous, non-overlapping range of ages used as the
//! unit of population counting. Band sets are ordered by lower bound; the
//! last band may be open-ended ("85 and over").

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AnalyticsError, Result};

/// A contiguous range of ages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgeBand {
    /// Inclusive lower bound
    pub lower: u32,
    /// Inclusive upper bound; `None` for an open-ended band
    pub upper: Option<u32>,
}

impl AgeBand {
    /// Create a bounded band covering `lower..=upper`
    #[must_use]
    pub const fn new(lower: u32, upper: u32) -> Self {
        Self {
            lower,
            upper: Some(upper),
        }
    }

    /// Create an open-ended band covering `lower` and above
    #[must_use]
    pub const fn open_ended(lower: u32) -> Self {
        Self { lower, upper: None }
    }

    /// Whether the band contains the given age
    #[must_use]
    pub fn contains(&self, age: u32) -> bool {
        age >= self.lower && self.upper.is_none_or(|upper| age <= upper)
    }

    /// Display label for the band, e.g. "15-19" or "85+"
    #[must_use]
    pub fn label(&self) -> String {
        match self.upper {
            Some(upper) => format!("{}-{}", self.lower, upper),
            None => format!("{}+", self.lower),
        }
    }
}

impl fmt::Display for AgeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// An ordered, deduplicated set of age bands
///
/// The set defines the band ordering shared by every age-distribution
/// vector in the index, so pairwise statistics always compare counts for
/// the same band at the same position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeBandSet {
    bands: Vec<AgeBand>,
}

impl AgeBandSet {
    /// Build a band set from arbitrary bands, sorting by lower bound and
    /// dropping duplicates
    pub fn from_bands(bands: impl IntoIterator<Item = AgeBand>) -> Self {
        let mut bands: Vec<AgeBand> = bands.into_iter().collect();
        bands.sort();
        bands.dedup();
        Self { bands }
    }

    /// The standard ABS five-year band table: 0-4, 5-9, ..., 80-84, 85+
    #[must_use]
    pub fn standard_abs() -> Self {
        let mut bands: Vec<AgeBand> = (0..85).step_by(5).map(|lower| AgeBand::new(lower, lower + 4)).collect();
        bands.push(AgeBand::open_ended(85));
        Self { bands }
    }

    /// Resolve the band containing the given age.
    ///
    /// Bands are sorted and non-overlapping, so a binary search over the
    /// lower bounds finds the unique candidate.
    ///
    /// # Errors
    /// * `InvalidAge` for a negative age
    /// * `AgeOutOfRange` when no band contains the age
    pub fn resolve(&self, age: i64) -> Result<&AgeBand> {
        let age = u32::try_from(age).map_err(|_| AnalyticsError::InvalidAge(age))?;
        let idx = self.bands.partition_point(|band| band.lower <= age);
        if idx == 0 {
            return Err(AnalyticsError::AgeOutOfRange(age));
        }
        let candidate = &self.bands[idx - 1];
        if candidate.contains(age) {
            Ok(candidate)
        } else {
            Err(AnalyticsError::AgeOutOfRange(age))
        }
    }

    /// Position of a band within the set's ordering
    #[must_use]
    pub fn index_of(&self, band: &AgeBand) -> Option<usize> {
        self.bands.binary_search(band).ok()
    }

    /// The bands in ascending order
    #[must_use]
    pub fn bands(&self) -> &[AgeBand] {
        &self.bands
    }

    /// Number of bands in the set
    #[must_use]
    pub fn len(&self) -> usize {
        self.bands.len()
    }

    /// Whether the set contains no bands
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }
}
