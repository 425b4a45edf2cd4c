//! Area entity model
//!
//! An area row places one SA2 region inside its administrative hierarchy:
//! SA2 within SA3 within state. Rows are immutable once loaded; the
//! external loader is responsible for trimming fields and parsing types.

use serde::{Deserialize, Serialize};

use crate::utils::canonical_key;

/// A single row of the areas table
///
/// Identity key is `sa2_code`. Names keep their original casing for
/// display; grouping keys are derived through [`canonical_key`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaRecord {
    /// SA2 region code (identity key)
    pub sa2_code: String,
    /// SA2 region name
    pub sa2_name: String,
    /// Code of the SA3 region containing this SA2
    pub sa3_code: String,
    /// Name of the SA3 region containing this SA2
    pub sa3_name: String,
    /// Name of the state containing this SA3
    pub state_name: String,
}

impl AreaRecord {
    /// Create a new area record
    #[must_use]
    pub fn new(
        sa2_code: impl Into<String>,
        sa2_name: impl Into<String>,
        sa3_code: impl Into<String>,
        sa3_name: impl Into<String>,
        state_name: impl Into<String>,
    ) -> Self {
        Self {
            sa2_code: sa2_code.into(),
            sa2_name: sa2_name.into(),
            sa3_code: sa3_code.into(),
            sa3_name: sa3_name.into(),
            state_name: state_name.into(),
        }
    }

    /// Canonical grouping key for the state name
    #[must_use]
    pub fn state_key(&self) -> String {
        canonical_key(&self.state_name)
    }
}
