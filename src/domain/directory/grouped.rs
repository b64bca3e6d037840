// ============================================================
// GROUPED RESULT
// ============================================================
// Per-address, per-year deduplicated occupant listing for display

use serde::{Deserialize, Serialize};

/// Separator between distinct occupant listings within one year.
pub const OCCUPANT_SEPARATOR: &str = ", ";

/// One display row of a grouped result: a year and the combined occupant
/// listings for it. A grouped result is a `Vec<YearListing>` sorted
/// ascending by year; empty means "no results", not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearListing {
    pub year: i64,
    pub occupants: String,
}

impl YearListing {
    pub fn new(year: i64, occupants: impl Into<String>) -> Self {
        Self {
            year,
            occupants: occupants.into(),
        }
    }
}
