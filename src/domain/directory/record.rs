// ============================================================
// DIRECTORY RECORD
// ============================================================
// One canonical row of an imported city-directory export

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single canonical row: one occupant listing at one address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryRecord {
    /// Normalized address. Never empty: rows whose address could not be
    /// resolved (even by forward-fill) are discarded at import time.
    pub address: String,

    /// Directory year, when the YEAR cell held something numeric.
    pub year: Option<i64>,

    /// Free-text occupant listing, possibly empty.
    pub listing: String,

    /// Passthrough cells from any other column, keyed by uppercased
    /// column name, values preserved unchanged.
    pub extra: BTreeMap<String, String>,
}

impl DirectoryRecord {
    pub fn new(address: String, year: Option<i64>, listing: String) -> Self {
        Self {
            address,
            year,
            listing,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_extra(mut self, extra: BTreeMap<String, String>) -> Self {
        self.extra = extra;
        self
    }
}

/// Collapse internal whitespace runs to single spaces and strip the ends.
/// Two addresses refer to the same property iff their normalized forms are
/// byte-equal (case-sensitive). Idempotent.
pub fn normalize_address(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Coerce a year cell to an integer. Accepts plain integers and the float
/// forms spreadsheets produce for numeric cells ("1920.0"). Blank or
/// non-numeric text yields `None`, never an error.
pub fn parse_year(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(year) = trimmed.parse::<i64>() {
        return Some(year);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(|f| f as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize_address("  123   Main   St "), "123 Main St");
        assert_eq!(normalize_address("10\tElm\n Ave"), "10 Elm Ave");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in ["  123   Main   St ", "456 Oak", "", "   ", "a  b"] {
            let once = normalize_address(raw);
            assert_eq!(normalize_address(&once), once);
        }
    }

    #[test]
    fn test_normalize_is_case_sensitive() {
        assert_ne!(normalize_address("10 elm"), normalize_address("10 Elm"));
    }

    #[test]
    fn test_parse_year_integers_and_floats() {
        assert_eq!(parse_year("1920"), Some(1920));
        assert_eq!(parse_year(" 1921 "), Some(1921));
        assert_eq!(parse_year("1920.0"), Some(1920));
    }

    #[test]
    fn test_parse_year_rejects_non_numeric() {
        assert_eq!(parse_year("unk"), None);
        assert_eq!(parse_year(""), None);
        assert_eq!(parse_year("   "), None);
        assert_eq!(parse_year("c. 1920"), None);
    }
}
