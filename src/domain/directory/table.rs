// ============================================================
// DIRECTORY TABLE
// ============================================================
// The canonical table held in memory for one session

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::DirectoryRecord;

pub const ADDRESS_COLUMN: &str = "ADDRESS";
pub const YEAR_COLUMN: &str = "YEAR";
pub const LISTING_COLUMN: &str = "LISTING";

/// The canonical, column-named row set produced by ingestion, independent
/// of the source file format. Rebuilt fresh per upload, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryTable {
    /// Uppercased, trimmed column names in source order.
    pub columns: Vec<String>,

    /// Canonical records, source order preserved.
    pub records: Vec<DirectoryRecord>,
}

/// Counts reported to the shell after a successful import.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LoadSummary {
    pub rows: usize,
    pub addresses: usize,
}

impl DirectoryTable {
    pub fn new(columns: Vec<String>, records: Vec<DirectoryRecord>) -> Self {
        Self { columns, records }
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    /// Distinct normalized addresses, sorted. Addresses are never empty, so
    /// this is exactly the pick-list the shell offers.
    pub fn addresses(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.address.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn summary(&self) -> LoadSummary {
        LoadSummary {
            rows: self.row_count(),
            addresses: self.addresses().len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> DirectoryTable {
        DirectoryTable::new(
            vec![ADDRESS_COLUMN.to_string(), YEAR_COLUMN.to_string()],
            vec![
                DirectoryRecord::new("456 Oak".into(), Some(1920), String::new()),
                DirectoryRecord::new("123 Main".into(), Some(1920), String::new()),
                DirectoryRecord::new("123 Main".into(), Some(1921), String::new()),
            ],
        )
    }

    #[test]
    fn test_addresses_sorted_and_distinct() {
        assert_eq!(table().addresses(), vec!["123 Main", "456 Oak"]);
    }

    #[test]
    fn test_summary_counts() {
        let summary = table().summary();
        assert_eq!(summary.rows, 3);
        assert_eq!(summary.addresses, 2);
    }

    #[test]
    fn test_has_column() {
        let t = table();
        assert!(t.has_column(ADDRESS_COLUMN));
        assert!(t.has_column(YEAR_COLUMN));
        assert!(!t.has_column(LISTING_COLUMN));
    }
}
