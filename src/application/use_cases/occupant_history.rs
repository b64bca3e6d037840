// ============================================================
// OCCUPANT HISTORY USE CASE
// ============================================================
// The grouping engine: one address in, its year-by-year occupant
// listing out

use std::collections::BTreeMap;

use crate::domain::directory::{
    DirectoryTable, YearListing, LISTING_COLUMN, OCCUPANT_SEPARATOR, YEAR_COLUMN,
};

/// Computes the per-address grouped result for display. Pure and
/// deterministic: same table and address always yield the same rows.
pub struct OccupantHistoryUseCase;

impl OccupantHistoryUseCase {
    pub fn new() -> Self {
        Self
    }

    /// Group one address's records by year. Returns the display rows in
    /// ascending year order; an empty vec is the "no results" state, never
    /// an error.
    ///
    /// Records are matched by byte-equal normalized address. Rows without a
    /// numeric year or with a blank listing are dropped for this address
    /// only. Within a year the distinct listing texts are sorted lexically,
    /// deduplicated by exact equality, and joined with `", "`.
    pub fn group(&self, table: &DirectoryTable, address: &str) -> Vec<YearListing> {
        if !table.has_column(YEAR_COLUMN) || !table.has_column(LISTING_COLUMN) {
            return Vec::new();
        }

        let mut by_year: BTreeMap<i64, Vec<String>> = BTreeMap::new();
        for record in table.records.iter().filter(|r| r.address == address) {
            let Some(year) = record.year else {
                continue;
            };
            let listing = record.listing.trim();
            if listing.is_empty() {
                continue;
            }
            by_year.entry(year).or_default().push(listing.to_string());
        }

        by_year
            .into_iter()
            .map(|(year, mut listings)| {
                listings.sort();
                listings.dedup();
                YearListing::new(year, listings.join(OCCUPANT_SEPARATOR))
            })
            .collect()
    }
}

impl Default for OccupantHistoryUseCase {
    fn default() -> Self {
        Self::new()
    }
}
