// ============================================================
// IMPORT DIRECTORY USE CASE
// ============================================================
// Orchestrate file parsing and canonicalization into a DirectoryTable

use std::collections::BTreeMap;

use tracing::debug;

use crate::domain::directory::{
    normalize_address, parse_year, DirectoryRecord, DirectoryTable, ADDRESS_COLUMN,
    LISTING_COLUMN, YEAR_COLUMN,
};
use crate::domain::error::{AppError, Result};
use crate::infrastructure::ingest::{read_csv, read_xlsx, RawTable};

/// Turns an uploaded file of unknown internal layout into the canonical
/// table the rest of the session runs against.
pub struct ImportDirectoryUseCase;

impl ImportDirectoryUseCase {
    pub fn new() -> Self {
        Self
    }

    /// Parse and canonicalize an upload. The parse path is chosen by file
    /// extension; anything but `.csv`/`.xlsx` is rejected up front.
    ///
    /// A missing ADDRESS column is fatal for the whole session. Malformed
    /// individual cells never fail the import: unparseable years and empty
    /// listings survive here and are excluded by the grouping engine.
    pub fn import(&self, file_name: &str, bytes: &[u8]) -> Result<DirectoryTable> {
        let lower = file_name.to_lowercase();
        let raw = if lower.ends_with(".csv") {
            read_csv(bytes)?
        } else if lower.ends_with(".xlsx") {
            read_xlsx(bytes)?
        } else {
            return Err(AppError::ValidationError(format!(
                "Unsupported file type: {} (expected .csv or .xlsx)",
                file_name
            )));
        };

        debug!(
            rows = raw.rows.len(),
            header_confirmed = raw.header_confirmed,
            "parsed raw table"
        );

        self.canonicalize(raw)
    }

    /// Apply the canonicalization pipeline to a raw table:
    /// uppercase/trim column names, filter blank-YEAR rows on
    /// confirmed-header tables, forward-fill and normalize addresses,
    /// coerce years, discard rows with no resolvable address.
    fn canonicalize(&self, raw: RawTable) -> Result<DirectoryTable> {
        let columns: Vec<String> = raw
            .headers
            .iter()
            .map(|h| h.trim().to_uppercase())
            .collect();

        let address_idx = columns
            .iter()
            .position(|c| c == ADDRESS_COLUMN)
            .ok_or(AppError::MissingAddressColumn)?;
        let year_idx = columns.iter().position(|c| c == YEAR_COLUMN);
        let listing_idx = columns.iter().position(|c| c == LISTING_COLUMN);

        // Forward-fill carries the raw (pre-normalization) cell text, so a
        // repeated address normalizes identically to its first occurrence.
        let mut last_address: Option<String> = None;
        let mut records = Vec::new();

        for row in &raw.rows {
            let cell = |idx: usize| row.get(idx).map(String::as_str).unwrap_or("");

            // Blank-YEAR rows are noise once the header was token-confirmed.
            // The filter runs before forward-fill, so a dropped row's
            // address never propagates downward. CSV and degraded-header
            // tables keep these rows.
            if raw.header_confirmed {
                if let Some(idx) = year_idx {
                    if cell(idx).trim().is_empty() {
                        continue;
                    }
                }
            }

            let raw_address = cell(address_idx);
            if !raw_address.trim().is_empty() {
                last_address = Some(raw_address.to_string());
            }
            let address = normalize_address(last_address.as_deref().unwrap_or(""));
            if address.is_empty() {
                continue;
            }

            let year = year_idx.and_then(|idx| parse_year(cell(idx)));
            let listing = listing_idx.map(|idx| cell(idx).to_string()).unwrap_or_default();

            let mut extra = BTreeMap::new();
            for (idx, name) in columns.iter().enumerate() {
                if idx == address_idx || Some(idx) == year_idx || Some(idx) == listing_idx {
                    continue;
                }
                extra.insert(name.clone(), cell(idx).to_string());
            }

            records.push(DirectoryRecord::new(address, year, listing).with_extra(extra));
        }

        Ok(DirectoryTable::new(columns, records))
    }
}

impl Default for ImportDirectoryUseCase {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(headers: &[&str], rows: &[&[&str]], header_confirmed: bool) -> RawTable {
        RawTable {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
            header_confirmed,
        }
    }

    #[test]
    fn test_import_csv_bytes() {
        let content = b"Address,Year,Listing\n10 Elm,1920,Baker R\n10 Elm,1921,Cole T";
        let table = ImportDirectoryUseCase::new()
            .import("directory.csv", content)
            .unwrap();

        assert_eq!(table.columns, vec!["ADDRESS", "YEAR", "LISTING"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.records[0].address, "10 Elm");
        assert_eq!(table.records[0].year, Some(1920));
    }

    #[test]
    fn test_unsupported_extension_rejected() {
        let err = ImportDirectoryUseCase::new()
            .import("directory.pdf", b"whatever")
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn test_missing_address_column_is_fatal() {
        let err = ImportDirectoryUseCase::new()
            .import("directory.csv", b"Street,Year\n10 Elm,1920")
            .unwrap_err();
        assert!(matches!(err, AppError::MissingAddressColumn));
    }

    #[test]
    fn test_column_names_uppercased_and_trimmed() {
        let table = ImportDirectoryUseCase::new()
            .canonicalize(raw(
                &[" address ", "Year", "listing", "Notes"],
                &[&["10 Elm", "1920", "Baker R", "corner lot"]],
                false,
            ))
            .unwrap();

        assert_eq!(table.columns, vec!["ADDRESS", "YEAR", "LISTING", "NOTES"]);
        assert_eq!(table.records[0].extra["NOTES"], "corner lot");
    }

    #[test]
    fn test_forward_fill_addresses() {
        let table = ImportDirectoryUseCase::new()
            .canonicalize(raw(
                &["ADDRESS", "YEAR"],
                &[
                    &["123 Main", "1920"],
                    &["", "1921"],
                    &["", "1922"],
                    &["456 Oak", "1923"],
                ],
                false,
            ))
            .unwrap();

        let addresses: Vec<&str> = table.records.iter().map(|r| r.address.as_str()).collect();
        assert_eq!(addresses, vec!["123 Main", "123 Main", "123 Main", "456 Oak"]);
    }

    #[test]
    fn test_addresses_normalized() {
        let table = ImportDirectoryUseCase::new()
            .canonicalize(raw(
                &["ADDRESS"],
                &[&["  123   Main   St "], &[""]],
                false,
            ))
            .unwrap();

        assert_eq!(table.records[0].address, "123 Main St");
        // the blank row fills from the previous one
        assert_eq!(table.records[1].address, "123 Main St");
    }

    #[test]
    fn test_leading_blank_addresses_discarded() {
        let table = ImportDirectoryUseCase::new()
            .canonicalize(raw(
                &["ADDRESS", "YEAR"],
                &[&["", "1920"], &["  ", "1921"], &["10 Elm", "1922"]],
                false,
            ))
            .unwrap();

        assert_eq!(table.row_count(), 1);
        assert_eq!(table.records[0].address, "10 Elm");
    }

    #[test]
    fn test_confirmed_header_drops_blank_year_rows() {
        let table = ImportDirectoryUseCase::new()
            .canonicalize(raw(
                &["ADDRESS", "YEAR", "LISTING"],
                &[
                    &["10 Elm", "1920", "Baker R"],
                    &["11 Elm", "", "Cole T"],
                    &["12 Elm", "  ", "Dane F"],
                ],
                true,
            ))
            .unwrap();

        assert_eq!(table.row_count(), 1);
        assert_eq!(table.records[0].address, "10 Elm");
    }

    #[test]
    fn test_unconfirmed_header_keeps_blank_year_rows() {
        let table = ImportDirectoryUseCase::new()
            .canonicalize(raw(
                &["ADDRESS", "YEAR", "LISTING"],
                &[&["10 Elm", "1920", "Baker R"], &["11 Elm", "", "Cole T"]],
                false,
            ))
            .unwrap();

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.records[1].year, None);
    }

    #[test]
    fn test_blank_year_filter_runs_before_forward_fill() {
        // The dropped row's address must not propagate into the blank
        // address below it; the fill source is the last *kept* row.
        let table = ImportDirectoryUseCase::new()
            .canonicalize(raw(
                &["ADDRESS", "YEAR"],
                &[
                    &["10 Elm", "1920"],
                    &["11 Elm", ""],
                    &["", "1921"],
                ],
                true,
            ))
            .unwrap();

        let addresses: Vec<&str> = table.records.iter().map(|r| r.address.as_str()).collect();
        assert_eq!(addresses, vec!["10 Elm", "10 Elm"]);
    }

    #[test]
    fn test_unparseable_year_tolerated() {
        let table = ImportDirectoryUseCase::new()
            .canonicalize(raw(
                &["ADDRESS", "YEAR", "LISTING"],
                &[&["10 Elm", "unk", "Smith J"]],
                true,
            ))
            .unwrap();

        assert_eq!(table.row_count(), 1);
        assert_eq!(table.records[0].year, None);
        assert_eq!(table.records[0].listing, "Smith J");
    }

    #[test]
    fn test_short_rows_read_as_empty_cells() {
        let table = ImportDirectoryUseCase::new()
            .canonicalize(raw(
                &["ADDRESS", "YEAR", "LISTING"],
                &[&["10 Elm", "1920"]],
                false,
            ))
            .unwrap();

        assert_eq!(table.records[0].listing, "");
    }
}
