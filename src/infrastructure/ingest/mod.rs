// ============================================================
// INGEST INFRASTRUCTURE LAYER
// ============================================================
// File readers turning uploaded bytes into an untyped rectangular table

mod csv_reader;
mod xlsx_reader;

pub use csv_reader::read_csv;
pub use xlsx_reader::{find_header_row, read_xlsx, HEADER_SCAN_ROWS};

/// An untyped table straight off the file reader: header names as the file
/// claims them, every data cell as text. Carries no invariants;
/// canonicalization happens in the import use case.
#[derive(Debug, Clone)]
pub struct RawTable {
    /// Column names from the header row, untrimmed.
    pub headers: Vec<String>,

    /// Data rows below the header, one `Vec<String>` per row. Rows may be
    /// shorter or longer than the header; missing cells read as empty.
    pub rows: Vec<Vec<String>>,

    /// True when the header row was located by the ADDRESS+YEAR token scan,
    /// false when it was assumed positionally (CSV, or the degraded
    /// spreadsheet fallback). The import use case filters blank-YEAR rows
    /// only on confirmed tables.
    pub header_confirmed: bool,
}
