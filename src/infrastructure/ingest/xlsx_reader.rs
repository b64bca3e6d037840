// ============================================================
// XLSX READER
// ============================================================
// Two-pass spreadsheet read: raw cells to locate the header row by
// content, then the rows below it as the data table

use std::io::Cursor;

use calamine::{Data, DataType, Reader, Xlsx};

use super::RawTable;
use crate::domain::error::{AppError, Result};
use crate::domain::directory::{ADDRESS_COLUMN, YEAR_COLUMN};

/// How many leading rows are scanned for the header before giving up.
pub const HEADER_SCAN_ROWS: usize = 50;

/// Parse XLSX bytes into a raw table. Only the first sheet is read. The
/// header row is located by the ADDRESS+YEAR token scan; when no row
/// qualifies the first row is assumed to be the header (degraded mode,
/// no error).
pub fn read_xlsx(bytes: &[u8]) -> Result<RawTable> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
        .map_err(|e| AppError::ParseError(format!("Failed to open Excel file: {}", e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AppError::ParseError("No worksheet found".to_string()))?
        .map_err(|e| AppError::ParseError(format!("Failed to read Excel range: {}", e)))?;

    let grid: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect();

    match find_header_row(&grid) {
        Some(index) => Ok(RawTable {
            headers: grid[index].clone(),
            rows: grid[index + 1..].to_vec(),
            header_confirmed: true,
        }),
        None => {
            let mut rows = grid.into_iter();
            let headers = rows.next().unwrap_or_default();
            Ok(RawTable {
                headers,
                rows: rows.collect(),
                header_confirmed: false,
            })
        }
    }
}

/// Scan at most the first `HEADER_SCAN_ROWS` rows for the first one whose
/// uppercased cells contain both the ADDRESS and YEAR tokens, in any
/// column positions.
pub fn find_header_row(grid: &[Vec<String>]) -> Option<usize> {
    grid.iter().take(HEADER_SCAN_ROWS).position(|row| {
        let cells: Vec<String> = row.iter().map(|c| c.to_uppercase()).collect();
        cells.iter().any(|c| c == ADDRESS_COLUMN) && cells.iter().any(|c| c == YEAR_COLUMN)
    })
}

/// Display text of a cell. Numeric cells render without a trailing ".0";
/// empty cells render as the empty string.
fn cell_text(cell: &Data) -> String {
    cell.as_string().unwrap_or_else(|| cell.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_header_found_at_lowest_index() {
        let grid = vec![
            row(&["City Directory Export", "", ""]),
            row(&["", "", ""]),
            row(&["Address", "Year", "Listing"]),
            row(&["ADDRESS", "YEAR", "LISTING"]),
        ];
        assert_eq!(find_header_row(&grid), Some(2));
    }

    #[test]
    fn test_header_tokens_any_case_any_position() {
        let grid = vec![row(&["Listing", "yEaR", "Notes", "aDdReSs"])];
        assert_eq!(find_header_row(&grid), Some(0));
    }

    #[test]
    fn test_both_tokens_required() {
        let grid = vec![row(&["ADDRESS", "LISTING"]), row(&["YEAR", "LISTING"])];
        assert_eq!(find_header_row(&grid), None);
    }

    #[test]
    fn test_scan_stops_after_limit() {
        let mut grid: Vec<Vec<String>> = (0..HEADER_SCAN_ROWS)
            .map(|i| row(&["noise", &i.to_string()]))
            .collect();
        grid.push(row(&["ADDRESS", "YEAR"]));
        assert_eq!(find_header_row(&grid), None);
    }

    #[test]
    fn test_cell_text_renders_numbers_plainly() {
        assert_eq!(cell_text(&Data::Float(1920.0)), "1920");
        assert_eq!(cell_text(&Data::Int(1921)), "1921");
        assert_eq!(cell_text(&Data::String("10 Elm".to_string())), "10 Elm");
        assert_eq!(cell_text(&Data::Empty), "");
    }
}
