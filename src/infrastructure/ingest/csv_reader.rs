// ============================================================
// CSV READER
// ============================================================
// Parse delimited-text uploads with encoding detection

use csv::ReaderBuilder;

use super::RawTable;
use crate::domain::error::{AppError, Result};

/// Parse CSV bytes into a raw table. The first row is the header; the
/// header is positional, never token-confirmed, so no row filtering is
/// applied downstream.
pub fn read_csv(bytes: &[u8]) -> Result<RawTable> {
    let content = decode_text(bytes);

    let mut reader = ReaderBuilder::new()
        .flexible(true) // Allow rows with different lengths
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {}", e)))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result.map_err(|e| {
            AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
        })?;
        rows.push(record.iter().map(|field| field.to_string()).collect());
    }

    Ok(RawTable {
        headers,
        rows,
        header_confirmed: false,
    })
}

/// Decode upload bytes to text: strip a UTF-8 BOM, try UTF-8, fall back to
/// Windows-1252 for legacy spreadsheet exports.
fn decode_text(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(b"\xef\xbb\xbf").unwrap_or(bytes);

    match std::str::from_utf8(bytes) {
        Ok(content) => content.to_string(),
        Err(_) => {
            let (content, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            content.into_owned()
        }
    }
}
