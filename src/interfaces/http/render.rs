// ============================================================
// HTML RENDERING
// ============================================================
// Server-rendered result blocks, one addr-card per address

use crate::domain::directory::YearListing;

/// Escape text for interpolation into HTML element content or a quoted
/// attribute value.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render one address's grouped result as an addr-card block: header with
/// the address pill and panel kind, then a Year(s) / Occupant Listed table.
/// An empty result renders the "No results" placeholder row so the shell
/// can always show the block.
pub fn address_block(address: &str, kind: &str, rows: &[YearListing]) -> String {
    let mut rows_html = String::new();
    for row in rows {
        rows_html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td></tr>",
            row.year,
            escape_html(&row.occupants)
        ));
    }
    if rows_html.is_empty() {
        rows_html.push_str("<tr><td colspan='2' style='opacity:.7;'>No results</td></tr>");
    }

    format!(
        r#"<div class="addr-card">
  <div class="addr-header">
    City Directory Search for <span class="addr-pill">{address}</span> ({kind})
  </div>
  <table class="neat-table">
    <thead>
      <tr>
        <th>Year(s)</th>
        <th>Occupant Listed</th>
      </tr>
    </thead>
    <tbody>
      {rows_html}
    </tbody>
  </table>
</div>"#,
        address = escape_html(address),
        kind = escape_html(kind),
        rows_html = rows_html,
    )
}
