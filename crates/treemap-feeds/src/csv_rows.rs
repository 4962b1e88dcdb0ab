//! CSV → [`RawRecord`] parsing with header-row semantics.
//!
//! The first row names the fields. Rows shorter than the header are allowed;
//! their missing cells are simply absent. Cells beyond the header width are
//! ignored. Blank lines are skipped by the reader.

use crate::error::LoadError;
use csv::{ReaderBuilder, Trim};
use treemap_core::RawRecord;

/// Parse a whole CSV document into raw records.
pub fn parse_rows(text: &str) -> Result<Vec<RawRecord>, LoadError> {
    let text = text.trim_start_matches('\u{feff}');

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let raw: RawRecord = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.to_string(), v.to_string()))
            .collect();
        rows.push(raw);
    }

    tracing::debug!(rows = rows.len(), columns = headers.len(), "parsed sheet CSV");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn header_row_names_fields() {
        let rows = parse_rows("lat,lng,name\n52.2,0.12,Oak\n52.3,0.13,\"Ash, old\"\n").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("name"), Some("Oak"));
        assert_eq!(rows[1].get("name"), Some("Ash, old"));
    }

    #[test]
    fn short_rows_and_blank_lines_are_tolerated() {
        let rows = parse_rows("lat,lng,name\n\n52.2,0.12\n").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("lng"), Some("0.12"));
        assert_eq!(rows[0].get("name"), None);
    }

    #[test]
    fn byte_order_mark_is_stripped() {
        let rows = parse_rows("\u{feff}lat,lng\n1,2\n").unwrap();
        assert_eq!(rows[0].get("lat"), Some("1"));
    }

    #[test]
    fn header_only_document_has_no_rows() {
        assert!(parse_rows("lat,lng\n").unwrap().is_empty());
        assert!(parse_rows("").unwrap().is_empty());
    }
}
