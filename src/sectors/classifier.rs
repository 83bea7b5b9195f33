// First-match-wins sector classification.
//
// A linear scan over the ordered keyword table. Ties between sectors are
// broken by table order; this is the policy, not an accident.

use super::table::SectorKeywordTable;
use super::UNKNOWN_SECTOR;
use crate::corpus::document::Document;

/// Assign a sector to already-joined document text.
pub fn classify_text<'a>(text: &str, table: &'a SectorKeywordTable) -> &'a str {
    table
        .rules()
        .iter()
        .find(|rule| rule.keywords.iter().any(|kw| text.contains(kw.as_str())))
        .map(|rule| rule.sector.as_str())
        .unwrap_or(UNKNOWN_SECTOR)
}

/// Assign a sector to a document by matching against its joined tokens.
pub fn classify<'a>(document: &Document, table: &'a SectorKeywordTable) -> &'a str {
    classify_text(&document.joined_text(), table)
}
