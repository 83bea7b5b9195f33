// Reporting sinks: terminal charts and JSON export for trend views.

pub mod json;
pub mod terminal;

use anyhow::Result;

use crate::pipeline::view::TrendView;

/// Consumes one trend view per user selection.
pub trait ReportSink {
    fn render(&mut self, view: &TrendView) -> Result<()>;
}

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Topic labels can run long; this keeps chart rows aligned without slicing
/// through a multi-byte character.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}
