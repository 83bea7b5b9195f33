// JSON export of trend views, one pretty-printed document per selection.

use std::io::Write;

use anyhow::{Context, Result};

use super::ReportSink;
use crate::pipeline::view::TrendView;

/// Writes each view as JSON to any writer (stdout in the CLI).
pub struct JsonSink<W: Write> {
    out: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for JsonSink<W> {
    fn render(&mut self, view: &TrendView) -> Result<()> {
        let json = view.to_json().context("Failed to serialize trend view")?;
        writeln!(self.out, "{json}")?;
        Ok(())
    }
}
