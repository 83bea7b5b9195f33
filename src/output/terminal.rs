// Colored terminal charts for topic trends.
//
// Rendering builds a String so the layout can be checked in tests; the sink
// just prints it. Empty selections produce a warning line, never a panic.

use anyhow::Result;
use colored::Colorize;

use super::{truncate_chars, ReportSink};
use crate::pipeline::view::TrendView;

const BAR_WIDTH: usize = 20;
const LABEL_WIDTH: usize = 48;

/// Prints trend views to stdout.
#[derive(Debug, Default)]
pub struct TerminalSink;

impl ReportSink for TerminalSink {
    fn render(&mut self, view: &TrendView) -> Result<()> {
        print!("{}", render_view(view));
        Ok(())
    }
}

/// Full report for one view: trend rows, then the combined chart or a warning.
pub fn render_view(view: &TrendView) -> String {
    let mut out = String::new();
    let title = format!("=== Topic Trends - {} ===", capitalize(&view.sector));
    out.push_str(&format!("\n{}\n", title.bold()));

    let years = if view.years.is_empty() {
        "none".to_string()
    } else {
        view.years.join(", ")
    };
    out.push_str(&format!("  Years: {}\n", years.dimmed()));
    out.push('\n');

    if view.series.is_empty() {
        out.push_str(&format!(
            "  {} No topic data for sector '{}' in the selected years.\n",
            "Warning:".yellow(),
            view.sector
        ));
        return out;
    }

    out.push_str(&render_trends(view));

    if view.wants_combined_chart() {
        out.push_str(&render_combined(view));
    } else {
        out.push_str(&format!(
            "  {} No data for combined chart. Select multiple years or check data.\n",
            "Warning:".yellow()
        ));
    }
    out
}

/// One block per topic: its label, then a bar per (year, probability) point.
pub fn render_trends(view: &TrendView) -> String {
    let mut out = String::new();
    for (&topic, points) in &view.series.topics {
        let label = truncate_chars(&view.label(topic), LABEL_WIDTH);
        out.push_str(&format!("  {}\n", label.bold()));
        for (year, prob) in points {
            out.push_str(&format!("    {:<12} {} {:.3}\n", year, bar(*prob), prob));
        }
        out.push('\n');
    }
    out
}

/// Mean probability per topic across the selected years.
pub fn render_combined(view: &TrendView) -> String {
    let mut out = String::new();
    let title = format!(
        "=== Combined Topic Probabilities - {} ===",
        capitalize(&view.sector)
    );
    out.push_str(&format!("{}\n", title.bold()));
    for (topic, mean) in view.means.iter().enumerate() {
        if !view.topic.includes(topic) {
            continue;
        }
        let label = truncate_chars(&view.label(topic), LABEL_WIDTH);
        out.push_str(&format!(
            "  {:<width$} {} {:.3}\n",
            label,
            bar(*mean),
            mean,
            width = LABEL_WIDTH + 3
        ));
    }
    out.push('\n');
    out
}

fn bar(prob: f64) -> colored::ColoredString {
    let filled = ((prob.clamp(0.0, 1.0)) * BAR_WIDTH as f64).round() as usize;
    let empty = BAR_WIDTH.saturating_sub(filled);
    let bar = format!("[{}{}]", "=".repeat(filled), " ".repeat(empty));
    if prob >= 0.5 {
        bar.bright_green()
    } else if prob >= 0.2 {
        bar.bright_yellow()
    } else {
        bar.bright_blue()
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
