// TrendView: everything a reporting sink needs for one selection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregate::series::AggregatedSeries;
use crate::aggregate::TopicSelection;

/// A user's filter choices, as entered.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub sector: String,
    /// Empty means every year
    pub years: Vec<String>,
    /// Topic id, or -1 for all topics
    pub topic: i64,
}

impl Selection {
    pub fn all_years(sector: impl Into<String>) -> Self {
        Self {
            sector: sector.into(),
            years: Vec::new(),
            topic: TopicSelection::ALL_SENTINEL,
        }
    }
}

/// Aggregated trend data for one validated selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendView {
    pub sector: String,
    /// Years in effect: the selection, or every year the sector has when
    /// nothing was selected
    pub years: Vec<String>,
    pub topic: TopicSelection,
    pub series: AggregatedSeries,
    /// Label per topic id, for every topic in the model
    pub labels: Vec<String>,
    /// Mean probability per topic id over the selected points
    pub means: Vec<f64>,
    pub generated_at: DateTime<Utc>,
}

impl TrendView {
    /// The combined bar chart only makes sense across several years.
    pub fn wants_combined_chart(&self) -> bool {
        self.years.len() > 1 && !self.series.is_empty()
    }

    pub fn label(&self, topic: usize) -> String {
        self.labels
            .get(topic)
            .cloned()
            .unwrap_or_else(|| format!("Topic {topic}"))
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
