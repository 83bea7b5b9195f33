// Analysis: the trained, read-only state behind every trend view.

use std::collections::BTreeSet;

use anyhow::Result;
use chrono::Utc;
use tracing::{info, warn};

use super::view::{Selection, TrendView};
use crate::aggregate::series::{aggregate, combined_means};
use crate::aggregate::{available_years, build_sector_data, DocumentTopics, SectorData, TopicSelection};
use crate::corpus::document::load_documents;
use crate::corpus::provider::CorpusProvider;
use crate::error::PipelineError;
use crate::model::traits::{TopicModel, TopicTrainer};
use crate::sectors::classifier::classify;
use crate::sectors::table::SectorKeywordTable;

/// A classified corpus with its fitted topic model.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub table: SectorKeywordTable,
    pub model: TopicModel,
    pub sector_data: SectorData,
    pub document_count: usize,
    corpus_years: BTreeSet<String>,
}

/// Fetch the corpus from `provider` and run the full pipeline.
pub fn run(
    provider: &dyn CorpusProvider,
    table: SectorKeywordTable,
    trainer: &dyn TopicTrainer,
) -> Result<Analysis> {
    let items = provider.fetch()?;
    Ok(analyze(items, table, trainer)?)
}

/// Tokenize, classify, and train over (identifier, text) pairs.
pub fn analyze<S, T>(
    items: Vec<(S, T)>,
    table: SectorKeywordTable,
    trainer: &dyn TopicTrainer,
) -> Result<Analysis, PipelineError>
where
    S: Into<String>,
    T: AsRef<str>,
{
    let documents = load_documents(items)?;

    let sectors: Vec<String> = documents
        .iter()
        .map(|doc| classify(doc, &table).to_string())
        .collect();

    let model = trainer.train(&documents)?;
    if model.document_topics.len() != documents.len() {
        return Err(PipelineError::InvalidConfig(format!(
            "trainer returned {} distributions for {} documents",
            model.document_topics.len(),
            documents.len()
        )));
    }

    let sector_data = build_sector_data(&documents, &sectors, &model);
    let corpus_years = documents.iter().map(|d| d.year.clone()).collect();

    for (sector, entries) in &sector_data {
        info!(sector = %sector, documents = entries.len(), "Classified sector");
    }

    Ok(Analysis {
        table,
        model,
        sector_data,
        document_count: documents.len(),
        corpus_years,
    })
}

impl Analysis {
    /// A sector's documents; empty for a valid sector nothing matched.
    pub fn sector_entries(&self, sector: &str) -> &[DocumentTopics] {
        self.sector_data
            .get(sector)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Document count for every selectable sector, in table order.
    pub fn sector_counts(&self) -> Vec<(String, usize)> {
        self.table
            .sector_names()
            .into_iter()
            .map(|s| {
                let n = self.sector_entries(&s).len();
                (s, n)
            })
            .collect()
    }

    pub fn years_for(&self, sector: &str) -> Vec<String> {
        available_years(self.sector_entries(sector))
    }

    /// Validate a selection and aggregate the matching trend data.
    pub fn select(&self, selection: &Selection) -> Result<TrendView, PipelineError> {
        let sector = self.table.resolve(&selection.sector)?;
        let topic = TopicSelection::from_sentinel(selection.topic, self.model.num_topics)?;

        let mut selected: Vec<String> = Vec::new();
        for year in &selection.years {
            let year = year.trim();
            if !self.corpus_years.contains(year) {
                return Err(PipelineError::InvalidYearSelection {
                    year: year.to_string(),
                });
            }
            if !selected.iter().any(|y| y == year) {
                selected.push(year.to_string());
            }
        }

        let entries = self.sector_entries(&sector);
        let series = aggregate(entries, &selected).restrict(topic);
        let means = combined_means(&series, self.model.num_topics);

        if series.is_empty() {
            warn!(sector = %sector, years = ?selected, "No topic data for selection");
        }

        let years = if selected.is_empty() {
            available_years(entries)
        } else {
            selected
        };

        Ok(TrendView {
            sector,
            years,
            topic,
            series,
            labels: self.model.labels(),
            means,
            generated_at: Utc::now(),
        })
    }
}
