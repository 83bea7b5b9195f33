// Aggregation: group per-document topic probabilities by sector and year.

pub mod series;

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::corpus::document::Document;
use crate::error::PipelineError;
use crate::model::traits::{TopicDistribution, TopicModel};

/// One classified document's contribution to the trend data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentTopics {
    pub id: String,
    pub year: String,
    pub topics: TopicDistribution,
}

/// Sector → that sector's documents, in corpus order.
pub type SectorData = BTreeMap<String, Vec<DocumentTopics>>;

/// Which topics a view covers. `-1` on the command line means all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TopicSelection {
    All,
    Topic(usize),
}

impl TopicSelection {
    pub const ALL_SENTINEL: i64 = -1;

    /// Parse the `-1`-or-topic-id form, checking the id against the model size.
    pub fn from_sentinel(value: i64, num_topics: usize) -> Result<Self, PipelineError> {
        if value == Self::ALL_SENTINEL {
            return Ok(Self::All);
        }
        match usize::try_from(value) {
            Ok(t) if t < num_topics => Ok(Self::Topic(t)),
            _ => Err(PipelineError::InvalidTopic {
                topic: value,
                num_topics,
            }),
        }
    }

    pub fn includes(&self, topic: usize) -> bool {
        match self {
            Self::All => true,
            Self::Topic(t) => *t == topic,
        }
    }
}

/// Pair each document with its sector and topic distribution.
///
/// `sectors` and the model's distributions are both indexed like `documents`.
pub fn build_sector_data(
    documents: &[Document],
    sectors: &[String],
    model: &TopicModel,
) -> SectorData {
    let mut data = SectorData::new();
    for (i, (doc, sector)) in documents.iter().zip(sectors).enumerate() {
        data.entry(sector.clone()).or_default().push(DocumentTopics {
            id: doc.id.clone(),
            year: doc.year.clone(),
            topics: model.distribution(i).cloned().unwrap_or_default(),
        });
    }
    data
}

/// Sorted distinct years present in a sector's documents.
pub fn available_years(entries: &[DocumentTopics]) -> Vec<String> {
    entries
        .iter()
        .map(|e| e.year.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(year: &str) -> DocumentTopics {
        DocumentTopics {
            id: format!("{year}_doc.txt"),
            year: year.to_string(),
            topics: vec![],
        }
    }

    #[test]
    fn test_available_years_sorted_and_unique() {
        let entries = vec![entry("2017-18"), entry("2015-16"), entry("2017-18")];
        assert_eq!(available_years(&entries), vec!["2015-16", "2017-18"]);
    }

    #[test]
    fn test_topic_selection_sentinel() {
        assert_eq!(TopicSelection::from_sentinel(-1, 5), Ok(TopicSelection::All));
        assert_eq!(TopicSelection::from_sentinel(4, 5), Ok(TopicSelection::Topic(4)));
        assert!(TopicSelection::from_sentinel(5, 5).is_err());
        assert!(TopicSelection::from_sentinel(-2, 5).is_err());
    }

    #[test]
    fn test_build_sector_data_groups_in_corpus_order() {
        let docs = vec![
            Document::new("2015-16_a.txt", "solar"),
            Document::new("2016-17_b.txt", "metro"),
            Document::new("2017-18_c.txt", "solar"),
        ];
        let sectors = vec![
            "energy".to_string(),
            "transport".to_string(),
            "energy".to_string(),
        ];
        let model = TopicModel {
            num_topics: 1,
            topics: vec![],
            document_topics: vec![vec![(0, 0.9)], vec![(0, 0.5)], vec![(0, 0.7)]],
        };

        let data = build_sector_data(&docs, &sectors, &model);
        let energy = &data["energy"];
        assert_eq!(energy.len(), 2);
        assert_eq!(energy[0].year, "2015-16");
        assert_eq!(energy[1].topics, vec![(0, 0.7)]);
        assert_eq!(data["transport"][0].id, "2016-17_b.txt");
    }
}
