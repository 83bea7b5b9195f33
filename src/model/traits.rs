// Topic trainer trait: the seam between the pipeline and the model.
//
// The LDA trainer is stochastic; tests swap in a deterministic trainer
// through this trait so aggregation and reporting can be checked exactly.

use serde::{Deserialize, Serialize};

use crate::corpus::document::Document;
use crate::error::PipelineError;

/// Sparse topic distribution for one document: (topic id, probability),
/// sorted by topic id. Pruned entries are absent, so the sum may be < 1.
pub type TopicDistribution = Vec<(usize, f64)>;

/// One topic's description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicSummary {
    pub id: usize,
    /// `Topic {id}: 0.045*"energy" + ...`
    pub label: String,
    /// Highest-weight terms, descending
    pub top_terms: Vec<(String, f64)>,
}

/// A fitted topic model over one corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicModel {
    pub num_topics: usize,
    pub topics: Vec<TopicSummary>,
    /// One distribution per input document, in corpus order
    pub document_topics: Vec<TopicDistribution>,
}

impl TopicModel {
    pub fn label(&self, topic: usize) -> Option<&str> {
        self.topics.get(topic).map(|t| t.label.as_str())
    }

    pub fn labels(&self) -> Vec<String> {
        self.topics.iter().map(|t| t.label.clone()).collect()
    }

    pub fn distribution(&self, document: usize) -> Option<&TopicDistribution> {
        self.document_topics.get(document)
    }
}

/// Build a label in the `Topic {id}: w*"term" + ...` form.
pub fn format_topic_label(id: usize, terms: &[(String, f64)]) -> String {
    let body: Vec<String> = terms
        .iter()
        .map(|(term, weight)| format!("{weight:.3}*\"{term}\""))
        .collect();
    format!("Topic {id}: {}", body.join(" + "))
}

/// Fits a topic model over a tokenized corpus.
pub trait TopicTrainer {
    fn train(&self, documents: &[Document]) -> Result<TopicModel, PipelineError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_topic_label() {
        let label = format_topic_label(
            2,
            &[("energy".to_string(), 0.0451), ("solar".to_string(), 0.03)],
        );
        assert_eq!(label, "Topic 2: 0.045*\"energy\" + 0.030*\"solar\"");
    }

    #[test]
    fn test_label_lookup_out_of_range() {
        let model = TopicModel {
            num_topics: 1,
            topics: vec![TopicSummary {
                id: 0,
                label: "Topic 0: ".to_string(),
                top_terms: vec![],
            }],
            document_topics: vec![],
        };
        assert_eq!(model.label(0), Some("Topic 0: "));
        assert_eq!(model.label(1), None);
        assert!(model.distribution(0).is_none());
    }
}
