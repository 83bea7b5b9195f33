// Domain errors for the analysis pipeline.
//
// These are input or configuration problems, never transient faults, so
// callers surface them to the user instead of retrying.

use thiserror::Error;

/// Errors raised by the corpus, model, and selection stages.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error("corpus is empty: no documents were supplied")]
    EmptyCorpus,
    #[error("vocabulary is empty after preprocessing {documents} documents")]
    DegenerateCorpus { documents: usize },
    #[error("unknown sector '{sector}' (expected one of: {})", .valid.join(", "))]
    InvalidSector { sector: String, valid: Vec<String> },
    #[error("year '{year}' does not appear in the corpus")]
    InvalidYearSelection { year: String },
    #[error("topic {topic} is out of range (model has {num_topics} topics, -1 selects all)")]
    InvalidTopic { topic: i64, num_topics: usize },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
