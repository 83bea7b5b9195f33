// Document: a tokenized corpus entry with its derived year.
//
// Identifiers follow `<year-or-yearrange>_<freeform>.txt`. The year is the
// text before the first underscore; identifiers without one fall into the
// `unknown_year` bucket.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::PipelineError;

/// Year bucket for identifiers with no `_` separator.
pub const UNKNOWN_YEAR: &str = "unknown_year";

/// A single tokenized document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Source name, usually the file name
    pub id: String,
    /// Lowercase tokens in reading order
    pub tokens: Vec<String>,
    /// Year or year range parsed from the identifier
    pub year: String,
}

impl Document {
    /// Tokenize `text` and derive the year from `id`.
    pub fn new(id: impl Into<String>, text: &str) -> Self {
        let id = id.into();
        let year = parse_year(&id);
        Self {
            tokens: tokenize(text),
            year,
            id,
        }
    }

    /// Tokens joined with single spaces, the form keyword rules match against.
    pub fn joined_text(&self) -> String {
        self.tokens.join(" ")
    }
}

/// Lowercase `text` and split it on whitespace and punctuation.
///
/// A token is a maximal run of alphanumeric characters in any script, so
/// accented and non-Latin words stay whole.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Extract the year prefix from an identifier like `2015-16_energy_plan.txt`.
pub fn parse_year(id: &str) -> String {
    match id.split_once('_') {
        Some((year, _)) => year.to_string(),
        None => UNKNOWN_YEAR.to_string(),
    }
}

/// Turn (identifier, raw text) pairs into documents, preserving input order.
///
/// Topic modeling is undefined on an empty corpus, so zero inputs is an error.
pub fn load_documents<I, S, T>(items: I) -> Result<Vec<Document>, PipelineError>
where
    I: IntoIterator<Item = (S, T)>,
    S: Into<String>,
    T: AsRef<str>,
{
    let documents: Vec<Document> = items
        .into_iter()
        .map(|(id, text)| Document::new(id, text.as_ref()))
        .collect();

    if documents.is_empty() {
        return Err(PipelineError::EmptyCorpus);
    }

    let token_count: usize = documents.iter().map(|d| d.tokens.len()).sum();
    info!(
        documents = documents.len(),
        tokens = token_count,
        "Loaded corpus"
    );

    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_lowercases_and_splits_punctuation() {
        let tokens = tokenize("Renewable Energy, solar-power & EVs!\nGrid.");
        assert_eq!(
            tokens,
            vec!["renewable", "energy", "solar", "power", "evs", "grid"]
        );
    }

    #[test]
    fn test_tokenize_keeps_unicode_words_whole() {
        assert_eq!(
            tokenize("Énergie solaire naïve Müller"),
            vec!["énergie", "solaire", "naïve", "müller"]
        );
        assert_eq!(
            tokenize("Энергия ветра, 太阳能 2030"),
            vec!["энергия", "ветра", "太阳能", "2030"]
        );
    }

    #[test]
    fn test_parse_year_uses_first_underscore() {
        assert_eq!(parse_year("2015-16_national_energy_plan.txt"), "2015-16");
        assert_eq!(parse_year("2019_budget.txt"), "2019");
    }

    #[test]
    fn test_parse_year_without_separator() {
        assert_eq!(parse_year("summary.txt"), UNKNOWN_YEAR);
    }

    #[test]
    fn test_load_documents_empty_fails() {
        let items: Vec<(String, String)> = Vec::new();
        assert_eq!(load_documents(items), Err(PipelineError::EmptyCorpus));
    }

    #[test]
    fn test_load_documents_keeps_order() {
        let docs = load_documents(vec![("b_x.txt", "beta"), ("a_y.txt", "alpha")]).unwrap();
        assert_eq!(docs[0].id, "b_x.txt");
        assert_eq!(docs[1].year, "a");
        assert_eq!(docs[1].joined_text(), "alpha");
    }
}
