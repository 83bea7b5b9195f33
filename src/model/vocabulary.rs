// Vocabulary and bag-of-words conversion.
//
// Training-time preprocessing lives here: stop words, very short tokens and
// bare numbers are dropped before the vocabulary is built. Documents keep
// their full token list for sector classification.

use std::collections::{BTreeMap, HashMap, HashSet};

use stop_words::{get, LANGUAGE};

/// Which tokens are allowed into the vocabulary.
#[derive(Debug, Clone)]
pub struct TokenFilter {
    pub min_token_len: usize,
    stop_words: HashSet<String>,
}

impl TokenFilter {
    /// Build a filter; `remove_stop_words` pulls the English list from the
    /// `stop-words` crate.
    pub fn new(min_token_len: usize, remove_stop_words: bool) -> Self {
        let stop_words = if remove_stop_words {
            get(LANGUAGE::English).into_iter().collect()
        } else {
            HashSet::new()
        };
        Self {
            min_token_len,
            stop_words,
        }
    }

    pub fn keep(&self, token: &str) -> bool {
        token.chars().count() >= self.min_token_len
            && !token.chars().all(char::is_numeric)
            && !self.stop_words.contains(token)
    }
}

/// Bidirectional id ↔ term mapping. Ids are assigned in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    terms: Vec<String>,
    ids: HashMap<String, usize>,
}

impl Vocabulary {
    /// Collect every kept token from every document.
    pub fn build(documents: &[Vec<String>], filter: &TokenFilter) -> Self {
        let mut vocab = Self::default();
        for tokens in documents {
            for token in tokens.iter().filter(|t| filter.keep(t)) {
                if !vocab.ids.contains_key(token) {
                    vocab.ids.insert(token.clone(), vocab.terms.len());
                    vocab.terms.push(token.clone());
                }
            }
        }
        vocab
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn id(&self, term: &str) -> Option<usize> {
        self.ids.get(term).copied()
    }

    pub fn term(&self, id: usize) -> Option<&str> {
        self.terms.get(id).map(String::as_str)
    }

    /// Term id → count for one document, sorted by id. Unknown terms are dropped.
    pub fn doc_to_bow(&self, tokens: &[String]) -> Vec<(usize, u32)> {
        let mut counts: BTreeMap<usize, u32> = BTreeMap::new();
        for id in tokens.iter().filter_map(|t| self.id(t)) {
            *counts.entry(id).or_insert(0) += 1;
        }
        counts.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(s: &str) -> Vec<String> {
        s.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn test_filter_drops_stop_words_numbers_and_short_tokens() {
        let filter = TokenFilter::new(2, true);
        assert!(filter.keep("solar"));
        assert!(!filter.keep("the"));
        assert!(!filter.keep("2030"));
        assert!(!filter.keep("x"));
        assert!(filter.keep("co2"));
    }

    #[test]
    fn test_filter_without_stop_words_keeps_them() {
        let filter = TokenFilter::new(1, false);
        assert!(filter.keep("the"));
    }

    #[test]
    fn test_vocabulary_ids_follow_first_seen_order() {
        let docs = vec![toks("solar grid solar"), toks("metro grid")];
        let vocab = Vocabulary::build(&docs, &TokenFilter::new(1, false));
        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.id("solar"), Some(0));
        assert_eq!(vocab.id("grid"), Some(1));
        assert_eq!(vocab.term(2), Some("metro"));
    }

    #[test]
    fn test_doc_to_bow_counts_terms() {
        let docs = vec![toks("solar grid solar unseen")];
        let vocab = Vocabulary::build(&[toks("solar grid")], &TokenFilter::new(1, false));
        assert_eq!(vocab.doc_to_bow(&docs[0]), vec![(0, 2), (1, 1)]);
    }

    #[test]
    fn test_all_filtered_gives_empty_vocabulary() {
        let docs = vec![toks("the and of 2019")];
        let vocab = Vocabulary::build(&docs, &TokenFilter::new(2, true));
        assert!(vocab.is_empty());
    }
}
