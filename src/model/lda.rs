// Latent Dirichlet Allocation via collapsed Gibbs sampling.
//
// Each document's bag-of-words is expanded back into word slots, every slot
// gets a random initial topic, and each pass resamples every slot from
//
//   p(k) ∝ (n_dk + alpha) * (n_kw + beta) / (n_k + V * beta)
//
// The RNG is seeded from the config, so the same corpus and config always
// produce the same model.

use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::traits::{format_topic_label, TopicModel, TopicSummary, TopicTrainer};
use super::vocabulary::{TokenFilter, Vocabulary};
use crate::corpus::document::Document;
use crate::error::PipelineError;

/// Tunables for the LDA trainer.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainerConfig {
    /// Number of latent topics K
    pub num_topics: usize,
    /// Full Gibbs sweeps over the corpus
    pub passes: usize,
    pub seed: u64,
    /// Document-topic prior
    pub alpha: f64,
    /// Topic-word prior
    pub beta: f64,
    /// Terms shown in each topic label
    pub label_terms: usize,
    /// Topic probabilities below this are pruned from document distributions
    pub minimum_probability: f64,
    pub min_token_len: usize,
    pub remove_stop_words: bool,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            num_topics: 5,
            passes: 20,
            seed: 42,
            alpha: 0.1,
            beta: 0.01,
            label_terms: 3,
            minimum_probability: 0.01,
            min_token_len: 2,
            remove_stop_words: true,
        }
    }
}

impl TrainerConfig {
    /// Reject settings the sampler cannot run with.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.num_topics == 0 {
            return Err(PipelineError::InvalidConfig(
                "num_topics must be at least 1".to_string(),
            ));
        }
        let positive = |x: f64| x.is_finite() && x > 0.0;
        if !positive(self.alpha) || !positive(self.beta) {
            return Err(PipelineError::InvalidConfig(format!(
                "alpha and beta must be positive (alpha={}, beta={})",
                self.alpha, self.beta
            )));
        }
        if !(0.0..1.0).contains(&self.minimum_probability) {
            return Err(PipelineError::InvalidConfig(format!(
                "minimum_probability must be in [0, 1), got {}",
                self.minimum_probability
            )));
        }
        Ok(())
    }
}

/// Gibbs-sampled LDA trainer.
pub struct LdaTrainer {
    pub config: TrainerConfig,
    /// Draw a terminal progress bar over passes
    pub show_progress: bool,
}

impl LdaTrainer {
    pub fn new(config: TrainerConfig) -> Self {
        Self {
            config,
            show_progress: false,
        }
    }

    fn progress_bar(&self) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(self.config.passes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("  Training [{bar:30}] {pos}/{len} passes ({eta})")
                .unwrap(),
        );
        pb
    }
}

impl TopicTrainer for LdaTrainer {
    fn train(&self, documents: &[Document]) -> Result<TopicModel, PipelineError> {
        self.config.validate()?;
        if documents.is_empty() {
            return Err(PipelineError::EmptyCorpus);
        }

        let config = &self.config;
        let k = config.num_topics;

        let filter = TokenFilter::new(config.min_token_len, config.remove_stop_words);
        let token_lists: Vec<Vec<String>> = documents.iter().map(|d| d.tokens.clone()).collect();
        let vocab = Vocabulary::build(&token_lists, &filter);
        if vocab.is_empty() {
            return Err(PipelineError::DegenerateCorpus {
                documents: documents.len(),
            });
        }
        let v = vocab.len();

        // Expand each bag-of-words into one slot per occurrence
        let words: Vec<Vec<usize>> = token_lists
            .iter()
            .map(|tokens| {
                vocab
                    .doc_to_bow(tokens)
                    .into_iter()
                    .flat_map(|(id, count)| std::iter::repeat(id).take(count as usize))
                    .collect()
            })
            .collect();

        info!(
            documents = documents.len(),
            vocabulary = v,
            topics = k,
            passes = config.passes,
            seed = config.seed,
            "Training LDA topic model"
        );

        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut doc_topic = vec![vec![0u32; k]; words.len()];
        let mut topic_word = vec![vec![0u32; v]; k];
        let mut topic_total = vec![0u32; k];
        let mut assignments: Vec<Vec<usize>> = Vec::with_capacity(words.len());

        for (d, doc) in words.iter().enumerate() {
            let mut slots = Vec::with_capacity(doc.len());
            for &w in doc {
                let t = rng.random_range(0..k);
                doc_topic[d][t] += 1;
                topic_word[t][w] += 1;
                topic_total[t] += 1;
                slots.push(t);
            }
            assignments.push(slots);
        }

        let vbeta = v as f64 * config.beta;
        let mut weights = vec![0.0f64; k];
        let pb = self.progress_bar();

        for pass in 0..config.passes {
            let mut changed = 0usize;
            for (d, doc) in words.iter().enumerate() {
                for (i, &w) in doc.iter().enumerate() {
                    let old = assignments[d][i];
                    doc_topic[d][old] -= 1;
                    topic_word[old][w] -= 1;
                    topic_total[old] -= 1;

                    let mut total = 0.0;
                    for t in 0..k {
                        let p = (doc_topic[d][t] as f64 + config.alpha)
                            * (topic_word[t][w] as f64 + config.beta)
                            / (topic_total[t] as f64 + vbeta);
                        total += p;
                        weights[t] = total;
                    }
                    let draw = rng.random::<f64>() * total;
                    let new = weights.iter().position(|&c| draw < c).unwrap_or(k - 1);

                    doc_topic[d][new] += 1;
                    topic_word[new][w] += 1;
                    topic_total[new] += 1;
                    if new != old {
                        assignments[d][i] = new;
                        changed += 1;
                    }
                }
            }
            debug!(pass, changed, "Gibbs pass complete");
            pb.inc(1);
        }
        pb.finish_and_clear();

        let topics = (0..k)
            .map(|t| {
                let denom = topic_total[t] as f64 + vbeta;
                let mut scored: Vec<(usize, f64)> = (0..v)
                    .map(|w| (w, (topic_word[t][w] as f64 + config.beta) / denom))
                    .collect();
                scored.sort_by(|a, b| {
                    b.1.partial_cmp(&a.1)
                        .unwrap_or(std::cmp::Ordering::Equal)
                        .then(a.0.cmp(&b.0))
                });
                let top_terms: Vec<(String, f64)> = scored
                    .into_iter()
                    .take(config.label_terms)
                    .filter_map(|(w, p)| vocab.term(w).map(|term| (term.to_string(), p)))
                    .collect();
                TopicSummary {
                    id: t,
                    label: format_topic_label(t, &top_terms),
                    top_terms,
                }
            })
            .collect();

        let kalpha = k as f64 * config.alpha;
        let document_topics = words
            .iter()
            .zip(&doc_topic)
            .map(|(doc, counts)| {
                let denom = doc.len() as f64 + kalpha;
                counts
                    .iter()
                    .enumerate()
                    .map(|(t, &n)| (t, (n as f64 + config.alpha) / denom))
                    .filter(|&(_, p)| p >= config.minimum_probability)
                    .collect()
            })
            .collect();

        info!(topics = k, "Topic model trained");

        Ok(TopicModel {
            num_topics: k,
            topics,
            document_topics,
        })
    }
}
