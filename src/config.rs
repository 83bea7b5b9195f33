use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::model::lda::TrainerConfig;
use crate::sectors::table::SectorKeywordTable;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy, so every
/// setting can live there instead of the shell.
#[derive(Debug, Clone)]
pub struct Config {
    /// Folder of `<year>_<name>.txt` files (POLICYLENS_CORPUS_DIR)
    pub corpus_dir: PathBuf,
    /// Optional JSON sector table (POLICYLENS_SECTORS_FILE); built-in table otherwise
    pub sectors_file: Option<PathBuf>,
    pub trainer: TrainerConfig,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup. Unset keys take defaults;
    /// set-but-unparseable numbers are an error rather than a silent default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = TrainerConfig::default();

        let trainer = TrainerConfig {
            num_topics: parse_var(&lookup, "POLICYLENS_NUM_TOPICS", defaults.num_topics)?,
            passes: parse_var(&lookup, "POLICYLENS_PASSES", defaults.passes)?,
            seed: parse_var(&lookup, "POLICYLENS_SEED", defaults.seed)?,
            label_terms: parse_var(&lookup, "POLICYLENS_LABEL_TERMS", defaults.label_terms)?,
            minimum_probability: parse_var(
                &lookup,
                "POLICYLENS_MIN_PROBABILITY",
                defaults.minimum_probability,
            )?,
            ..defaults
        };

        trainer
            .validate()
            .context("Invalid topic model settings in environment")?;

        Ok(Self {
            corpus_dir: lookup("POLICYLENS_CORPUS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./Preprocessed_text")),
            sectors_file: lookup("POLICYLENS_SECTORS_FILE")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
            trainer,
        })
    }

    /// The sector keyword table: from the configured file, or the built-in one.
    pub fn sector_table(&self) -> Result<SectorKeywordTable> {
        match &self.sectors_file {
            Some(path) => SectorKeywordTable::from_json_file(path),
            None => Ok(SectorKeywordTable::default()),
        }
    }

    /// Check that the corpus folder exists before trying to train.
    pub fn require_corpus(&self) -> Result<()> {
        if !self.corpus_dir.is_dir() {
            anyhow::bail!(
                "Corpus directory {} not found.\n\
                 Set POLICYLENS_CORPUS_DIR in your .env file or pass --corpus.",
                self.corpus_dir.display()
            );
        }
        Ok(())
    }
}

fn parse_var<T, F>(lookup: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw:?}")),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.corpus_dir, PathBuf::from("./Preprocessed_text"));
        assert!(config.sectors_file.is_none());
        assert_eq!(config.trainer, TrainerConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("POLICYLENS_CORPUS_DIR", "/data/policies"),
            ("POLICYLENS_NUM_TOPICS", "8"),
            ("POLICYLENS_SEED", " 7 "),
        ]))
        .unwrap();
        assert_eq!(config.corpus_dir, PathBuf::from("/data/policies"));
        assert_eq!(config.trainer.num_topics, 8);
        assert_eq!(config.trainer.seed, 7);
        assert_eq!(config.trainer.passes, 20);
    }

    #[test]
    fn test_invalid_number_is_error() {
        let err = Config::from_lookup(lookup(&[("POLICYLENS_PASSES", "many")])).unwrap_err();
        assert!(err.to_string().contains("POLICYLENS_PASSES"));
    }

    #[test]
    fn test_zero_topics_rejected() {
        assert!(Config::from_lookup(lookup(&[("POLICYLENS_NUM_TOPICS", "0")])).is_err());
    }

    #[test]
    fn test_min_probability_out_of_range_rejected() {
        for raw in ["1.5", "NaN", "-0.2"] {
            let err = Config::from_lookup(lookup(&[("POLICYLENS_MIN_PROBABILITY", raw)]))
                .unwrap_err();
            assert!(
                format!("{err:#}").contains("minimum_probability"),
                "{raw}: {err:#}"
            );
        }
        let config =
            Config::from_lookup(lookup(&[("POLICYLENS_MIN_PROBABILITY", "0.05")])).unwrap();
        assert_eq!(config.trainer.minimum_probability, 0.05);
    }

    #[test]
    fn test_missing_corpus_dir() {
        let config =
            Config::from_lookup(lookup(&[("POLICYLENS_CORPUS_DIR", "/nonexistent/policylens")]))
                .unwrap();
        assert!(config.require_corpus().is_err());
    }
}
