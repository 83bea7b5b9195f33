// Corpus providers: where the raw (identifier, text) pairs come from.
//
// The pipeline only sees the trait, so a test can hand it in-memory text and
// the CLI can point it at a folder of preprocessed `.txt` files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

/// Supplies named text blobs to the corpus loader.
pub trait CorpusProvider {
    /// Return every (identifier, raw text) pair in a deterministic order.
    fn fetch(&self) -> Result<Vec<(String, String)>>;
}

/// Reads every `*.txt` file in a single directory (non-recursive).
pub struct DirectoryProvider {
    pub dir: PathBuf,
}

impl DirectoryProvider {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }
}

impl CorpusProvider for DirectoryProvider {
    fn fetch(&self) -> Result<Vec<(String, String)>> {
        let entries = fs::read_dir(&self.dir)
            .with_context(|| format!("Failed to read corpus directory {}", self.dir.display()))?;

        let mut items = Vec::new();
        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("txt") {
                debug!(path = %path.display(), "Skipping non-text entry");
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            let text = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            items.push((name, text));
        }

        // read_dir order is platform-dependent; sort so training is reproducible
        items.sort_by(|a, b| a.0.cmp(&b.0));

        info!(
            dir = %self.dir.display(),
            files = items.len(),
            "Read corpus directory"
        );
        Ok(items)
    }
}

/// Serves a fixed list of documents, mainly for tests and embedding callers.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    pub items: Vec<(String, String)>,
}

impl InMemoryProvider {
    pub fn new<S: Into<String>, T: Into<String>>(items: Vec<(S, T)>) -> Self {
        Self {
            items: items
                .into_iter()
                .map(|(id, text)| (id.into(), text.into()))
                .collect(),
        }
    }
}

impl CorpusProvider for InMemoryProvider {
    fn fetch(&self) -> Result<Vec<(String, String)>> {
        Ok(self.items.clone())
    }
}
