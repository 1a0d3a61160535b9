//! FAQ corpus suppliers.
//!
//! The conventional source is a JSON array of `{"question", "answer"}` objects.
//! When it cannot be read, or holds no entries, callers substitute
//! [`default_corpus`] so the bot always starts.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::traits::CorpusSupplier;
use crate::types::FaqEntry;

/// Reads the corpus from a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileCorpus {
    path: PathBuf,
}

impl JsonFileCorpus {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CorpusSupplier for JsonFileCorpus {
    fn load(&self) -> Result<Vec<FaqEntry>> {
        let content = fs::read_to_string(&self.path)
            .map_err(|source| Error::CorpusLoad { path: self.path.clone(), source })?;
        let entries: Vec<FaqEntry> = serde_json::from_str(&content)
            .map_err(|source| Error::CorpusFormat { path: self.path.clone(), source })?;
        info!(path = %self.path.display(), count = entries.len(), "loaded FAQ corpus");
        Ok(entries)
    }
}

/// A fixed in-memory corpus.
#[derive(Debug, Clone, Default)]
pub struct StaticCorpus {
    entries: Vec<FaqEntry>,
}

impl StaticCorpus {
    pub fn new(entries: Vec<FaqEntry>) -> Self {
        Self { entries }
    }
}

impl CorpusSupplier for StaticCorpus {
    fn load(&self) -> Result<Vec<FaqEntry>> {
        Ok(self.entries.clone())
    }
}

/// The built-in health & wellness entries used when no corpus is available.
pub fn default_corpus() -> Vec<FaqEntry> {
    vec![
        FaqEntry::new(
            "How much water should I drink daily?",
            "Adults should drink 8-10 glasses (2-3 liters) of water daily.",
        ),
        FaqEntry::new(
            "What are symptoms of dehydration?",
            "Common signs include thirst, dark urine, fatigue, dizziness.",
        ),
    ]
}

/// Loads from `supplier`, falling back to [`default_corpus`] on failure or an empty result.
pub fn load_or_default<S: CorpusSupplier + ?Sized>(supplier: &S) -> Vec<FaqEntry> {
    match supplier.load() {
        Ok(entries) if !entries.is_empty() => entries,
        Ok(_) => {
            warn!("corpus supplier returned no entries; using built-in FAQs");
            default_corpus()
        }
        Err(e) => {
            warn!(error = %e, "could not load FAQ corpus; using built-in FAQs");
            default_corpus()
        }
    }
}
