//! Maps raw text to the canonical token sequence used for both corpus
//! questions and incoming queries.

use tantivy::tokenizer::TextAnalyzer;
use tracing::warn;

use faqbot_core::error::Result;
use faqbot_core::traits::TextTokenizer;

use crate::tantivy_utils::{collect_tokens, stem_analyzer, word_analyzer};

/// Maximal runs of alphanumeric characters, backed by tantivy's `SimpleTokenizer`.
#[derive(Clone)]
pub struct WordTokenizer {
    analyzer: TextAnalyzer,
}

impl Default for WordTokenizer {
    fn default() -> Self {
        Self { analyzer: word_analyzer() }
    }
}

impl TextTokenizer for WordTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        let mut analyzer = self.analyzer.clone();
        Ok(collect_tokens(&mut analyzer, text))
    }
}

/// Lower-cases, tokenizes, drops non-alphanumeric tokens and optionally stems.
///
/// A normalizer is fixed once built; the index keeps the one it was built
/// with so queries are always normalized the same way as the corpus.
pub struct Normalizer {
    tokenizer: Box<dyn TextTokenizer>,
    stemmer: Option<TextAnalyzer>,
}

impl Normalizer {
    pub fn new(stemming: bool) -> Self {
        Self::with_tokenizer(Box::new(WordTokenizer::default()), stemming)
    }

    pub fn with_tokenizer(tokenizer: Box<dyn TextTokenizer>, stemming: bool) -> Self {
        Self { tokenizer, stemmer: stemming.then(stem_analyzer) }
    }

    pub fn is_stemming(&self) -> bool {
        self.stemmer.is_some()
    }

    /// Never fails: a tokenizer error degrades to a lower-cased whitespace split.
    pub fn normalize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let tokens = match self.tokenizer.tokenize(&lowered) {
            Ok(tokens) => tokens,
            Err(e) => {
                warn!(error = %e, "tokenizer failed; falling back to whitespace split");
                return lowered.split_whitespace().map(str::to_string).collect();
            }
        };

        let words: Vec<String> = tokens
            .into_iter()
            .filter(|t| !t.is_empty() && t.chars().all(char::is_alphanumeric))
            .collect();

        match &self.stemmer {
            Some(stemmer) if !words.is_empty() => {
                let mut stemmer = stemmer.clone();
                collect_tokens(&mut stemmer, &words.join(" "))
            }
            _ => words,
        }
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(true)
    }
}
