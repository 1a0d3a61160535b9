use crate::types::{FaqEntry, MatchHit};

/// Splits already lower-cased text into word tokens.
///
/// Implementations report malformed input as `Error::Normalization`; the
/// normalizer recovers from it.
pub trait TextTokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> crate::error::Result<Vec<String>>;
}

/// Produces the question/answer pairs the index is built from.
pub trait CorpusSupplier {
    fn load(&self) -> crate::error::Result<Vec<FaqEntry>>;
}

/// Finds the confident best match for a query, if any.
///
/// `Ok(None)` means no entry cleared the confidence threshold; `Err` is
/// reserved for internal faults.
pub trait AnswerRetriever: Send + Sync {
    fn retrieve(&self, query: &str) -> anyhow::Result<Option<MatchHit>>;
}

/// Turns a user question into the text shown back to the user. Never fails.
pub trait Responder: Send + Sync {
    fn answer(&self, query: &str) -> String;
}
