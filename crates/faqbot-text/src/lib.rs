//! faqbot-text
//!
//! Text normalization, the TF-IDF question index and the cosine matcher.
//! Tokenizing and stemming reuse tantivy's analysis pipeline; see
//! `tantivy_utils`.

pub mod index;
pub mod matcher;
pub mod normalizer;
pub mod tantivy_utils;

pub use index::{FaqIndex, TermVector, Vocabulary};
pub use matcher::{FaqRetriever, Matcher};
pub use normalizer::{Normalizer, WordTokenizer};
