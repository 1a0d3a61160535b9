//! Domain types shared by the index, the matcher and the service.

use serde::{Deserialize, Serialize};

/// A known question with its canned answer.
///
/// Identity is the entry's position in the corpus it was loaded with, so two
/// entries with the same question text are still distinct.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

impl FaqEntry {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self { question: question.into(), answer: answer.into() }
    }
}

/// The best-scoring entry for a query.
///
/// `position` indexes into the corpus, `score` is the cosine similarity
/// (0.0..=1.0 for non-negative weights) and `answer` is the entry's answer.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchHit {
    pub position: usize,
    pub score: f64,
    pub answer: String,
}
