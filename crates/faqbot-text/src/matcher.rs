use tracing::debug;

use faqbot_core::config::{MatcherSettings, DEFAULT_THRESHOLD};
use faqbot_core::error::{Error, Result};
use faqbot_core::traits::AnswerRetriever;
use faqbot_core::types::{FaqEntry, MatchHit};

use crate::index::FaqIndex;
use crate::normalizer::Normalizer;

/// Scores within this distance of the threshold count as equal to it.
const SCORE_EPSILON: f64 = 1e-9;

/// Picks the most similar corpus entry and applies the confidence threshold.
///
/// A hit must score strictly above the threshold; a score that only exceeds
/// it by rounding noise (`SCORE_EPSILON`) does not. Ties go to the earliest
/// entry in the corpus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matcher {
    threshold: f64,
}

impl Default for Matcher {
    fn default() -> Self {
        Self { threshold: DEFAULT_THRESHOLD }
    }
}

impl Matcher {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Cosine similarity of `query` against every entry, in corpus order.
    pub fn scores(&self, query: &str, index: &FaqIndex) -> Vec<f64> {
        let q = index.vectorize(query);
        index.vectors().iter().map(|v| q.cosine(v)).collect()
    }

    /// The top-scoring entry, or `None` if it does not clear the threshold.
    pub fn best_match(&self, query: &str, index: &FaqIndex) -> Result<Option<MatchHit>> {
        let mut best: Option<(usize, f64)> = None;
        for (position, score) in self.scores(query, index).into_iter().enumerate() {
            if !score.is_finite() {
                return Err(Error::Match(format!("non-finite similarity {score} for entry {position}")));
            }
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((position, score));
            }
        }

        let Some((position, score)) = best else {
            return Ok(None);
        };
        debug!(position, score, threshold = self.threshold, "best candidate");
        if score <= self.threshold + SCORE_EPSILON {
            return Ok(None);
        }
        let answer = index
            .entry(position)
            .map(|e| e.answer.clone())
            .ok_or_else(|| Error::Match(format!("no entry at position {position}")))?;
        Ok(Some(MatchHit { position, score, answer }))
    }

    /// Answer text of the confident best match.
    pub fn match_answer(&self, query: &str, index: &FaqIndex) -> Result<Option<String>> {
        Ok(self.best_match(query, index)?.map(|hit| hit.answer))
    }
}

/// An index paired with the matcher that queries it.
pub struct FaqRetriever {
    index: FaqIndex,
    matcher: Matcher,
}

impl FaqRetriever {
    pub fn new(index: FaqIndex, matcher: Matcher) -> Self {
        Self { index, matcher }
    }

    pub fn from_settings(entries: Vec<FaqEntry>, settings: &MatcherSettings) -> Self {
        let index = FaqIndex::build(entries, Normalizer::new(settings.stemming));
        Self::new(index, Matcher::new(settings.threshold))
    }

    pub fn index(&self) -> &FaqIndex {
        &self.index
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }
}

impl AnswerRetriever for FaqRetriever {
    fn retrieve(&self, query: &str) -> anyhow::Result<Option<MatchHit>> {
        Ok(self.matcher.best_match(query, &self.index)?)
    }
}
