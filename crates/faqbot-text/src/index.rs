//! TF-IDF index over the corpus questions.
//!
//! Built once from a fixed corpus; nothing here mutates after `build`, so a
//! `FaqIndex` can be shared across threads behind a plain reference or `Arc`.

use std::collections::{BTreeMap, HashMap};

use tracing::info;

use faqbot_core::types::FaqEntry;

use crate::normalizer::Normalizer;

/// Distinct corpus terms, each with a fixed position and an IDF weight.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    positions: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl Vocabulary {
    /// Positions follow lexical term order; `idf(t) = ln((1 + n) / (1 + df(t))) + 1`.
    fn from_document_frequencies(df: BTreeMap<String, usize>, n_docs: usize) -> Self {
        let n = n_docs as f64;
        let mut positions = HashMap::with_capacity(df.len());
        let mut idf = Vec::with_capacity(df.len());
        for (position, (term, count)) in df.into_iter().enumerate() {
            positions.insert(term, position);
            idf.push(((1.0 + n) / (1.0 + count as f64)).ln() + 1.0);
        }
        Self { positions, idf }
    }

    pub fn len(&self) -> usize {
        self.idf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.idf.is_empty()
    }

    pub fn position(&self, term: &str) -> Option<usize> {
        self.positions.get(term).copied()
    }

    pub fn idf(&self, position: usize) -> Option<f64> {
        self.idf.get(position).copied()
    }

    /// TF-IDF vector for `tokens`; out-of-vocabulary tokens are dropped.
    pub fn weigh(&self, tokens: &[String]) -> TermVector {
        let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
        for position in tokens.iter().filter_map(|t| self.position(t)) {
            *counts.entry(position).or_default() += 1;
        }
        let weights = counts
            .into_iter()
            .map(|(position, tf)| (position, tf as f64 * self.idf[position]))
            .collect();
        TermVector::new(weights)
    }
}

/// Sparse term-weight vector, sorted by vocabulary position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermVector {
    weights: Vec<(usize, f64)>,
    norm: f64,
}

impl TermVector {
    fn new(weights: Vec<(usize, f64)>) -> Self {
        let norm = weights.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        Self { weights, norm }
    }

    pub fn weights(&self) -> &[(usize, f64)] {
        &self.weights
    }

    pub fn weight(&self, position: usize) -> f64 {
        self.weights
            .binary_search_by_key(&position, |(p, _)| *p)
            .map_or(0.0, |i| self.weights[i].1)
    }

    pub fn norm(&self) -> f64 {
        self.norm
    }

    pub fn is_zero(&self) -> bool {
        self.norm == 0.0
    }

    pub fn dot(&self, other: &TermVector) -> f64 {
        let (mut i, mut j, mut sum) = (0, 0, 0.0);
        while i < self.weights.len() && j < other.weights.len() {
            let (pa, wa) = self.weights[i];
            let (pb, wb) = other.weights[j];
            match pa.cmp(&pb) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += wa * wb;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    /// Cosine similarity; 0.0 when either vector has zero norm.
    pub fn cosine(&self, other: &TermVector) -> f64 {
        if self.is_zero() || other.is_zero() {
            return 0.0;
        }
        self.dot(other) / (self.norm * other.norm)
    }
}

/// The corpus, its vocabulary and one cached vector per question.
pub struct FaqIndex {
    entries: Vec<FaqEntry>,
    vocabulary: Vocabulary,
    vectors: Vec<TermVector>,
    normalizer: Normalizer,
}

impl FaqIndex {
    /// An empty corpus is valid and yields an index that never matches.
    pub fn build(entries: Vec<FaqEntry>, normalizer: Normalizer) -> Self {
        let tokenized: Vec<Vec<String>> =
            entries.iter().map(|e| normalizer.normalize(&e.question)).collect();

        let mut df: BTreeMap<String, usize> = BTreeMap::new();
        for tokens in &tokenized {
            let mut seen: Vec<&String> = tokens.iter().collect();
            seen.sort();
            seen.dedup();
            for term in seen {
                *df.entry(term.clone()).or_default() += 1;
            }
        }

        let vocabulary = Vocabulary::from_document_frequencies(df, entries.len());
        let vectors = tokenized.iter().map(|tokens| vocabulary.weigh(tokens)).collect();

        info!(
            entries = entries.len(),
            terms = vocabulary.len(),
            stemming = normalizer.is_stemming(),
            "built FAQ index"
        );
        Self { entries, vocabulary, vectors, normalizer }
    }

    /// Normalizes `text` with the build-time normalizer and weighs it against the fixed vocabulary.
    pub fn vectorize(&self, text: &str) -> TermVector {
        self.vocabulary.weigh(&self.normalizer.normalize(text))
    }

    pub fn entries(&self) -> &[FaqEntry] {
        &self.entries
    }

    pub fn entry(&self, position: usize) -> Option<&FaqEntry> {
        self.entries.get(position)
    }

    pub fn vectors(&self) -> &[TermVector] {
        &self.vectors
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(entries: &[(&str, &str)]) -> FaqIndex {
        let entries = entries.iter().map(|(q, a)| FaqEntry::new(*q, *a)).collect();
        FaqIndex::build(entries, Normalizer::new(false))
    }

    #[test]
    fn empty_corpus_builds_empty_index() {
        let index = raw(&[]);
        assert!(index.is_empty());
        assert!(index.vocabulary().is_empty());
        assert!(index.vectorize("anything at all").is_zero());
    }

    #[test]
    fn idf_follows_smoothed_log_formula() {
        let index = raw(&[("water daily", "a"), ("water sleep", "b")]);
        let vocab = index.vocabulary();
        assert_eq!(vocab.len(), 3);

        let shared = vocab.idf(vocab.position("water").unwrap()).unwrap();
        let unique = vocab.idf(vocab.position("sleep").unwrap()).unwrap();
        assert!((shared - 1.0).abs() < 1e-6, "ln(3/3) + 1");
        assert!((unique - ((3.0f64 / 2.0).ln() + 1.0)).abs() < 1e-6);
    }

    #[test]
    fn term_frequency_scales_weights() {
        let index = raw(&[("water water sleep", "a"), ("diet", "b")]);
        let vocab = index.vocabulary();
        let water = vocab.position("water").unwrap();
        let sleep = vocab.position("sleep").unwrap();
        let v = &index.vectors()[0];
        assert!((v.weight(water) - 2.0 * v.weight(sleep)).abs() < 1e-6);
        assert_eq!(v.weight(vocab.position("diet").unwrap()), 0.0);
    }

    #[test]
    fn query_terms_outside_vocabulary_are_dropped() {
        let index = raw(&[("water daily", "a")]);
        let v = index.vectorize("water asdkjh");
        assert_eq!(v.weights().len(), 1);
        assert_eq!(index.vocabulary().len(), 2, "queries never grow the vocabulary");
    }

    #[test]
    fn cosine_of_zero_vector_is_zero() {
        let index = raw(&[("water daily", "a")]);
        let zero = index.vectorize("");
        assert_eq!(zero.cosine(&index.vectors()[0]), 0.0);
        assert_eq!(index.vectors()[0].cosine(&zero), 0.0);
    }

    #[test]
    fn cosine_of_identical_vectors_is_one() {
        let index = raw(&[("how much water should i drink", "a"), ("sleep", "b")]);
        let q = index.vectorize("How much water should I drink?");
        assert!((q.cosine(&index.vectors()[0]) - 1.0).abs() < 1e-6);
        assert_eq!(q.cosine(&index.vectors()[1]), 0.0);
    }
}
