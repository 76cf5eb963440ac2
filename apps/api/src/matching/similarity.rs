//! Similarity scoring: bag-of-words term vectors and cosine similarity.
//!
//! Two backends sit behind the `SimilarityScorer` trait:
//! - `PositionalScorer` (default): each text gets its own vector, dimensions in
//!   first-occurrence order, and cosine runs over the shorter vector's length.
//!   Dimensions of the two vectors do not refer to the same token.
//! - `VocabularyScorer`: aligns dimensions by token identity across both texts.
//!
//! `AppState` holds an `Arc<dyn SimilarityScorer>`, chosen via `SIMILARITY_BACKEND`.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

// ────────────────────────────────────────────────────────────────────────────
// Term vectors
// ────────────────────────────────────────────────────────────────────────────

/// Term-frequency vector of one text. `terms[i]` is the token counted in `counts[i]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermVector {
    terms: Vec<String>,
    counts: Vec<f64>,
}

impl TermVector {
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn counts(&self) -> &[f64] {
        &self.counts
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    fn magnitude(&self) -> f64 {
        self.counts.iter().map(|c| c * c).sum::<f64>().sqrt()
    }
}

/// Lower-cases `text`, splits on anything outside `[a-z0-9]` and counts tokens.
/// No stop words, no stemming. `embed("")` is empty.
pub fn embed(text: &str) -> TermVector {
    let lowered = text.to_lowercase();
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut vector = TermVector::default();

    for token in lowered
        .split(|c: char| !(c.is_ascii_lowercase() || c.is_ascii_digit()))
        .filter(|t| !t.is_empty())
    {
        match index.get(token) {
            Some(&i) => vector.counts[i] += 1.0,
            None => {
                index.insert(token, vector.terms.len());
                vector.terms.push(token.to_string());
                vector.counts.push(1.0);
            }
        }
    }

    vector
}

/// Cosine similarity over the first `min(a.len(), b.len())` positions.
/// Returns 0.0 when either truncated magnitude is zero.
pub fn cosine(a: &[f64], b: &[f64]) -> f64 {
    let (mut dot, mut norm_a, mut norm_b) = (0.0_f64, 0.0_f64, 0.0_f64);
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    let denominator = norm_a.sqrt() * norm_b.sqrt();
    if denominator == 0.0 {
        0.0
    } else {
        dot / denominator
    }
}

/// Cosine similarity with dimensions aligned by token over the union vocabulary.
pub fn vocabulary_cosine(a: &TermVector, b: &TermVector) -> f64 {
    let b_counts: HashMap<&str, f64> = b
        .terms()
        .iter()
        .map(String::as_str)
        .zip(b.counts().iter().copied())
        .collect();

    let dot: f64 = a
        .terms()
        .iter()
        .zip(a.counts())
        .filter_map(|(term, count)| b_counts.get(term.as_str()).map(|other| count * other))
        .sum();

    let denominator = a.magnitude() * b.magnitude();
    if denominator == 0.0 {
        0.0
    } else {
        dot / denominator
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Scorer trait and backends
// ────────────────────────────────────────────────────────────────────────────

/// Scores how similar a document is to a query. Implementations must be pure.
pub trait SimilarityScorer: Send + Sync {
    fn score(&self, query: &TermVector, document: &TermVector) -> f64;

    fn backend(&self) -> SimilarityBackend;
}

pub struct PositionalScorer;

impl SimilarityScorer for PositionalScorer {
    fn score(&self, query: &TermVector, document: &TermVector) -> f64 {
        cosine(query.counts(), document.counts())
    }

    fn backend(&self) -> SimilarityBackend {
        SimilarityBackend::Positional
    }
}

pub struct VocabularyScorer;

impl SimilarityScorer for VocabularyScorer {
    fn score(&self, query: &TermVector, document: &TermVector) -> f64 {
        vocabulary_cosine(query, document)
    }

    fn backend(&self) -> SimilarityBackend {
        SimilarityBackend::Vocabulary
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SimilarityBackend {
    #[default]
    Positional,
    Vocabulary,
}

impl SimilarityBackend {
    pub fn scorer(self) -> Arc<dyn SimilarityScorer> {
        match self {
            SimilarityBackend::Positional => Arc::new(PositionalScorer),
            SimilarityBackend::Vocabulary => Arc::new(VocabularyScorer),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SimilarityBackend::Positional => "positional",
            SimilarityBackend::Vocabulary => "vocabulary",
        }
    }
}

impl FromStr for SimilarityBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "positional" => Ok(SimilarityBackend::Positional),
            "vocabulary" => Ok(SimilarityBackend::Vocabulary),
            other => Err(anyhow::anyhow!("unknown similarity backend '{other}'")),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
