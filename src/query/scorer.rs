//! Relevance scoring for search results
//!
//! Each query term contributes a TF-IDF component computed over the record's
//! lower-cased title + author + notes text, plus flat boosts when the term
//! appears in the title or author fields.

use crate::index::build::{DocumentText, SearchIndex};
use memchr::memmem;
use serde::{Deserialize, Serialize};

/// Configurable weights for scoring factors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Flat bonus when a query term appears in the title
    pub title_boost: f64,
    /// Flat bonus when a query term appears in the author field
    pub author_boost: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            title_boost: 2.0,
            author_boost: 1.5,
        }
    }
}

/// Score of one record and the fields that matched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoredMatch {
    pub score: f64,
    /// Human-readable match descriptions ("title: lambda")
    pub matches: Vec<String>,
}

/// Scorer calculates relevance scores for candidate records
#[derive(Debug, Clone)]
pub struct Scorer {
    weights: ScoringWeights,
}

impl Scorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    /// Create a scorer with default weights
    pub fn with_defaults() -> Self {
        Self::new(ScoringWeights::default())
    }

    /// Score a document against already tokenized query terms.
    ///
    /// Terms that do not occur in the document contribute nothing. With no
    /// terms the score is zero and there are no match descriptions.
    pub fn score(&self, index: &SearchIndex, doc: &DocumentText, terms: &[String]) -> ScoredMatch {
        let mut result = ScoredMatch::default();
        let total_docs = index.record_count() as f64;

        for term in terms {
            let occurrences = count_occurrences(&doc.searchable, term);
            if occurrences == 0 {
                continue;
            }

            let tf = if doc.token_count == 0 {
                0.0
            } else {
                occurrences as f64 / f64::from(doc.token_count)
            };
            let idf = Self::idf(total_docs, index.document_frequency(term));
            result.score += tf * idf;

            if doc.title.contains(term.as_str()) {
                result.score += self.weights.title_boost;
                result.matches.push(format!("title: {term}"));
            }
            if doc.author.contains(term.as_str()) {
                result.score += self.weights.author_boost;
                result.matches.push(format!("author: {term}"));
            }
        }

        result
    }

    /// Smoothed inverse document frequency: ln(N / (df + 1))
    pub fn idf(total_docs: f64, doc_freq: u64) -> f64 {
        (total_docs / (doc_freq as f64 + 1.0)).ln()
    }

    /// Get the weights (for external calculations)
    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }
}

/// Non-overlapping occurrences of `needle` in `haystack`
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    memmem::find_iter(haystack.as_bytes(), needle.as_bytes()).count()
}
