use crate::index::build::SearchIndex;
use crate::index::types::{Corpus, RecordId, SearchResult};
use crate::query::parser::SearchQuery;
use crate::query::ranker::rank;
use crate::query::resolver::QueryResolver;
use crate::query::scorer::{ScoredMatch, Scorer, ScoringWeights};
use crate::utils::tokenize;
use rayon::prelude::*;
use std::time::Instant;
use tracing::debug;

/// Candidate sets above this size are scored on the rayon pool
const PARALLEL_SCORING_THRESHOLD: u64 = 256;

/// Query executor: resolve candidates, score them, rank the results
pub struct QueryExecutor<'a> {
    corpus: &'a Corpus,
    index: &'a SearchIndex,
    scorer: Scorer,
}

impl<'a> QueryExecutor<'a> {
    pub fn new(corpus: &'a Corpus, index: &'a SearchIndex) -> Self {
        Self::with_scoring_weights(corpus, index, ScoringWeights::default())
    }

    /// Create executor with custom scoring weights
    pub fn with_scoring_weights(
        corpus: &'a Corpus,
        index: &'a SearchIndex,
        weights: ScoringWeights,
    ) -> Self {
        Self {
            corpus,
            index,
            scorer: Scorer::new(weights),
        }
    }

    /// Execute a query and return ranked results
    pub fn execute(&self, query: &SearchQuery) -> Vec<SearchResult> {
        let start = Instant::now();

        let candidates = QueryResolver::new(self.index).resolve(query);
        let terms = if query.text.trim().is_empty() {
            Vec::new()
        } else {
            tokenize(&query.text)
        };

        let results: Vec<SearchResult> = if candidates.len() > PARALLEL_SCORING_THRESHOLD {
            let ids: Vec<RecordId> = candidates.iter().collect();
            ids.par_iter()
                .filter_map(|&id| self.score_record(id, &terms))
                .collect()
        } else {
            candidates
                .iter()
                .filter_map(|id| self.score_record(id, &terms))
                .collect()
        };

        let ranked = rank(results, query.options.limit);
        debug!(
            query = %query.text,
            candidates = candidates.len(),
            returned = ranked.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "executed query"
        );
        ranked
    }

    fn score_record(&self, id: RecordId, terms: &[String]) -> Option<SearchResult> {
        let record = self.corpus.get(id)?;
        let ScoredMatch { score, matches } = if terms.is_empty() {
            ScoredMatch::default()
        } else {
            let doc = self.index.document(id)?;
            self.scorer.score(self.index, doc, terms)
        };
        Some(SearchResult::from_record(record, score, matches))
    }
}
