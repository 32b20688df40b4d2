//! The search engine: a corpus plus the indices built from it.

use crate::error::CorpusError;
use crate::index::build::SearchIndex;
use crate::index::corpus::{load_archive, load_corpus_file};
use crate::index::stats::IndexStats;
use crate::index::types::{Corpus, Record, RecordId, RecordKey, SearchResult};
use crate::query::executor::QueryExecutor;
use crate::query::parser::SearchQuery;
use crate::query::suggest::{Suggestions, suggest};
use crate::utils::AppConfig;
use std::collections::HashMap;
use std::path::Path;

/// Immutable search engine over one corpus.
///
/// Built once; every query method takes `&self`, so an engine can be shared
/// between threads behind an `Arc` without locking.
#[derive(Debug)]
pub struct SearchEngine {
    corpus: Corpus,
    index: SearchIndex,
    keys: HashMap<RecordKey, RecordId, ahash::RandomState>,
    config: AppConfig,
}

impl SearchEngine {
    /// Build an engine with default configuration
    pub fn new(corpus: Corpus) -> Self {
        Self::with_config(corpus, AppConfig::default())
    }

    pub fn with_config(corpus: Corpus, config: AppConfig) -> Self {
        let index = SearchIndex::build(&corpus);
        let keys = corpus
            .iter()
            .map(|(id, record)| (record.id.clone(), id))
            .collect();
        Self {
            corpus,
            index,
            keys,
            config,
        }
    }

    /// Load `metadata/download_sources.json` under an archive directory and index it
    pub fn open_archive(archive_dir: &Path, config: AppConfig) -> Result<Self, CorpusError> {
        Ok(Self::with_config(load_archive(archive_dir)?, config))
    }

    /// Load a corpus file and index it
    pub fn open_file(path: &Path, config: AppConfig) -> Result<Self, CorpusError> {
        Ok(Self::with_config(load_corpus_file(path)?, config))
    }

    /// Run a structured query
    pub fn search(&self, query: &SearchQuery) -> Vec<SearchResult> {
        QueryExecutor::with_scoring_weights(
            &self.corpus,
            &self.index,
            self.config.scoring_weights.clone(),
        )
        .execute(query)
    }

    /// Completion suggestions for a partial string
    pub fn suggest(&self, partial: &str) -> Suggestions {
        suggest(&self.index, partial, self.config.suggestion_limits())
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats::collect(&self.index)
    }

    /// Look up a record by its identifier
    pub fn record(&self, key: &RecordKey) -> Option<&Record> {
        self.keys.get(key).and_then(|&id| self.corpus.get(id))
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// A query with this engine's default result limit
    pub fn query(&self, text: impl Into<String>) -> SearchQuery {
        SearchQuery::text(text).with_limit(self.config.max_results)
    }
}
