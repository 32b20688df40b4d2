//! # bibsearch - Bibliographic Search Engine
//!
//! bibsearch indexes a corpus of bibliographic records (title, author, year,
//! category, access type, notes) and answers ranked full-text queries
//! combined with facet filters.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`index`] - Record model, corpus loading, index building and statistics
//! - [`query`] - Query model and parsing, candidate resolution, scoring, ranking, suggestions
//! - [`engine`] - The [`SearchEngine`] tying a corpus to its indices
//! - [`output`] - Result formatting (text and JSON)
//! - [`interactive`] - Line-oriented interactive search prompt
//! - [`utils`] - Tokenizer and configuration
//!
//! ## Quick Start
//!
//! ```
//! use bibsearch::{Corpus, Record, SearchEngine, SearchQuery};
//!
//! let corpus = Corpus::new(vec![
//!     Record::new("foundations", "church1936")
//!         .with_title("An Unsolvable Problem of Elementary Number Theory")
//!         .with_author("Church, Alonzo")
//!         .with_year(1936),
//! ])
//! .unwrap();
//!
//! let engine = SearchEngine::new(corpus);
//! let results = engine.search(&SearchQuery::text("unsolvable").with_author("church"));
//! assert_eq!(results[0].paper_id, "church1936");
//! ```
//!
//! ## Indexing
//!
//! Every index maps a key to a `RoaringBitmap` of record ids:
//!
//! 1. **Word Index** - Tokens of title, author and notes
//! 2. **Author Index** - Individual names split from the author field
//! 3. **Facet Indexes** - Year, category and access type
//!
//! Indices are built once and never mutated, so a [`SearchEngine`] can be
//! queried from many threads at once.

pub mod engine;
pub mod error;
pub mod index;
pub mod interactive;
pub mod output;
pub mod query;
pub mod utils;

pub use engine::SearchEngine;
pub use error::CorpusError;
pub use index::{AccessType, Corpus, IndexStats, Record, RecordId, RecordKey, SearchResult};
pub use query::{Operator, SearchQuery, Suggestions, parse_query};
