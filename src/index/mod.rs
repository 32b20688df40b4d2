pub mod build;
pub mod corpus;
pub mod stats;
pub mod types;

pub use build::SearchIndex;
pub use corpus::{load_archive, load_corpus_file};
pub use stats::IndexStats;
pub use types::*;
