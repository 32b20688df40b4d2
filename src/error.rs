use crate::index::types::RecordKey;
use std::path::PathBuf;

/// Failures that prevent a corpus, and therefore an engine, from being built
#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("failed to read corpus file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse corpus file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate record identifier {0}")]
    DuplicateRecord(RecordKey),

    #[error("corpus has {0} records, more than the index can address")]
    TooManyRecords(usize),
}
