//! Corpus loading from the archive's `download_sources.json` metadata.
//!
//! The file maps category → paper key → paper fields. Parsing is lenient at
//! the field level: a malformed field is dropped with a warning and the rest
//! of the record is kept. Only an unreadable or syntactically invalid file is
//! fatal.

use crate::error::CorpusError;
use crate::index::types::{AccessType, Corpus, Record};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Location of the corpus file relative to the archive root
pub const METADATA_FILE: &str = "metadata/download_sources.json";

#[derive(Debug, Default, Deserialize)]
struct DownloadSources {
    #[serde(default)]
    download_sources: BTreeMap<String, BTreeMap<String, Value>>,
}

/// Path of the corpus file inside an archive directory
pub fn archive_metadata_path(archive_dir: &Path) -> PathBuf {
    archive_dir.join(METADATA_FILE)
}

/// Load the corpus of an archive directory
pub fn load_archive(archive_dir: &Path) -> Result<Corpus, CorpusError> {
    load_corpus_file(&archive_metadata_path(archive_dir))
}

/// Load a corpus from a `download_sources.json` style file
pub fn load_corpus_file(path: &Path) -> Result<Corpus, CorpusError> {
    let content = fs::read_to_string(path).map_err(|source| CorpusError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let records = parse_records(&content).map_err(|source| CorpusError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let corpus = Corpus::new(records)?;

    info!(path = %path.display(), records = corpus.len(), "loaded corpus");
    Ok(corpus)
}

/// Parse the records of a `download_sources.json` document, ordered by
/// category then key
pub fn parse_records(content: &str) -> serde_json::Result<Vec<Record>> {
    let sources: DownloadSources = serde_json::from_str(content)?;

    // BTreeMap iteration keeps record ids stable across loads
    let records = sources
        .download_sources
        .into_iter()
        .flat_map(|(category, papers)| {
            papers
                .into_iter()
                .map(move |(key, value)| record_from_value(&category, key, value))
        })
        .collect();

    Ok(records)
}

fn record_from_value(category: &str, key: String, value: Value) -> Record {
    let mut record = Record::new(category, key);

    let fields = match value {
        Value::Object(fields) => fields,
        other => {
            warn!(record = %record.id, found = value_kind(&other), "record is not an object, indexing identifier only");
            return record;
        }
    };

    record.title = string_field(&record, &fields, "title");
    record.author = string_field(&record, &fields, "author");
    record.local_path = string_field(&record, &fields, "local_path");
    record.url = string_field(&record, &fields, "url");
    record.notes = string_field(&record, &fields, "notes");
    record.year = year_field(&record, &fields);
    record.access_type = access_field(&record, &fields);
    record
}

fn string_field(record: &Record, fields: &Map<String, Value>, name: &str) -> Option<String> {
    match fields.get(name)? {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => {
            warn!(record = %record.id, field = name, found = value_kind(other), "skipping non-string field");
            None
        }
    }
}

fn year_field(record: &Record, fields: &Map<String, Value>) -> Option<i32> {
    let value = fields.get("year")?;
    if value.is_null() {
        return None;
    }

    let year = value.as_i64().and_then(|y| i32::try_from(y).ok());
    if year.is_none() {
        warn!(record = %record.id, year = %value, "skipping non-integer year");
    }
    year
}

fn access_field(record: &Record, fields: &Map<String, Value>) -> Option<AccessType> {
    match fields.get("access_type")? {
        Value::String(code) if code.is_empty() => None,
        Value::String(code) => match code.parse() {
            Ok(access) => Some(access),
            Err(err) => {
                warn!(record = %record.id, "skipping access type: {err}");
                None
            }
        },
        Value::Null => None,
        other => {
            warn!(record = %record.id, found = value_kind(other), "skipping non-string access type");
            None
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::types::RecordKey;

    fn parse_corpus(content: &str) -> Corpus {
        Corpus::new(parse_records(content).unwrap()).unwrap()
    }

    const SAMPLE: &str = r#"{
        "download_policies": {"user_agent": "ignored"},
        "download_sources": {
            "typed": {
                "girard1972": {
                    "title": "Interprétation fonctionnelle",
                    "author": "Girard, J.-Y.",
                    "year": 1972,
                    "access_type": "AR",
                    "local_path": "typed/girard1972.pdf",
                    "url": "https://example.org/girard.pdf",
                    "notes": "System F"
                }
            },
            "foundations": {
                "church1936": {
                    "title": "An Unsolvable Problem of Elementary Number Theory",
                    "author": "Church, A.",
                    "year": 1936,
                    "access_type": "PD"
                }
            }
        }
    }"#;

    #[test]
    fn test_parse_orders_by_category_then_key() {
        let corpus = parse_corpus(SAMPLE);
        let keys: Vec<_> = corpus.records().iter().map(|r| r.id.to_string()).collect();
        assert_eq!(keys, vec!["foundations/church1936", "typed/girard1972"]);

        let girard = &corpus.records()[1];
        assert_eq!(girard.year, Some(1972));
        assert_eq!(girard.access_type, Some(AccessType::PreprintArchive));
        assert_eq!(girard.local_path.as_deref(), Some("typed/girard1972.pdf"));
        assert_eq!(girard.notes.as_deref(), Some("System F"));
    }

    #[test]
    fn test_malformed_fields_are_skipped() {
        let json = r#"{"download_sources": {"misc": {
            "a": {"title": 42, "author": "Curry, H. B.", "year": "1958", "access_type": "ZZ"},
            "b": {"year": 1958.5, "access_type": 3},
            "c": "not an object"
        }}}"#;
        let corpus = parse_corpus(json);
        assert_eq!(corpus.len(), 3);

        let a = &corpus.records()[0];
        assert_eq!(a.title, None);
        assert_eq!(a.author.as_deref(), Some("Curry, H. B."));
        assert_eq!(a.year, None);
        assert_eq!(a.access_type, None);

        let b = &corpus.records()[1];
        assert_eq!(b.year, None);
        assert_eq!(b.access_type, None);

        let c = &corpus.records()[2];
        assert_eq!(c.id, RecordKey::new("misc", "c"));
        assert_eq!(c.title, None);
    }

    #[test]
    fn test_missing_sources_is_empty_corpus() {
        let corpus = parse_corpus(r#"{"other": 1}"#);
        assert!(corpus.is_empty());
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(parse_records("{not json").is_err());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_archive(dir.path()).unwrap_err();
        assert!(matches!(err, CorpusError::Io { .. }));
    }

    #[test]
    fn test_load_archive_layout() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("metadata")).unwrap();
        fs::write(archive_metadata_path(dir.path()), SAMPLE).unwrap();

        let corpus = load_archive(dir.path()).unwrap();
        assert_eq!(corpus.len(), 2);
    }

    #[test]
    fn test_load_unparseable_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.json");
        fs::write(&path, "[1, 2").unwrap();
        let err = load_corpus_file(&path).unwrap_err();
        assert!(matches!(err, CorpusError::Parse { .. }));
    }
}
