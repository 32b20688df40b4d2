use crate::error::CorpusError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Dense identifier of a record in the corpus arena
pub type RecordId = u32;

/// Unique identifier of a record: its category plus its key within that category
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordKey {
    pub category: String,
    pub key: String,
}

impl RecordKey {
    pub fn new(category: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            key: key.into(),
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category, self.key)
    }
}

/// Access classification of a paper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AccessType {
    #[serde(rename = "OA")]
    OpenAccess,
    #[serde(rename = "AP")]
    AuthorPermission,
    #[serde(rename = "PD")]
    PublicDomain,
    #[serde(rename = "IR")]
    InstitutionalRepository,
    #[serde(rename = "AR")]
    PreprintArchive,
}

impl AccessType {
    pub const ALL: [AccessType; 5] = [
        AccessType::OpenAccess,
        AccessType::AuthorPermission,
        AccessType::PublicDomain,
        AccessType::InstitutionalRepository,
        AccessType::PreprintArchive,
    ];

    /// Short code used in the archive metadata and on the command line
    pub fn code(self) -> &'static str {
        match self {
            AccessType::OpenAccess => "OA",
            AccessType::AuthorPermission => "AP",
            AccessType::PublicDomain => "PD",
            AccessType::InstitutionalRepository => "IR",
            AccessType::PreprintArchive => "AR",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            AccessType::OpenAccess => "open access",
            AccessType::AuthorPermission => "author permission",
            AccessType::PublicDomain => "public domain",
            AccessType::InstitutionalRepository => "institutional repository",
            AccessType::PreprintArchive => "preprint archive",
        }
    }
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when an access code is not one of the five known codes
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown access type {0:?} (expected one of OA, AP, PD, IR, AR)")]
pub struct UnknownAccessType(pub String);

impl FromStr for AccessType {
    type Err = UnknownAccessType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AccessType::ALL
            .into_iter()
            .find(|access| access.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownAccessType(s.to_string()))
    }
}

/// A bibliographic record. Created once at load time and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordKey,
    pub title: Option<String>,
    pub author: Option<String>,
    pub year: Option<i32>,
    pub access_type: Option<AccessType>,
    pub local_path: Option<String>,
    pub url: Option<String>,
    pub notes: Option<String>,
}

impl Record {
    /// Create a record with only its identifier set
    pub fn new(category: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            id: RecordKey::new(category, key),
            title: None,
            author: None,
            year: None,
            access_type: None,
            local_path: None,
            url: None,
            notes: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_access_type(mut self, access_type: AccessType) -> Self {
        self.access_type = Some(access_type);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_local_path(mut self, local_path: impl Into<String>) -> Self {
        self.local_path = Some(local_path.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn category(&self) -> &str {
        &self.id.category
    }

    /// Title, author and notes joined by single spaces, skipping absent or
    /// empty fields
    pub fn searchable_text(&self) -> String {
        [&self.title, &self.author, &self.notes]
            .into_iter()
            .filter_map(|field| field.as_deref())
            .filter(|field| !field.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// The immutable record arena. A record's position is its `RecordId`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    records: Vec<Record>,
}

impl Corpus {
    /// Build a corpus, rejecting duplicate identifiers
    pub fn new(records: Vec<Record>) -> Result<Self, CorpusError> {
        if u32::try_from(records.len()).is_err() {
            return Err(CorpusError::TooManyRecords(records.len()));
        }

        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(&record.id) {
                return Err(CorpusError::DuplicateRecord(record.id.clone()));
            }
        }

        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.get(id as usize)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Iterate records together with their ids
    pub fn iter(&self) -> impl Iterator<Item = (RecordId, &Record)> {
        // Length is bounded by u32::MAX in `new`
        self.records
            .iter()
            .enumerate()
            .map(|(idx, record)| (idx as RecordId, record))
    }
}

/// One ranked search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Key of the record within its category
    pub paper_id: String,
    pub category: String,
    pub title: String,
    pub author: String,
    pub year: Option<i32>,
    pub score: f64,
    /// Fields that matched the query ("title: lambda")
    pub matches: Vec<String>,
    pub local_path: String,
    pub url: String,
    pub access_type: Option<AccessType>,
}

impl SearchResult {
    pub fn from_record(record: &Record, score: f64, matches: Vec<String>) -> Self {
        Self {
            paper_id: record.id.key.clone(),
            category: record.id.category.clone(),
            title: record.title.clone().unwrap_or_else(|| "Untitled".to_string()),
            author: record.author.clone().unwrap_or_else(|| "Unknown".to_string()),
            year: record.year,
            score,
            matches,
            local_path: record.local_path.clone().unwrap_or_default(),
            url: record.url.clone().unwrap_or_default(),
            access_type: record.access_type,
        }
    }

    /// Full identifier, `category/paper_id`
    pub fn record_key(&self) -> RecordKey {
        RecordKey::new(self.category.clone(), self.paper_id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_type_codes() {
        for access in AccessType::ALL {
            assert_eq!(access.code().parse::<AccessType>(), Ok(access));
        }
        assert_eq!("oa".parse::<AccessType>(), Ok(AccessType::OpenAccess));
        assert!("XX".parse::<AccessType>().is_err());
    }

    #[test]
    fn test_access_type_serde_uses_codes() {
        let json = serde_json::to_string(&AccessType::PreprintArchive).unwrap();
        assert_eq!(json, "\"AR\"");
        let parsed: AccessType = serde_json::from_str("\"PD\"").unwrap();
        assert_eq!(parsed, AccessType::PublicDomain);
    }

    #[test]
    fn test_record_key_display() {
        let key = RecordKey::new("foundations", "church1936");
        assert_eq!(key.to_string(), "foundations/church1936");
    }

    #[test]
    fn test_searchable_text_skips_missing_fields() {
        let record = Record::new("c", "k")
            .with_title("Title")
            .with_notes("some notes");
        assert_eq!(record.searchable_text(), "Title some notes");

        let bare = Record::new("c", "k").with_author("");
        assert_eq!(bare.searchable_text(), "");
    }

    #[test]
    fn test_corpus_rejects_duplicates() {
        let records = vec![Record::new("a", "x"), Record::new("b", "x"), Record::new("a", "x")];
        let err = Corpus::new(records).unwrap_err();
        assert!(matches!(err, CorpusError::DuplicateRecord(key) if key == RecordKey::new("a", "x")));
    }

    #[test]
    fn test_search_result_defaults() {
        let result = SearchResult::from_record(&Record::new("misc", "anon"), 0.0, Vec::new());
        assert_eq!(result.title, "Untitled");
        assert_eq!(result.author, "Unknown");
        assert_eq!(result.year, None);
        assert!(result.local_path.is_empty());
        assert_eq!(result.record_key(), RecordKey::new("misc", "anon"));
    }

    #[test]
    fn test_corpus_ids_are_positions() {
        let corpus = Corpus::new(vec![Record::new("a", "1"), Record::new("a", "2")]).unwrap();
        let ids: Vec<_> = corpus.iter().map(|(id, r)| (id, r.id.key.clone())).collect();
        assert_eq!(ids, vec![(0, "1".to_string()), (1, "2".to_string())]);
        assert_eq!(corpus.get(1).map(|r| r.id.key.as_str()), Some("2"));
        assert!(corpus.get(2).is_none());
    }
}
