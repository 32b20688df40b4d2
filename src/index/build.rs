use crate::index::types::{AccessType, Corpus, Record, RecordId};
use crate::utils::{split_authors, token_count, tokenize};
use roaring::RoaringBitmap;
use std::collections::{BTreeMap, HashMap};
use std::time::Instant;
use tracing::{debug, info};

/// Hash map keyed by index term
pub type TermMap = HashMap<String, RoaringBitmap, ahash::RandomState>;

/// Lower-cased per-record text used at scoring time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentText {
    /// Lower-cased title + author + notes
    pub searchable: String,
    /// Number of tokens in `searchable`
    pub token_count: u32,
    pub title: String,
    pub author: String,
}

impl DocumentText {
    fn from_record(record: &Record) -> Self {
        let searchable = record.searchable_text().to_lowercase();
        let token_count = token_count(&searchable) as u32;
        Self {
            searchable,
            token_count,
            title: record.title.as_deref().unwrap_or_default().to_lowercase(),
            author: record.author.as_deref().unwrap_or_default().to_lowercase(),
        }
    }
}

/// Inverted word index plus facet indices over one corpus.
///
/// Built once by [`SearchIndex::build`] and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchIndex {
    /// term -> records whose searchable text contains it
    pub(crate) words: TermMap,
    /// lower-cased author string or sub-author -> records
    pub(crate) authors: TermMap,
    pub(crate) years: BTreeMap<i32, RoaringBitmap>,
    pub(crate) categories: BTreeMap<String, RoaringBitmap>,
    pub(crate) access_types: BTreeMap<AccessType, RoaringBitmap>,
    /// Indexed by `RecordId`
    pub(crate) documents: Vec<DocumentText>,
    pub(crate) all: RoaringBitmap,
}

impl SearchIndex {
    /// Build every index in a single pass over the corpus
    pub fn build(corpus: &Corpus) -> Self {
        let start = Instant::now();
        let mut builder = IndexBuilder::with_capacity(corpus.len());

        for (id, record) in corpus.iter() {
            builder.add_record(id, record);
        }

        let index = builder.finish();
        info!(
            records = index.record_count(),
            terms = index.words.len(),
            authors = index.authors.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "built search index"
        );
        index
    }

    pub fn record_count(&self) -> u64 {
        self.all.len()
    }

    /// Every record id in the corpus
    pub fn all_records(&self) -> &RoaringBitmap {
        &self.all
    }

    pub fn word_postings(&self, term: &str) -> Option<&RoaringBitmap> {
        self.words.get(term)
    }

    pub fn author_postings(&self, author: &str) -> Option<&RoaringBitmap> {
        self.authors.get(author)
    }

    pub fn year_postings(&self, year: i32) -> Option<&RoaringBitmap> {
        self.years.get(&year)
    }

    pub fn category_postings(&self, category: &str) -> Option<&RoaringBitmap> {
        self.categories.get(category)
    }

    pub fn access_postings(&self, access: AccessType) -> Option<&RoaringBitmap> {
        self.access_types.get(&access)
    }

    /// Number of records indexed under exactly `term`
    pub fn document_frequency(&self, term: &str) -> u64 {
        self.words.get(term).map_or(0, RoaringBitmap::len)
    }

    pub fn document(&self, id: RecordId) -> Option<&DocumentText> {
        self.documents.get(id as usize)
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.words.keys().map(String::as_str)
    }

    pub fn author_keys(&self) -> impl Iterator<Item = &str> {
        self.authors.keys().map(String::as_str)
    }

    pub fn category_keys(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    pub fn access_keys(&self) -> impl Iterator<Item = AccessType> + '_ {
        self.access_types.keys().copied()
    }
}

/// Accumulates index entries record by record
struct IndexBuilder {
    words: TermMap,
    authors: TermMap,
    years: BTreeMap<i32, RoaringBitmap>,
    categories: BTreeMap<String, RoaringBitmap>,
    access_types: BTreeMap<AccessType, RoaringBitmap>,
    documents: Vec<DocumentText>,
    all: RoaringBitmap,
}

impl IndexBuilder {
    fn with_capacity(records: usize) -> Self {
        Self {
            words: TermMap::default(),
            authors: TermMap::default(),
            years: BTreeMap::new(),
            categories: BTreeMap::new(),
            access_types: BTreeMap::new(),
            documents: Vec::with_capacity(records),
            all: RoaringBitmap::new(),
        }
    }

    fn add_record(&mut self, id: RecordId, record: &Record) {
        debug_assert_eq!(id as usize, self.documents.len());
        self.all.insert(id);

        // Bitmap inserts are idempotent, so repeated terms add one entry
        for term in tokenize(&record.searchable_text()) {
            self.words.entry(term).or_default().insert(id);
        }

        if let Some(year) = record.year {
            self.years.entry(year).or_default().insert(id);
        }

        self.categories
            .entry(record.category().to_string())
            .or_default()
            .insert(id);

        if let Some(access) = record.access_type {
            self.access_types.entry(access).or_default().insert(id);
        }

        if let Some(author) = record.author.as_deref().filter(|a| !a.is_empty()) {
            self.authors.entry(author.to_lowercase()).or_default().insert(id);
            for part in split_authors(author) {
                self.authors.entry(part).or_default().insert(id);
            }
        } else {
            debug!(record = %record.id, "record has no author");
        }

        self.documents.push(DocumentText::from_record(record));
    }

    fn finish(self) -> SearchIndex {
        SearchIndex {
            words: self.words,
            authors: self.authors,
            years: self.years,
            categories: self.categories,
            access_types: self.access_types,
            documents: self.documents,
            all: self.all,
        }
    }
}
