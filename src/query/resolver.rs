//! Candidate set resolution.
//!
//! Each criterion of a [`SearchQuery`] is turned into a record bitmap and the
//! bitmaps are intersected in a fixed order: free text (or every record),
//! author, year range, categories, access types. Criteria that are not
//! supplied are skipped.

use crate::index::build::{SearchIndex, TermMap};
use crate::query::parser::{Operator, QueryFilters, SearchQuery};
use crate::utils::tokenize;
use roaring::RoaringBitmap;
use std::ops::Bound;
use tracing::trace;

/// Resolves queries against a built index
pub struct QueryResolver<'a> {
    index: &'a SearchIndex,
}

impl<'a> QueryResolver<'a> {
    pub fn new(index: &'a SearchIndex) -> Self {
        Self { index }
    }

    /// Records satisfying every supplied criterion of `query`
    pub fn resolve(&self, query: &SearchQuery) -> RoaringBitmap {
        let mut candidates = if query.text.trim().is_empty() {
            self.index.all_records().clone()
        } else {
            self.match_words(&tokenize(&query.text), query.operator)
        };
        trace!(count = candidates.len(), "free text candidates");

        self.apply_filters(&mut candidates, &query.filters);
        candidates
    }

    fn apply_filters(&self, candidates: &mut RoaringBitmap, filters: &QueryFilters) {
        if let Some(author) = filters.author() {
            *candidates &= self.match_author(author);
            trace!(count = candidates.len(), "after author filter");
        }

        if filters.has_year_range() {
            *candidates &= self.match_years(filters.year_start, filters.year_end);
            trace!(count = candidates.len(), "after year filter");
        }

        if !filters.categories.is_empty() {
            let mut allowed = RoaringBitmap::new();
            for category in &filters.categories {
                if let Some(ids) = self.index.category_postings(category) {
                    allowed |= ids;
                }
            }
            *candidates &= allowed;
            trace!(count = candidates.len(), "after category filter");
        }

        if !filters.access_types.is_empty() {
            let mut allowed = RoaringBitmap::new();
            for &access in &filters.access_types {
                if let Some(ids) = self.index.access_postings(access) {
                    allowed |= ids;
                }
            }
            *candidates &= allowed;
            trace!(count = candidates.len(), "after access type filter");
        }
    }

    /// Combine per-term matches with `operator`. No terms means no matches.
    pub fn match_words(&self, terms: &[String], operator: Operator) -> RoaringBitmap {
        let mut per_term = terms.iter().map(|term| self.match_term(term));

        let Some(first) = per_term.next() else {
            return RoaringBitmap::new();
        };

        match operator {
            Operator::And => per_term.fold(first, |acc, ids| acc & ids),
            Operator::Or => per_term.fold(first, |acc, ids| acc | ids),
        }
    }

    /// Records indexed under any term equal to, containing, or contained by `term`
    pub fn match_term(&self, term: &str) -> RoaringBitmap {
        union_matching(&self.index.words, term)
    }

    /// Records whose author keys contain, or are contained by, `author`
    /// (case-insensitive)
    pub fn match_author(&self, author: &str) -> RoaringBitmap {
        union_matching(&self.index.authors, &author.to_lowercase())
    }

    /// Records with a year inside the inclusive bounds. Missing bounds are open.
    pub fn match_years(&self, start: Option<i32>, end: Option<i32>) -> RoaringBitmap {
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return RoaringBitmap::new();
            }
        }

        let lower = start.map_or(Bound::Unbounded, Bound::Included);
        let upper = end.map_or(Bound::Unbounded, Bound::Included);

        let mut ids = RoaringBitmap::new();
        for (_, year_ids) in self.index.years.range((lower, upper)) {
            ids |= year_ids;
        }
        ids
    }
}

/// Union the postings of every key that contains `needle` or is contained by it
fn union_matching(map: &TermMap, needle: &str) -> RoaringBitmap {
    let mut ids = RoaringBitmap::new();
    for (key, key_ids) in map {
        if key.contains(needle) || needle.contains(key.as_str()) {
            ids |= key_ids;
        }
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::types::{AccessType, Corpus, Record};

    fn sample_index() -> SearchIndex {
        let corpus = Corpus::new(vec![
            Record::new("foundations", "church1936")
                .with_title("An Unsolvable Problem of Elementary Number Theory")
                .with_author("Church, A.")
                .with_year(1936)
                .with_access_type(AccessType::PublicDomain)
                .with_notes("lambda calculus"),
            Record::new("typed", "girard1972")
                .with_title("Lambdas in System F")
                .with_author("Girard, J.-Y.")
                .with_year(1972)
                .with_access_type(AccessType::PreprintArchive),
            Record::new("typed", "reynolds1974")
                .with_title("Towards a theory of type structure")
                .with_author("Reynolds, J. C.")
                .with_year(1974)
                .with_notes("polymorphic lambda-calculus"),
            Record::new("misc", "undated").with_title("Notes on combinators"),
        ])
        .unwrap();
        SearchIndex::build(&corpus)
    }

    fn ids(bitmap: &RoaringBitmap) -> Vec<u32> {
        bitmap.iter().collect()
    }

    #[test]
    fn test_bidirectional_word_match() {
        let index = sample_index();
        let resolver = QueryResolver::new(&index);
        // "lambda" is contained by "lambdas" and "lambda-calculus"
        assert_eq!(ids(&resolver.match_term("lambda")), vec![0, 1, 2]);
        // "calculuses" contains "calculus"
        assert_eq!(ids(&resolver.match_term("calculuses")), vec![0]);
    }

    #[test]
    fn test_and_or() {
        let index = sample_index();
        let resolver = QueryResolver::new(&index);

        let and = resolver.resolve(&SearchQuery::text("lambda theory"));
        assert_eq!(ids(&and), vec![0, 2]);

        let or = resolver.resolve(&SearchQuery::text("system combinators").with_operator(Operator::Or));
        assert_eq!(ids(&or), vec![1, 3]);

        let and = resolver.resolve(&SearchQuery::text("system combinators"));
        assert!(and.is_empty());
    }

    #[test]
    fn test_empty_text_is_all_records() {
        let index = sample_index();
        let resolver = QueryResolver::new(&index);
        assert_eq!(resolver.resolve(&SearchQuery::default()).len(), 4);
        assert_eq!(resolver.resolve(&SearchQuery::text("   ")).len(), 4);
    }

    #[test]
    fn test_text_without_terms_matches_nothing() {
        let index = sample_index();
        let resolver = QueryResolver::new(&index);
        assert!(resolver.resolve(&SearchQuery::text("of a")).is_empty());
    }

    #[test]
    fn test_author_match() {
        let index = sample_index();
        let resolver = QueryResolver::new(&index);
        assert_eq!(ids(&resolver.match_author("CHURCH")), vec![0]);
        assert_eq!(ids(&resolver.match_author("John Reynolds")), vec![2]);
        assert!(resolver.match_author("turing").is_empty());
    }

    #[test]
    fn test_year_ranges() {
        let index = sample_index();
        let resolver = QueryResolver::new(&index);
        assert_eq!(ids(&resolver.match_years(Some(1970), Some(1980))), vec![1, 2]);
        assert_eq!(ids(&resolver.match_years(None, Some(1972))), vec![0, 1]);
        assert_eq!(ids(&resolver.match_years(Some(1974), None)), vec![2]);
        assert!(resolver.match_years(Some(1980), Some(1970)).is_empty());
    }

    #[test]
    fn test_undated_records_excluded_by_year_filter() {
        let index = sample_index();
        let resolver = QueryResolver::new(&index);
        let query = SearchQuery::default().with_years(None, Some(3000));
        assert!(!resolver.resolve(&query).contains(3));
    }

    #[test]
    fn test_category_and_access_filters() {
        let index = sample_index();
        let resolver = QueryResolver::new(&index);

        let query = SearchQuery::default()
            .with_category("typed")
            .with_category("misc");
        assert_eq!(ids(&resolver.resolve(&query)), vec![1, 2, 3]);

        let query = SearchQuery::default()
            .with_category("typed")
            .with_access_type(AccessType::PreprintArchive);
        assert_eq!(ids(&resolver.resolve(&query)), vec![1]);

        let query = SearchQuery::default().with_category("nonexistent");
        assert!(resolver.resolve(&query).is_empty());
    }

    #[test]
    fn test_filters_intersect_with_text() {
        let index = sample_index();
        let resolver = QueryResolver::new(&index);
        let query = SearchQuery::text("lambda")
            .with_author("girard")
            .with_years(Some(1970), None);
        assert_eq!(ids(&resolver.resolve(&query)), vec![1]);
    }
}
