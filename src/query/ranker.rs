use crate::index::types::SearchResult;
use std::cmp::Ordering;

/// Result ordering: score descending, then `category/paper_id` ascending.
///
/// Record identifiers are unique, so this is a total order and the ranking
/// does not depend on candidate encounter order.
pub fn compare_results(a: &SearchResult, b: &SearchResult) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.category.cmp(&b.category))
        .then_with(|| a.paper_id.cmp(&b.paper_id))
}

/// Sort results and keep the best `limit`. A limit of zero returns nothing.
pub fn rank(mut results: Vec<SearchResult>, limit: usize) -> Vec<SearchResult> {
    if limit == 0 {
        return Vec::new();
    }

    // Partition out the top-k first so only `limit` results get fully sorted
    if limit < results.len() {
        results.select_nth_unstable_by(limit - 1, compare_results);
        results.truncate(limit);
    }

    results.sort_unstable_by(compare_results);
    results
}
