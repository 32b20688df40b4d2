//! Completion suggestions drawn from the search indices

use crate::index::build::SearchIndex;
use serde::{Deserialize, Serialize};

/// Limits applied when collecting suggestions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestionLimits {
    /// Maximum words and authors returned
    pub max_items: usize,
    /// Suggested words must be longer than this many characters
    pub min_word_len: usize,
}

impl Default for SuggestionLimits {
    fn default() -> Self {
        Self {
            max_items: 10,
            min_word_len: 3,
        }
    }
}

/// Suggestion lists for a partial query, each sorted lexicographically
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestions {
    pub words: Vec<String>,
    pub authors: Vec<String>,
    pub categories: Vec<String>,
    pub access_types: Vec<String>,
}

impl Suggestions {
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
            && self.authors.is_empty()
            && self.categories.is_empty()
            && self.access_types.is_empty()
    }

    /// Named lists in display order
    pub fn sections(&self) -> [(&'static str, &[String]); 4] {
        [
            ("Words", self.words.as_slice()),
            ("Authors", self.authors.as_slice()),
            ("Categories", self.categories.as_slice()),
            ("Access Types", self.access_types.as_slice()),
        ]
    }
}

/// Collect suggestions for `partial` (matched case-insensitively as a substring)
pub fn suggest(index: &SearchIndex, partial: &str, limits: SuggestionLimits) -> Suggestions {
    let partial = partial.to_lowercase();

    let words = index
        .terms()
        .filter(|word| word.chars().count() > limits.min_word_len && word.contains(&partial));
    let authors = index.author_keys().filter(|author| author.contains(&partial));

    // Category and access type sets are small, so they are not limited
    let categories: Vec<String> = index
        .category_keys()
        .filter(|category| category.to_lowercase().contains(&partial))
        .map(str::to_string)
        .collect();
    let mut access_types: Vec<String> = index
        .access_keys()
        .map(|access| access.code())
        .filter(|code| code.to_lowercase().contains(&partial))
        .map(str::to_string)
        .collect();
    access_types.sort_unstable();

    Suggestions {
        words: sorted_prefix(words, limits.max_items),
        authors: sorted_prefix(authors, limits.max_items),
        categories,
        access_types,
    }
}

fn sorted_prefix<'a>(items: impl Iterator<Item = &'a str>, limit: usize) -> Vec<String> {
    let mut items: Vec<&str> = items.collect();
    items.sort_unstable();
    items.into_iter().take(limit).map(str::to_string).collect()
}
