/// Tokens must be longer than this many characters to be kept.
pub const MIN_TOKEN_CHARS: usize = 2;

/// Normalize free text into index terms.
///
/// Every character that is not alphanumeric, a hyphen, or whitespace acts as
/// a separator. Tokens of `MIN_TOKEN_CHARS` characters or fewer are dropped
/// and the rest are lower-cased. Order and duplicates are preserved, so the
/// result doubles as the token count used for term frequency.
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .chars()
        .map(|ch| {
            if ch.is_alphanumeric() || ch == '-' || ch.is_whitespace() {
                ch
            } else {
                ' '
            }
        })
        .collect();

    cleaned
        .split_whitespace()
        .filter(|word| word.chars().count() > MIN_TOKEN_CHARS)
        .map(str::to_lowercase)
        .collect()
}

/// Number of tokens `tokenize` would produce, without allocating them.
pub fn token_count(text: &str) -> usize {
    text.split(|ch: char| !(ch.is_alphanumeric() || ch == '-'))
        .filter(|word| word.chars().count() > MIN_TOKEN_CHARS)
        .count()
}

/// Split a free-form author string ("Last, F. & Last2, F2") into its
/// lower-cased, trimmed, non-empty parts.
pub fn split_authors(author: &str) -> impl Iterator<Item = String> + '_ {
    author
        .split([',', ';', '&'])
        .map(|part| part.trim().to_lowercase())
        .filter(|part| !part.is_empty())
}
