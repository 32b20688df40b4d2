use crate::index::types::{AccessType, UnknownAccessType};
use serde::{Deserialize, Serialize};

/// Default number of results returned by a search
pub const DEFAULT_MAX_RESULTS: usize = 50;

/// Structured search request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Free-text words; empty means every record is a candidate
    pub text: String,
    /// How per-word matches are combined
    pub operator: Operator,
    pub filters: QueryFilters,
    pub options: QueryOptions,
}

impl SearchQuery {
    /// Query for free text with default filters and options
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_operator(mut self, operator: Operator) -> Self {
        self.operator = operator;
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.filters.author = Some(author.into());
        self
    }

    pub fn with_years(mut self, start: Option<i32>, end: Option<i32>) -> Self {
        self.filters.year_start = start;
        self.filters.year_end = end;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.filters.categories.push(category.into());
        self
    }

    pub fn with_access_type(mut self, access: AccessType) -> Self {
        self.filters.access_types.push(access);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.options.limit = limit;
        self
    }
}

/// Combination of per-word result sets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    /// Every word must match
    #[default]
    And,
    /// Any word may match
    Or,
}

impl std::str::FromStr for Operator {
    type Err = QueryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "and" => Ok(Operator::And),
            "or" => Ok(Operator::Or),
            _ => Err(QueryParseError::InvalidOperator(s.to_string())),
        }
    }
}

/// Facet filters. Absent or empty filters impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryFilters {
    /// Author substring (author:church)
    pub author: Option<String>,
    /// Inclusive lower year bound (year:1930-)
    pub year_start: Option<i32>,
    /// Inclusive upper year bound (year:-1940)
    pub year_end: Option<i32>,
    /// Any of these categories (category:foundations)
    pub categories: Vec<String>,
    /// Any of these access types (access:OA)
    pub access_types: Vec<AccessType>,
}

impl QueryFilters {
    /// Check if any filter is set
    pub fn has_any(&self) -> bool {
        self.author().is_some()
            || self.has_year_range()
            || !self.categories.is_empty()
            || !self.access_types.is_empty()
    }

    /// Author filter, ignoring blank values
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref().map(str::trim).filter(|a| !a.is_empty())
    }

    pub fn has_year_range(&self) -> bool {
        self.year_start.is_some() || self.year_end.is_some()
    }
}

/// Query options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryOptions {
    /// Maximum results; zero yields no results
    pub limit: usize,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_MAX_RESULTS,
        }
    }
}

/// Errors in an interactive query line
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryParseError {
    #[error("invalid year range {0:?} (use year:1980-2000, year:1980- or year:1936)")]
    InvalidYear(String),
    #[error(transparent)]
    InvalidAccessType(#[from] UnknownAccessType),
    #[error("invalid operator {0:?} (use op:and or op:or)")]
    InvalidOperator(String),
    #[error("unterminated quote in {0:?}")]
    UnterminatedQuote(String),
}

/// Parse an interactive query line into a `SearchQuery`.
///
/// Plain words become the free text. Recognized fields:
/// `author:<name>`, `year:<start>-<end>`, `category:<name>`,
/// `access:<code>` and `op:and|or`. Field values may be double-quoted to
/// include spaces (`author:"Alonzo Church"`).
pub fn parse_query(input: &str) -> Result<SearchQuery, QueryParseError> {
    let mut parser = QueryParser::new(input);
    parser.parse()
}

/// Query line parser
struct QueryParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> QueryParser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn parse(&mut self) -> Result<SearchQuery, QueryParseError> {
        let mut query = SearchQuery::default();
        let mut words: Vec<&str> = Vec::new();

        loop {
            self.skip_whitespace();
            if self.is_eof() {
                break;
            }

            let term = self.read_term()?;
            match term.split_once(':') {
                Some((field, value)) => {
                    if !self.apply_field(&mut query, field, value)? {
                        // Unknown field, keep it as text
                        words.push(term);
                    }
                }
                None => words.push(term),
            }
        }

        query.text = words.join(" ");
        Ok(query)
    }

    /// Apply a field filter, returning false if the field name is not recognized
    fn apply_field(
        &self,
        query: &mut SearchQuery,
        field: &str,
        value: &str,
    ) -> Result<bool, QueryParseError> {
        let value = unquote(value);
        match field.to_ascii_lowercase().as_str() {
            "author" => {
                query.filters.author = Some(value.to_string());
            }
            "year" => {
                let (start, end) = parse_year_range(value)?;
                query.filters.year_start = start;
                query.filters.year_end = end;
            }
            "category" | "cat" => {
                if !value.is_empty() {
                    query.filters.categories.push(value.to_string());
                }
            }
            "access" => {
                query.filters.access_types.push(value.parse()?);
            }
            "op" => {
                query.operator = value.parse()?;
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    /// Read one whitespace-delimited term, keeping quoted sections intact
    fn read_term(&mut self) -> Result<&'a str, QueryParseError> {
        let start = self.pos;
        let mut in_quote = false;

        while let Some(ch) = self.peek_char() {
            if ch == '"' {
                in_quote = !in_quote;
            } else if ch.is_whitespace() && !in_quote {
                break;
            }
            self.advance();
        }

        let input = self.input;
        let term = &input[start..self.pos];
        if in_quote {
            return Err(QueryParseError::UnterminatedQuote(term.to_string()));
        }
        Ok(term)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek_char() {
            if !ch.is_whitespace() {
                break;
            }
            self.advance();
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.peek_char() {
            self.pos += ch.len_utf8();
        }
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

/// Parse `start-end`, `start-`, `-end` or a single `year`
fn parse_year_range(value: &str) -> Result<(Option<i32>, Option<i32>), QueryParseError> {
    let invalid = || QueryParseError::InvalidYear(value.to_string());
    let parse_bound = |s: &str| -> Result<Option<i32>, QueryParseError> {
        let s = s.trim();
        if s.is_empty() {
            Ok(None)
        } else {
            s.parse().map(Some).map_err(|_| invalid())
        }
    };

    match value.split_once('-') {
        Some((start, end)) => {
            let range = (parse_bound(start)?, parse_bound(end)?);
            if range == (None, None) {
                return Err(invalid());
            }
            Ok(range)
        }
        None => {
            let year = parse_bound(value)?.ok_or_else(invalid)?;
            Ok((Some(year), Some(year)))
        }
    }
}
