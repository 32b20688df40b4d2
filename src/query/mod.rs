pub mod executor;
pub mod parser;
pub mod ranker;
pub mod resolver;
pub mod scorer;
pub mod suggest;

pub use executor::QueryExecutor;
pub use parser::{Operator, QueryFilters, QueryOptions, QueryParseError, SearchQuery, parse_query};
pub use resolver::QueryResolver;
pub use scorer::{Scorer, ScoringWeights};
pub use suggest::{SuggestionLimits, Suggestions, suggest};
