//! Utility functions shared by the index and query layers.
//!
//! - [`tokenizer`] - Normalization of free text into index terms
//! - [`app_data`] - Configuration file location and loading
//! - [`progress`] - Loading spinner (no-op without the `progress` feature)
//!
//! ```
//! use bibsearch::utils::tokenize;
//!
//! let terms = tokenize("The Lambda-Calculus: a survey");
//! assert_eq!(terms, vec!["the", "lambda-calculus", "survey"]);
//! ```

pub mod app_data;
pub mod progress;
pub mod tokenizer;

pub use app_data::*;
pub use progress::Spinner;
pub use tokenizer::*;
