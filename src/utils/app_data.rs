use crate::query::parser::DEFAULT_MAX_RESULTS;
use crate::query::scorer::ScoringWeights;
use crate::query::suggest::SuggestionLimits;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_NAME: &str = "bibsearch";
const CONFIG_FILE: &str = "config.json";

/// Application configuration. Every field falls back to its default when
/// missing from the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Boosts applied by the relevance scorer
    #[serde(default)]
    pub scoring_weights: ScoringWeights,

    /// Default number of results for a search
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Maximum word and author suggestions
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,

    /// Suggested words must be longer than this
    #[serde(default = "default_suggestion_min_word_len")]
    pub suggestion_min_word_len: usize,

    /// Result count in interactive mode
    #[serde(default = "default_interactive_max_results")]
    pub interactive_max_results: usize,
}

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

fn default_suggestion_limit() -> usize {
    SuggestionLimits::default().max_items
}

fn default_suggestion_min_word_len() -> usize {
    SuggestionLimits::default().min_word_len
}

fn default_interactive_max_results() -> usize {
    10
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scoring_weights: ScoringWeights::default(),
            max_results: default_max_results(),
            suggestion_limit: default_suggestion_limit(),
            suggestion_min_word_len: default_suggestion_min_word_len(),
            interactive_max_results: default_interactive_max_results(),
        }
    }
}

impl AppConfig {
    /// Load config from an explicit path, or from the user config directory
    /// if a file exists there, or fall back to defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        match get_config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn suggestion_limits(&self) -> SuggestionLimits {
        SuggestionLimits {
            max_items: self.suggestion_limit,
            min_word_len: self.suggestion_min_word_len,
        }
    }
}

/// Get the path to the user config file, if a config directory is known
pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME).join(CONFIG_FILE))
}
