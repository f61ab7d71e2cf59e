//! Configuration management for the todo binary.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::environment::IdStrategy;
use crate::theme::{ColorSchemePreference, FixedPreference, TerminalPreference};
use crate::types::{ParseEnumError, SeedList};
use std::path::PathBuf;
use thiserror::Error;

/// Default location of the data file
pub const DEFAULT_DATA_FILE: &str = "todo-data.json";

/// Configuration error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An enumerated setting had an unknown value
    #[error("invalid {variable}: {source}")]
    InvalidChoice {
        /// Variable name
        variable: &'static str,
        /// Parse failure
        source: ParseEnumError,
    },

    /// A boolean setting had a non-boolean value
    #[error("invalid {variable}: expected true or false, got '{value}'")]
    InvalidBool {
        /// Variable name
        variable: &'static str,
        /// Raw value
        value: String,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Backing file of the key/value store (`TODO_DATA_FILE`)
    pub data_file: PathBuf,
    /// List used when nothing is persisted (`TODO_SEED`)
    pub seed: SeedList,
    /// How new ids are generated (`TODO_ID_STRATEGY`)
    pub id_strategy: IdStrategy,
    /// Forced dark-mode signal (`TODO_PREFERS_DARK`); `None` detects from the terminal
    pub prefers_dark: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            seed: SeedList::default(),
            id_strategy: IdStrategy::default(),
            prefers_dark: None,
        }
    }
}

impl Config {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a set variable has an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value
    ///
    /// Unset and empty variables take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a set variable has an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let seed = get("TODO_SEED")
            .map(|v| v.parse::<SeedList>())
            .transpose()
            .map_err(|source| ConfigError::InvalidChoice {
                variable: "TODO_SEED",
                source,
            })?
            .unwrap_or(defaults.seed);

        let id_strategy = get("TODO_ID_STRATEGY")
            .map(|v| v.parse::<IdStrategy>())
            .transpose()
            .map_err(|source| ConfigError::InvalidChoice {
                variable: "TODO_ID_STRATEGY",
                source,
            })?
            .unwrap_or(defaults.id_strategy);

        let prefers_dark = get("TODO_PREFERS_DARK")
            .map(|v| parse_bool("TODO_PREFERS_DARK", &v))
            .transpose()?;

        Ok(Self {
            data_file: get("TODO_DATA_FILE").map_or(defaults.data_file, PathBuf::from),
            seed,
            id_strategy,
            prefers_dark,
        })
    }

    /// The dark-mode signal this configuration asks for
    #[must_use]
    pub fn preference(&self) -> Box<dyn ColorSchemePreference> {
        match self.prefers_dark {
            Some(forced) => Box::new(FixedPreference(Some(forced))),
            None => Box::new(TerminalPreference::from_env()),
        }
    }
}

fn parse_bool(variable: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            variable,
            value: value.to_string(),
        }),
    }
}
