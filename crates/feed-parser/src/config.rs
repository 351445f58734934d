// crates/feed-parser/src/config.rs
//! Parser configuration
//!
//! Limits are applied while the document tree is built, so an oversized
//! or pathologically nested input is rejected before any feed is assembled.

use crate::error::{ConfigError, ConfigResult, ValidationError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default input size limit (16 MiB)
pub const DEFAULT_MAX_INPUT_BYTES: usize = 16 * 1024 * 1024;

/// Default element nesting limit
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Settings for [`FeedParser`](crate::FeedParser)
///
/// # Example
///
/// ```rust
/// use syndic_feed_parser::ParserConfig;
///
/// let config = ParserConfig::from_toml_str("trim_whitespace = true").unwrap();
/// assert!(config.trim_whitespace);
/// assert_eq!(config.max_depth, 256);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Inputs larger than this are rejected as malformed
    pub max_input_bytes: usize,

    /// Maximum element nesting depth
    pub max_depth: usize,

    /// Trim surrounding whitespace from extracted field values
    pub trim_whitespace: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            max_depth: DEFAULT_MAX_DEPTH,
            trim_whitespace: false,
        }
    }
}

impl ParserConfig {
    /// Creates a config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the configuration
    ///
    /// Returns all validation errors found.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.max_input_bytes == 0 {
            errors.push(ValidationError::with_value(
                "max_input_bytes",
                "must be greater than 0",
                self.max_input_bytes,
            ));
        }

        if self.max_depth == 0 {
            errors.push(ValidationError::with_value(
                "max_depth",
                "must be greater than 0",
                self.max_depth,
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Parses and validates a config from TOML text
    ///
    /// Missing keys fall back to their defaults.
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        let config: ParserConfig = toml::from_str(contents)?;
        config.validate().map_err(ConfigError::ValidationError)?;
        Ok(config)
    }

    /// Loads and validates a config file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config = Self::from_toml_str(&contents)?;
        log::debug!("Loaded parser config from {}", path.display());
        Ok(config)
    }
}
