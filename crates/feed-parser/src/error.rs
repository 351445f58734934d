// crates/feed-parser/src/error.rs
//! Error types for feed parsing and parser configuration

use std::path::PathBuf;
use thiserror::Error;

/// Result type for feed parser operations
pub type FeedResult<T> = Result<T, FeedError>;

/// Errors that can occur during feed parsing
///
/// Every variant is terminal for the parse call: no partial feed is
/// ever returned alongside one.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The document tree could not be built
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// No recognized root element was found
    #[error("Unsupported feed format: {0}")]
    UnsupportedFormat(String),

    /// The root was recognized but has no channel element
    #[error("Missing channel element")]
    MissingChannel,
}

impl From<quick_xml::Error> for FeedError {
    fn from(err: quick_xml::Error) -> Self {
        FeedError::MalformedInput(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for FeedError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        FeedError::MalformedInput(err.to_string())
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading a parser configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to parse config file
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Config contains invalid values
    #[error("Config validation failed: {}", join_errors(.0))]
    ValidationError(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validation error for a specific config field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Name of the field (e.g., "max_depth")
    pub field: String,

    /// Human-readable error message
    pub message: String,

    /// The invalid value, if available
    pub value: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value: None,
        }
    }

    /// Creates a validation error with the invalid value
    pub fn with_value(
        field: impl Into<String>,
        message: impl Into<String>,
        value: impl ToString,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value: Some(value.to_string()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Field '{}': {}", self.field, self.message)?;
        if let Some(ref value) = self.value {
            write!(f, " (got: {})", value)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}
