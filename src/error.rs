//! Error types for rawhttp.
//!
//! Parsing is permissive: malformed request lines, unparsable header lines and
//! unknown content types all degrade to absent or empty values. The only
//! parse failure that reaches the caller is a JSON body that does not decode.

use thiserror::Error;

/// Error returned by [`crate::parse_request`] and [`crate::Parser::request`].
#[derive(Debug, Error)]
pub enum ParseError {
    /// `Content-Type: application/json` with a body that is not valid JSON.
    #[error("JSON body decode error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error returned while loading a [`crate::ParserConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid TOML for this layout.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type alias using ParseError.
pub type Result<T> = std::result::Result<T, ParseError>;
