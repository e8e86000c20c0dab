//! Parser configuration structures.
//!
//! Every section and field has a default, and the defaults reproduce the
//! reference behaviour byte for byte. An empty TOML document is therefore a
//! valid configuration.

use crate::error::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParserConfig {
    pub request: RequestSettings,
    pub form: FormSettings,
}

/// Request head settings
///
/// # Example TOML
/// ```toml
/// [request]
/// request_line_as_header = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RequestSettings {
    /// Offer head line 0 to header parsing even when it was consumed as the
    /// request line. A request line whose URL contains `": "` then also
    /// produces a header entry.
    pub request_line_as_header: bool,
}

impl Default for RequestSettings {
    fn default() -> Self {
        Self {
            request_line_as_header: true,
        }
    }
}

/// `application/x-www-form-urlencoded` settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormSettings {
    pub pairs: FormPairs,
}

/// How many `key=value` pairs a form body yields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormPairs {
    /// Only a body without `&` is decoded, as its single pair. Bodies that
    /// contain `&` yield no pairs.
    #[default]
    SinglePair,
    /// Every `&`-separated segment holding `=` is decoded.
    EachPair,
}

impl ParserConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse configuration from a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: ParserConfig = toml::from_str(contents)?;
        Ok(config)
    }
}
