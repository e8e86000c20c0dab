//! Configuration module for rawhttp.
//!
//! This module handles loading the optional TOML configuration that selects
//! how the request parser treats the two reference quirks: the request line
//! being offered to header parsing, and multi-pair form bodies.

mod config;

pub use config::{FormPairs, FormSettings, ParserConfig, RequestSettings};
