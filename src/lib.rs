//! # rawhttp - Minimal HTTP message parser and serializer
//!
//! rawhttp turns a complete raw request buffer into a structured request
//! (method, URL, version, headers, decoded body) and turns a response
//! description (status, headers, body) into raw bytes ready to write to a
//! socket. It does no I/O of its own.
//!
//! ## Features
//! - Request line and header parsing with folding of repeated header names
//! - Body decoding for `application/json` and `application/x-www-form-urlencoded`
//! - `HTTP/1.1` response serialization with headers kept in order
//! - Optional TOML configuration for the two reference parsing quirks
//!
//! `multipart/form-data` bodies are recognized but not decoded.
//!
//! ## Example
//!
//! ```
//! use rawhttp::{HttpResponse, Parser};
//!
//! let parser = Parser::default();
//!
//! let request = parser
//!     .request(b"GET /x HTTP/1.1\r\nAccept: a\r\nAccept: b\r\n\r\n")
//!     .unwrap();
//! assert_eq!(request.method.as_deref(), Some("GET"));
//! assert_eq!(request.headers.get_all("Accept"), ["a", "b"]);
//!
//! let raw = parser.response(
//!     &HttpResponse::new("200 OK")
//!         .header("Content-Type", "text/html")
//!         .body("<h1>Hi</h1>"),
//! );
//! assert_eq!(raw, b"HTTP/1.1 200 OK\r\nContent-Type: text/html\r\n\r\n<h1>Hi</h1>");
//! ```

pub mod config;
pub mod error;
pub mod parsers;

use std::path::Path;
use tracing::debug;

pub use config::{FormPairs, ParserConfig};
pub use error::{ConfigError, ParseError, Result};
pub use parsers::{
    HTTP_VERSION, HeaderTable, HeaderValue, HttpResponse, Params, ParsedRequest, RequestParser,
    ResponseSerializer, parse_headers, parse_request, serialize,
};

/// Request parser and response serializer sharing one configuration.
///
/// Holds no per-call state, so one instance can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: ParserConfig,
    requests: RequestParser,
    responses: ResponseSerializer,
}

impl Parser {
    pub fn new(config: ParserConfig) -> Self {
        debug!(
            request_line_as_header = config.request.request_line_as_header,
            form_pairs = ?config.form.pairs,
            "Creating parser"
        );

        Self {
            requests: RequestParser::new(&config),
            responses: ResponseSerializer::new(),
            config,
        }
    }

    /// Create a parser from a TOML configuration file
    pub fn from_config_file<P: AsRef<Path>>(path: P) -> std::result::Result<Self, ConfigError> {
        Ok(Self::new(ParserConfig::from_file(path)?))
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a complete raw request buffer
    pub fn request(&self, raw: &[u8]) -> Result<ParsedRequest> {
        self.requests.parse(raw)
    }

    /// Serialize a response description into raw bytes
    pub fn response(&self, response: &HttpResponse) -> Vec<u8> {
        let headers = response.headers.iter().map(|(name, value)| (name, value));
        self.responses
            .serialize(&response.status, headers, &response.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Parser>();
        assert_send_sync::<ParsedRequest>();
        assert_send_sync::<HttpResponse>();
    }

    #[test]
    fn test_parser_uses_config() {
        let config = ParserConfig::from_toml_str("[form]\npairs = \"each_pair\"\n").unwrap();
        let parser = Parser::new(config);

        let request = parser
            .request(b"POST / HTTP/1.1\r\nContent-Type: application/x-www-form-urlencoded\r\n\r\na=1&b=2")
            .unwrap();

        assert_eq!(parser.config().form.pairs, FormPairs::EachPair);
        assert_eq!(request.params.as_form().map(|form| form.len()), Some(2));
    }

    #[test]
    fn test_response_matches_to_bytes() {
        let response = HttpResponse::new("200 OK")
            .header("Content-Type", "text/html")
            .body("<h1>Hi</h1>");

        assert_eq!(Parser::default().response(&response), response.to_bytes());
    }
}
