//! HTTP request parsing.
//!
//! This module provides the `RequestParser` which turns a complete raw request
//! buffer into a `ParsedRequest`. Parsing is permissive: a first line that is
//! not a request line leaves method, URL and version absent, and lines that
//! are not headers are skipped.

use crate::config::{ParserConfig, RequestSettings};
use crate::error::Result;
use crate::parsers::body::{BodyDecoder, Params};
use crate::parsers::headers::{HeaderTable, HeaderValue};
use serde::Serialize;
use tracing::{debug, trace};

/// Line separator, also doubled to mark the end of the head.
pub const LINE_SEP: &str = "\r\n";
const HEAD_END: &[u8] = b"\r\n\r\n";

/// Marker that makes line 0 a request line.
const REQUEST_LINE_MARKER: &str = "HTTP/1";

/// Represents a parsed HTTP request.
///
/// `method`, `url` and `http_version` come from the request line and are only
/// present when line 0 contained `HTTP/1`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedRequest {
    pub headers: HeaderTable,
    pub params: Params,
    pub url: Option<String>,
    pub method: Option<String>,
    pub http_version: Option<String>,
}

impl ParsedRequest {
    /// Get the first value of a header (exact, case-sensitive name)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.first(name)
    }

    /// The `Content-Type` used for body dispatch, if it appeared exactly once
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get("Content-Type").and_then(HeaderValue::as_single)
    }
}

/// Parser for complete, in-memory request buffers.
#[derive(Debug, Clone, Default)]
pub struct RequestParser {
    settings: RequestSettings,
    decoder: BodyDecoder,
}

impl RequestParser {
    pub fn new(config: &ParserConfig) -> Self {
        Self {
            settings: config.request.clone(),
            decoder: BodyDecoder::new(config.form.pairs),
        }
    }

    /// Parse a raw request buffer.
    ///
    /// The head ends at the first `\r\n\r\n`; everything after it is the body.
    /// Without that separator the whole buffer is head and there is no body.
    #[tracing::instrument(skip(self, raw), fields(raw_len = raw.len()), level = "debug")]
    pub fn parse(&self, raw: &[u8]) -> Result<ParsedRequest> {
        let (head, body) = split_head(raw);
        let head = String::from_utf8_lossy(head);
        let lines: Vec<&str> = head.split(LINE_SEP).collect();
        debug!(
            head_lines = lines.len(),
            has_body = body.is_some(),
            "Starting HTTP request parse"
        );

        let first = lines.first().copied().unwrap_or_default();
        let request_line = parse_request_line(first);

        let header_lines = if request_line.is_some() && !self.settings.request_line_as_header {
            &lines[1..]
        } else {
            &lines[..]
        };
        let headers = HeaderTable::parse(header_lines);

        let content_type = headers.get("Content-Type").and_then(HeaderValue::as_single);
        let params = self.decoder.decode(body, content_type)?;

        let (method, url, http_version) = request_line.unwrap_or_default();
        debug!(
            method = method.as_deref(),
            url = url.as_deref(),
            http_version = http_version.as_deref(),
            headers = headers.len(),
            "Parsed request"
        );

        Ok(ParsedRequest {
            headers,
            params,
            url,
            method,
            http_version,
        })
    }
}

/// Parse a raw request buffer with the default configuration.
pub fn parse_request(raw: &[u8]) -> Result<ParsedRequest> {
    RequestParser::default().parse(raw)
}

/// Split a buffer into head and optional body at the first blank line.
fn split_head(raw: &[u8]) -> (&[u8], Option<&[u8]>) {
    match raw.windows(HEAD_END.len()).position(|w| w == HEAD_END) {
        Some(pos) => (&raw[..pos], Some(&raw[pos + HEAD_END.len()..])),
        None => (raw, None),
    }
}

type RequestLine = (Option<String>, Option<String>, Option<String>);

/// Read `method`, `url` and `http_version` from line 0.
///
/// Returns `None` when the line lacks `HTTP/1`. Fields missing from a short
/// line stay `None`.
fn parse_request_line(line: &str) -> Option<RequestLine> {
    if !line.contains(REQUEST_LINE_MARKER) {
        trace!(line, "First line is not a request line");
        return None;
    }

    let mut fields = split_fields(line, 3).into_iter().map(str::to_string);
    Some((fields.next(), fields.next(), fields.next()))
}

/// ASCII whitespace separating request line fields, vertical tab included.
fn is_field_space(c: char) -> bool {
    c.is_ascii_whitespace() || c == '\x0b'
}

/// Split on ASCII whitespace into at most `max` fields.
///
/// Runs of whitespace count as one separator and leading whitespace is
/// skipped. The last field holds the rest of the line verbatim, and a
/// separator at the end of the line leaves an empty trailing field.
fn split_fields(line: &str, max: usize) -> Vec<&str> {
    let mut fields = Vec::with_capacity(max);
    let mut rest = line.trim_start_matches(is_field_space);
    if rest.is_empty() {
        return fields;
    }

    loop {
        if fields.len() + 1 == max {
            fields.push(rest);
            break;
        }
        match rest.split_once(is_field_space) {
            Some((field, tail)) => {
                fields.push(field);
                rest = tail.trim_start_matches(is_field_space);
            }
            None => {
                fields.push(rest);
                break;
            }
        }
    }

    fields
}
