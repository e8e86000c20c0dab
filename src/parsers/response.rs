//! HTTP response serialization.
//!
//! This module provides the `HttpResponse` description and the
//! `ResponseSerializer` that renders it into raw bytes. Output is always
//! `HTTP/1.1`; the status string is written as given, so callers include the
//! reason phrase themselves (`"200 OK"`).

use serde::{Deserialize, Serialize};
use tracing::trace;

/// Protocol version written on every status line.
pub const HTTP_VERSION: &str = "HTTP/1.1";

/// Describes a response to serialize.
///
/// Headers keep their order and are never folded: two pairs with the same
/// name produce two header lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpResponse {
    pub status: String,
    #[serde(default)]
    pub headers: Vec<(String, String)>,
    #[serde(default)]
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            ..Self::default()
        }
    }

    /// Append a header pair
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Replace the body
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Render into raw response bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        let headers = self.headers.iter().map(|(name, value)| (name, value));
        ResponseSerializer::new().serialize(&self.status, headers, &self.body)
    }
}

/// Renders status, headers and body into wire bytes.
#[derive(Debug, Clone, Copy)]
pub struct ResponseSerializer {
    version: &'static str,
}

impl Default for ResponseSerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseSerializer {
    pub const fn new() -> Self {
        Self {
            version: HTTP_VERSION,
        }
    }

    pub fn version(&self) -> &'static str {
        self.version
    }

    /// Serialize a response.
    ///
    /// Values are written verbatim with no escaping; this never fails.
    pub fn serialize<I, N, V>(&self, status: &str, headers: I, body: &[u8]) -> Vec<u8>
    where
        I: IntoIterator<Item = (N, V)>,
        N: AsRef<str>,
        V: AsRef<str>,
    {
        let mut out = Vec::with_capacity(self.version.len() + status.len() + body.len() + 64);

        out.extend_from_slice(self.version.as_bytes());
        out.push(b' ');
        out.extend_from_slice(status.as_bytes());
        out.extend_from_slice(b"\r\n");

        let mut count = 0usize;
        for (name, value) in headers {
            out.extend_from_slice(name.as_ref().as_bytes());
            out.extend_from_slice(b": ");
            out.extend_from_slice(value.as_ref().as_bytes());
            out.extend_from_slice(b"\r\n");
            count += 1;
        }

        out.extend_from_slice(b"\r\n");
        out.extend_from_slice(body);

        trace!(status, headers = count, body_len = body.len(), "Serialized response");
        out
    }
}

/// Serialize a response with the fixed `HTTP/1.1` version.
pub fn serialize<I, N, V>(status: &str, headers: I, body: &[u8]) -> Vec<u8>
where
    I: IntoIterator<Item = (N, V)>,
    N: AsRef<str>,
    V: AsRef<str>,
{
    ResponseSerializer::new().serialize(status, headers, body)
}
