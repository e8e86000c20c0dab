//! HTTP parsing module for rawhttp.
//!
//! Requests are parsed from a complete in-memory buffer: head and body are
//! split at the first blank line, the head is turned into a request line and
//! a folded header table, and the body is decoded according to its exact
//! `Content-Type`. Responses go the other way, from a status, ordered header
//! pairs and a body into raw `HTTP/1.1` bytes.

pub mod body;
pub mod headers;
mod request;
mod response;

pub use body::{BodyDecoder, BodyKind, Params};
pub use headers::{HeaderTable, HeaderValue, parse_headers};
pub use request::{ParsedRequest, RequestParser, parse_request};
pub use response::{HTTP_VERSION, HttpResponse, ResponseSerializer, serialize};
