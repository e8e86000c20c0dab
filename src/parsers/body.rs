//! Request body decoding keyed on the exact `Content-Type` value.
//!
//! Only three content types are recognized, compared byte for byte with no
//! parameter stripping: `application/json; charset=utf-8` is not JSON here.

use crate::config::FormPairs;
use crate::error::Result;
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::{debug, warn};

pub const APPLICATION_JSON: &str = "application/json";
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
pub const MULTIPART_FORM_DATA: &str = "multipart/form-data";

/// Decoding strategy selected by content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Json,
    FormUrlEncoded,
    /// Recognized but not decoded; always yields [`Params::Empty`].
    Multipart,
}

impl BodyKind {
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        match content_type {
            APPLICATION_JSON => Some(BodyKind::Json),
            FORM_URLENCODED => Some(BodyKind::FormUrlEncoded),
            MULTIPART_FORM_DATA => Some(BodyKind::Multipart),
            _ => None,
        }
    }
}

/// Decoded request body.
///
/// JSON bodies keep whatever structure they describe; form bodies are a flat
/// string map in the order keys first appeared. Serializes as the
/// underlying value, with `Empty` as `{}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Params {
    #[default]
    Empty,
    Json(serde_json::Value),
    Form(IndexMap<String, String>),
}

impl Params {
    pub fn is_empty(&self) -> bool {
        match self {
            Params::Empty => true,
            Params::Form(pairs) => pairs.is_empty(),
            Params::Json(serde_json::Value::Object(map)) => map.is_empty(),
            Params::Json(serde_json::Value::Array(items)) => items.is_empty(),
            Params::Json(_) => false,
        }
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Params::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_form(&self) -> Option<&IndexMap<String, String>> {
        match self {
            Params::Form(pairs) => Some(pairs),
            _ => None,
        }
    }
}

impl Serialize for Params {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Params::Empty => serializer.serialize_map(Some(0))?.end(),
            Params::Json(value) => value.serialize(serializer),
            Params::Form(pairs) => pairs.serialize(serializer),
        }
    }
}

/// Body decoder configured with the form pair mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct BodyDecoder {
    form_pairs: FormPairs,
}

impl BodyDecoder {
    pub fn new(form_pairs: FormPairs) -> Self {
        Self { form_pairs }
    }

    /// Decode `body` according to `content_type`.
    ///
    /// Only a JSON body that fails to decode is an error. An absent body
    /// under `application/json` is decoded as empty input and fails too.
    pub fn decode(&self, body: Option<&[u8]>, content_type: Option<&str>) -> Result<Params> {
        let Some(kind) = content_type.and_then(BodyKind::from_content_type) else {
            debug!(content_type, "No body decoder for content type");
            return Ok(Params::Empty);
        };

        let body = body.unwrap_or_default();
        debug!(?kind, body_len = body.len(), "Decoding request body");

        match kind {
            BodyKind::Json => match serde_json::from_slice(body) {
                Ok(value) => Ok(Params::Json(value)),
                Err(e) => {
                    warn!(error = %e, "Invalid JSON request body");
                    Err(e.into())
                }
            },
            BodyKind::FormUrlEncoded => {
                Ok(Params::Form(decode_form(&String::from_utf8_lossy(body), self.form_pairs)))
            }
            // multipart/form-data decoding is not implemented
            BodyKind::Multipart => Ok(Params::Empty),
        }
    }
}

/// Decode an `application/x-www-form-urlencoded` body.
///
/// Each pair is split on its first `=`; keys and values are kept verbatim
/// (no percent-decoding). A repeated key keeps its last value.
pub fn decode_form(body: &str, mode: FormPairs) -> IndexMap<String, String> {
    let mut pairs = IndexMap::new();

    if mode == FormPairs::SinglePair && body.contains('&') {
        debug!("Multi-pair form body yields no pairs in single_pair mode");
        return pairs;
    }

    for segment in body.split('&') {
        if let Some((key, value)) = segment.split_once('=') {
            pairs.insert(key.to_string(), value.to_string());
        }
    }

    pairs
}

/// Decode a body with the default decoder.
pub fn decode(body: Option<&[u8]>, content_type: Option<&str>) -> Result<Params> {
    BodyDecoder::default().decode(body, content_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;
    use serde_json::json;

    fn form(pairs: &[(&str, &str)]) -> Params {
        Params::Form(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_json_body() {
        let params = decode(Some(br#"{"a":1}"#), Some(APPLICATION_JSON)).unwrap();
        assert_eq!(params, Params::Json(json!({ "a": 1 })));
    }

    #[test]
    fn test_json_keeps_non_object_structure() {
        let params = decode(Some(b"[1, \"two\", null]"), Some(APPLICATION_JSON)).unwrap();
        assert_eq!(params.as_json(), Some(&json!([1, "two", null])));
    }

    #[test]
    fn test_invalid_json_is_error() {
        let result = decode(Some(b"not json"), Some(APPLICATION_JSON));
        assert!(matches!(result, Err(ParseError::Json(_))));
    }

    #[test]
    fn test_absent_json_body_is_error() {
        let result = decode(None, Some(APPLICATION_JSON));
        assert!(matches!(result, Err(ParseError::Json(_))));
    }

    #[test]
    fn test_content_type_with_parameters_is_not_matched() {
        let params = decode(Some(b"not json"), Some("application/json; charset=utf-8")).unwrap();
        assert_eq!(params, Params::Empty);
    }

    #[test]
    fn test_form_single_pair() {
        let params = decode(Some(b"a=1"), Some(FORM_URLENCODED)).unwrap();
        assert_eq!(params, form(&[("a", "1")]));
    }

    #[test]
    fn test_form_splits_on_first_equals() {
        let params = decode(Some(b"token=abc=="), Some(FORM_URLENCODED)).unwrap();
        assert_eq!(params, form(&[("token", "abc==")]));
    }

    #[test]
    fn test_form_without_equals_is_empty() {
        let params = decode(Some(b"flag"), Some(FORM_URLENCODED)).unwrap();
        assert!(params.is_empty());
    }

    #[test]
    fn test_form_values_are_not_percent_decoded() {
        let params = decode(Some(b"q=a%20b+c"), Some(FORM_URLENCODED)).unwrap();
        assert_eq!(params.as_form().unwrap()["q"], "a%20b+c");
    }

    #[test]
    fn test_single_pair_mode_drops_multi_pair_body() {
        let pairs = decode_form("a=1&b=2", FormPairs::SinglePair);
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_each_pair_mode() {
        let decoder = BodyDecoder::new(FormPairs::EachPair);
        let params = decoder
            .decode(Some(b"a=1&skip&b=2&a=3"), Some(FORM_URLENCODED))
            .unwrap();

        assert_eq!(params, form(&[("a", "3"), ("b", "2")]));
    }

    #[test]
    fn test_form_keys_keep_body_order() {
        let pairs = decode_form("z=1&m=2&a=3", FormPairs::EachPair);
        let keys: Vec<&str> = pairs.keys().map(String::as_str).collect();
        assert_eq!(keys, ["z", "m", "a"]);

        let json = serde_json::to_string(&Params::Form(pairs)).unwrap();
        assert_eq!(json, r#"{"z":"1","m":"2","a":"3"}"#);
    }

    #[test]
    fn test_multipart_is_always_empty() {
        let body = b"--boundary\r\nContent-Disposition: form-data; name=\"a\"\r\n\r\n1\r\n--boundary--";
        let params = decode(Some(body), Some(MULTIPART_FORM_DATA)).unwrap();
        assert_eq!(params, Params::Empty);

        let params = decode(Some(b"not json"), Some(MULTIPART_FORM_DATA)).unwrap();
        assert_eq!(params, Params::Empty);
    }

    #[test]
    fn test_unknown_or_absent_content_type_is_empty() {
        assert_eq!(decode(Some(b"a=1"), Some("text/plain")).unwrap(), Params::Empty);
        assert_eq!(decode(Some(b"{}"), None).unwrap(), Params::Empty);
    }

    #[test]
    fn test_empty_params_serialize_as_empty_object() {
        assert_eq!(serde_json::to_value(Params::Empty).unwrap(), json!({}));
        assert_eq!(
            serde_json::to_value(form(&[("a", "1")])).unwrap(),
            json!({ "a": "1" })
        );
    }
}
