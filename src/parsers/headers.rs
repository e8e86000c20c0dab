//! Header line parsing and folding.
//!
//! Header names and values are kept exactly as they appear on the wire: no
//! case normalization, no trimming. A name seen once maps to a single value;
//! a name seen again is folded into an ordered list of every value.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::trace;

/// Separator between a header name and its value.
const HEADER_SEP: &str = ": ";

/// Value slot for a header name.
///
/// Serializes as a plain string for `Single` and as an array for `Multiple`,
/// so a parsed table renders as `{"Accept": ["a", "b"], "Host": "x"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum HeaderValue {
    Single(String),
    Multiple(Vec<String>),
}

impl HeaderValue {
    /// Append another value, turning a `Single` slot into `Multiple`.
    fn push(&mut self, value: String) {
        match self {
            HeaderValue::Single(first) => {
                let first = std::mem::take(first);
                *self = HeaderValue::Multiple(vec![first, value]);
            }
            HeaderValue::Multiple(values) => values.push(value),
        }
    }

    /// All values in order of appearance.
    pub fn values(&self) -> &[String] {
        match self {
            HeaderValue::Single(value) => std::slice::from_ref(value),
            HeaderValue::Multiple(values) => values,
        }
    }

    /// The value when the header appeared exactly once.
    pub fn as_single(&self) -> Option<&str> {
        match self {
            HeaderValue::Single(value) => Some(value),
            HeaderValue::Multiple(_) => None,
        }
    }

    pub fn is_multiple(&self) -> bool {
        matches!(self, HeaderValue::Multiple(_))
    }
}

/// Case-sensitive header table with folding of repeated names.
///
/// Names keep the order in which they first appeared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HeaderTable {
    entries: IndexMap<String, HeaderValue>,
}

impl HeaderTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from head lines.
    ///
    /// Each line is split on the first `": "`. Lines without it are skipped.
    pub fn parse<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::new();

        for line in lines {
            let line = line.as_ref();
            match line.split_once(HEADER_SEP) {
                Some((name, value)) => table.insert(name, value),
                None => trace!(line, "Skipping line without header separator"),
            }
        }

        table
    }

    /// Insert a value, folding it into a list when `name` is already present.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();

        match self.entries.get_mut(&name) {
            Some(slot) => slot.push(value),
            None => {
                self.entries.insert(name, HeaderValue::Single(value));
            }
        }
    }

    /// Get the value slot for an exact header name.
    pub fn get(&self, name: &str) -> Option<&HeaderValue> {
        self.entries.get(name)
    }

    /// Every value recorded for `name`, empty when absent.
    pub fn get_all(&self, name: &str) -> &[String] {
        self.entries.get(name).map(HeaderValue::values).unwrap_or(&[])
    }

    /// First value recorded for `name`.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.get_all(name).first().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of distinct header names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HeaderValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }
}

/// Parse head lines into a [`HeaderTable`].
pub fn parse_headers<I, S>(lines: I) -> HeaderTable
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    HeaderTable::parse(lines)
}
