//! Decoding of list-valued text columns.
//!
//! Instructor names, tags, resource links and prep links are stored as text.
//! Different writers have used different encodings over time: a JSON array, a
//! comma-separated list, or nothing at all. [`decode`] accepts every one of
//! them and never fails; [`encode`] always writes the JSON-array form.
//!
//! ```
//! use peerbridge::domain::json_text::{RawJsonText, decode, encode};
//!
//! let names = vec!["A Prof".to_owned(), "B Prof".to_owned()];
//! assert_eq!(decode(RawJsonText::from(encode(&names))), names);
//! assert_eq!(decode(RawJsonText::from("a, b, c")), ["a", "b", "c"]);
//! assert!(decode(RawJsonText::Absent).is_empty());
//! ```

use serde_json::Value;

/// Undecoded list value as it arrived from a client or a column.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RawJsonText {
    /// Already a sequence of strings.
    Sequence(Vec<String>),
    /// Text that may hold a JSON array or a comma-separated list.
    Text(String),
    /// Null, missing or never written.
    #[default]
    Absent,
}

impl RawJsonText {
    /// Wrap a nullable text column.
    pub fn from_column(column: Option<&str>) -> Self {
        column.map_or(Self::Absent, |text| Self::Text(text.to_owned()))
    }

    /// Classify an arbitrary JSON value supplied by a client.
    ///
    /// Arrays become sequences (see [`decode`] for element handling), strings
    /// are kept as text and `null` is absent. Other scalars are treated as
    /// text so `5` still decodes to `["5"]`.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => Self::Absent,
            Value::String(text) => Self::Text(text),
            Value::Array(items) => Self::Sequence(items.into_iter().filter_map(element_text).collect()),
            Value::Bool(_) | Value::Number(_) | Value::Object(_) => Self::Text(value.to_string()),
        }
    }

    /// Whether decoding would yield no elements.
    pub fn is_blank(&self) -> bool {
        decode(self.clone()).is_empty()
    }
}

impl From<&str> for RawJsonText {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for RawJsonText {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Vec<String>> for RawJsonText {
    fn from(items: Vec<String>) -> Self {
        Self::Sequence(items)
    }
}

impl From<Option<String>> for RawJsonText {
    fn from(column: Option<String>) -> Self {
        column.map_or(Self::Absent, Self::Text)
    }
}

/// Decode any stored or submitted encoding into an ordered list.
///
/// First match wins:
/// 1. a sequence is returned unchanged;
/// 2. non-blank text holding a JSON array yields its scalar elements;
/// 3. other non-blank text is split on commas, trimmed, empties dropped;
/// 4. absent or blank input yields an empty list.
pub fn decode(raw: RawJsonText) -> Vec<String> {
    match raw {
        RawJsonText::Sequence(items) => items,
        RawJsonText::Text(text) if text.trim().is_empty() => Vec::new(),
        RawJsonText::Text(text) => match serde_json::from_str::<Value>(&text) {
            Ok(Value::Array(items)) => items.into_iter().filter_map(element_text).collect(),
            _ => split_commas(&text),
        },
        RawJsonText::Absent => Vec::new(),
    }
}

/// Decode a nullable text column.
pub fn decode_column(column: Option<&str>) -> Vec<String> {
    decode(RawJsonText::from_column(column))
}

/// Canonical storage encoding: a JSON array of strings.
pub fn encode(items: &[String]) -> String {
    Value::Array(items.iter().cloned().map(Value::String).collect()).to_string()
}

fn element_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn split_commas(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_owned)
        .collect()
}
