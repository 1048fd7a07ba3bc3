//! Runtime values held by form controls.
//!
//! Every control stores either a single string (text-like and single-choice
//! fields) or an ordered list of option keys (checkbox fields). The shape is
//! fixed by the field kind when the control is built and never changes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Value of a single control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    /// Empty text value (`""`).
    pub fn empty_text() -> Self {
        FieldValue::Text(String::new())
    }

    /// Empty list value (`[]`).
    pub fn empty_list() -> Self {
        FieldValue::List(Vec::new())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s.as_str()),
            FieldValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(items) => Some(items.as_slice()),
            FieldValue::Text(_) => None,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, FieldValue::List(_))
    }

    /// True for `""` and `[]`. Whitespace is not considered empty.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::List(items) => items.is_empty(),
        }
    }

    /// Length in chars for text, in items for lists.
    pub fn len(&self) -> usize {
        match self {
            FieldValue::Text(s) => s.chars().count(),
            FieldValue::List(items) => items.len(),
        }
    }

    /// Display form used by renderers (lists are comma-joined).
    pub fn display(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::List(items) => items.join(", "),
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::empty_text()
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(value: Vec<&str>) -> Self {
        FieldValue::List(value.into_iter().map(str::to_string).collect())
    }
}

/// Submission payload: property key → final value.
pub type FormPayload = BTreeMap<String, FieldValue>;

/// Convert a payload into a JSON object (`{"phone": "1234567890", ...}`).
pub fn payload_to_json(payload: &FormPayload) -> serde_json::Value {
    let map = payload
        .iter()
        .map(|(k, v)| {
            let json = match v {
                FieldValue::Text(s) => serde_json::Value::String(s.clone()),
                FieldValue::List(items) => serde_json::Value::Array(
                    items
                        .iter()
                        .cloned()
                        .map(serde_json::Value::String)
                        .collect(),
                ),
            };
            (k.clone(), json)
        })
        .collect::<serde_json::Map<_, _>>();
    serde_json::Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn whitespace_is_not_empty() {
        assert!(FieldValue::from("").is_empty());
        assert!(!FieldValue::from(" ").is_empty());
        assert!(FieldValue::empty_list().is_empty());
    }

    #[test]
    fn length_counts_chars_and_items() {
        assert_eq!(FieldValue::from("äöü").len(), 3);
        assert_eq!(FieldValue::from(vec!["a", "b"]).len(), 2);
    }

    #[test]
    fn payload_serializes_as_plain_object() {
        let mut payload = FormPayload::new();
        payload.insert("phone".into(), FieldValue::from("1234567890"));
        payload.insert("tags".into(), FieldValue::from(vec!["a", "b"]));

        let json = payload_to_json(&payload);
        assert_eq!(
            json,
            serde_json::json!({ "phone": "1234567890", "tags": ["a", "b"] })
        );
        // serde's untagged representation agrees with the manual conversion
        assert_eq!(serde_json::to_value(&payload).unwrap(), json);
    }
}
