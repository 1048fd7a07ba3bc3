//! Error-kind → user-facing message table.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::validation::{EMAIL, MAX_LENGTH, MIN_LENGTH, PATTERN, REQUIRED};

/// Message used when a failing rule has no configured text.
pub const FALLBACK_MESSAGE: &str = "is invalid";

/// Deserializes from a plain `kind → message` map layered onto the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "HashMap<String, String>", into = "HashMap<String, String>")]
pub struct ErrorMessages {
    messages: HashMap<String, String>,
}

impl Default for ErrorMessages {
    fn default() -> Self {
        let messages = [
            (REQUIRED, "is required"),
            (MIN_LENGTH, "must be longer"),
            (MAX_LENGTH, "must be shorter"),
            (EMAIL, "must be a valid email"),
            (PATTERN, "is not valid"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        Self { messages }
    }
}

impl From<HashMap<String, String>> for ErrorMessages {
    fn from(overrides: HashMap<String, String>) -> Self {
        Self::with_overrides(overrides)
    }
}

impl From<ErrorMessages> for HashMap<String, String> {
    fn from(table: ErrorMessages) -> Self {
        table.messages
    }
}

impl ErrorMessages {
    /// An empty table (every lookup falls back).
    pub fn empty() -> Self {
        Self {
            messages: HashMap::new(),
        }
    }

    /// Default table with the given entries layered on top.
    pub fn with_overrides<K, V>(overrides: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut table = Self::default();
        for (k, v) in overrides {
            table.set(k, v);
        }
        table
    }

    pub fn set(&mut self, kind: impl Into<String>, message: impl Into<String>) {
        self.messages.insert(kind.into(), message.into());
    }

    pub fn get(&self, kind: &str) -> Option<&str> {
        self.messages.get(kind).map(String::as_str)
    }

    /// Configured message for `kind`, or [`FALLBACK_MESSAGE`].
    pub fn resolve(&self, kind: &str) -> &str {
        self.get(kind).unwrap_or(FALLBACK_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_builtin_rules() {
        let table = ErrorMessages::default();
        assert_eq!(table.resolve("required"), "is required");
        assert_eq!(table.resolve("pattern"), "is not valid");
        assert_eq!(table.resolve("invalidPhoneNumber"), FALLBACK_MESSAGE);
    }

    #[test]
    fn overrides_layer_on_defaults() {
        let table = ErrorMessages::with_overrides([("pattern", "must be 10 digits")]);
        assert_eq!(table.resolve("pattern"), "must be 10 digits");
        assert_eq!(table.resolve("email"), "must be a valid email");
    }

    #[test]
    fn deserialized_table_keeps_defaults() {
        let table: ErrorMessages = serde_json::from_str(r#"{"pattern":"bad format"}"#).unwrap();
        assert_eq!(table.resolve("pattern"), "bad format");
        assert_eq!(table.resolve("required"), "is required");
    }
}
