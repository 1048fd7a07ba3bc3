//! Field kinds & descriptors.
//!
//! This module defines the declarative pieces of the form system:
//! - `FieldKind`: enumeration of supported input kinds
//! - `FieldOption`: a `{key, value}` choice for select / radio / checkbox fields
//! - `FieldDescriptor`: metadata + validation rules for a single field
//! - `FieldConfig`: serialisable counterpart of `FieldDescriptor` (schema files)
//!
//! Usage:
//! ```
//! use form::{FieldDescriptor, FieldKind, ValidationRule};
//!
//! let email = FieldDescriptor::new("email", "Email", FieldKind::Email)
//!     .placeholder("email@domain.com")
//!     .validator(ValidationRule::Required)
//!     .validator(ValidationRule::Email);
//! assert_eq!(email.validators.len(), 2);
//! ```

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::Result;
use crate::validation::{RuleConfig, ValidationRule};
use crate::value::FieldValue;

/// Input kind of a field.
///
/// `Checkbox` is the only multi-select kind; its control holds a list of
/// selected option keys. All other kinds hold a single string.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FieldKind {
    Text,
    Email,
    Number,
    Select,
    Radio,
    Checkbox,
    Textarea,
    Date,
}

impl FieldKind {
    pub fn is_multi_select(self) -> bool {
        matches!(self, FieldKind::Checkbox)
    }

    /// Kinds that pick from `options`.
    pub fn is_choice(self) -> bool {
        matches!(self, FieldKind::Select | FieldKind::Radio | FieldKind::Checkbox)
    }

    /// Kinds edited as free text.
    pub fn is_textual(self) -> bool {
        !self.is_choice()
    }

    /// Initial control value: `[]` for checkbox fields, `""` otherwise.
    pub fn initial_value(self) -> FieldValue {
        if self.is_multi_select() {
            FieldValue::empty_list()
        } else {
            FieldValue::empty_text()
        }
    }
}

/// A selectable option. `key` is what gets stored, `value` is what gets shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    pub key: String,
    pub value: String,
}

impl FieldOption {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Declarative description of a form field.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub label: String,
    pub property: String,
    pub kind: FieldKind,
    pub placeholder: Option<String>,
    pub options: Vec<FieldOption>,
    pub validators: Vec<ValidationRule>,
}

impl FieldDescriptor {
    pub fn new(property: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            label: label.into(),
            property: property.into(),
            kind,
            placeholder: None,
            options: Vec::new(),
            validators: Vec::new(),
        }
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.push(FieldOption::new(key, value));
        self
    }

    pub fn options(mut self, options: impl IntoIterator<Item = FieldOption>) -> Self {
        self.options.extend(options);
        self
    }

    pub fn validator(mut self, rule: ValidationRule) -> Self {
        self.validators.push(rule);
        self
    }

    pub fn validators(mut self, rules: impl IntoIterator<Item = ValidationRule>) -> Self {
        self.validators.extend(rules);
        self
    }

    pub fn option_by_key(&self, key: &str) -> Option<&FieldOption> {
        self.options.iter().find(|o| o.key == key)
    }
}

/// Schema-file representation of a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub label: String,
    pub property: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<RuleConfig>,
}

impl FieldConfig {
    /// Compile rules and produce a descriptor.
    pub fn into_descriptor(self) -> Result<FieldDescriptor> {
        let validators = self
            .validators
            .iter()
            .map(|rule| rule.compile(&self.property))
            .collect::<Result<Vec<_>>>()?;
        Ok(FieldDescriptor {
            label: self.label,
            property: self.property,
            kind: self.kind,
            placeholder: self.placeholder,
            options: self.options,
            validators,
        })
    }
}
