//! Form schema definition.
//!
//! `FormSchema` is the ordered, validated list of `FieldDescriptor`s a form is
//! built from. Construction rejects duplicate property keys so every control
//! maps back to exactly one descriptor.
//!
//! ```
//! use form::{FieldDescriptor, FieldKind, FormSchema, ValidationRule};
//!
//! let schema = FormSchema::new(vec![
//!     FieldDescriptor::new("name", "Name", FieldKind::Text).placeholder("name"),
//!     FieldDescriptor::new("email", "Email", FieldKind::Email)
//!         .validator(ValidationRule::Required)
//!         .validator(ValidationRule::Email),
//! ])
//! .unwrap();
//! assert_eq!(schema.field_count(), 2);
//! ```
use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::error::{FormError, Result};
use crate::field::{FieldConfig, FieldDescriptor};

/// Ordered collection of field descriptors with unique property keys.
#[derive(Debug, Clone, Default)]
pub struct FormSchema {
    fields: Vec<FieldDescriptor>,
}

impl FormSchema {
    /// Create a schema, failing on the first duplicated property key.
    pub fn new(fields: Vec<FieldDescriptor>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(fields.len());
        for field in &fields {
            if !seen.insert(field.property.as_str()) {
                error!(property = %field.property, "duplicate property in form schema");
                return Err(FormError::DuplicateProperty(field.property.clone()));
            }
        }
        Ok(Self { fields })
    }

    /// Build a schema from its serialisable representation.
    pub fn from_config(config: SchemaConfig) -> Result<Self> {
        let fields = config
            .fields
            .into_iter()
            .map(FieldConfig::into_descriptor)
            .collect::<Result<Vec<_>>>()?;
        Self::new(fields)
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Find a field by its property key.
    pub fn field_by_key(&self, property: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.property == property)
    }

    /// Property keys in schema order.
    pub fn properties(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.property.as_str())
    }
}

/// Schema file layout: a top-level `fields` array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaConfig {
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldKind;

    #[test]
    fn duplicate_properties_are_rejected() {
        let err = FormSchema::new(vec![
            FieldDescriptor::new("name", "Name", FieldKind::Text),
            FieldDescriptor::new("name", "Other", FieldKind::Email),
        ])
        .unwrap_err();
        assert!(matches!(err, FormError::DuplicateProperty(p) if p == "name"));
    }

    #[test]
    fn lookup_and_order() {
        let schema = FormSchema::new(vec![
            FieldDescriptor::new("b", "B", FieldKind::Text),
            FieldDescriptor::new("a", "A", FieldKind::Checkbox),
        ])
        .unwrap();
        assert_eq!(schema.properties().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(schema.field_by_key("a").map(|f| f.kind), Some(FieldKind::Checkbox));
        assert!(schema.field_by_key("missing").is_none());
    }

    #[test]
    fn empty_config_yields_empty_schema() {
        let schema = FormSchema::from_config(SchemaConfig::default()).unwrap();
        assert!(schema.is_empty());
    }
}
