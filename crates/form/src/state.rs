//! Form runtime (mutable) state.
//!
//! `FormState` holds one `Control` per schema field, in schema order:
//!   * current and initial value
//!   * `touched` / `dirty` flags
//!   * the ordered list of currently failing rules
//!
//! The rules themselves stay on the schema; `FormState` only stores their
//! outcome. Keep this module free of rendering concerns.

use std::collections::HashMap;

use crate::field::{FieldDescriptor, FieldKind};
use crate::validation::{run_rules, ValidationError};
use crate::value::{FieldValue, FormPayload};

/// Runtime state of a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub property: String,
    pub kind: FieldKind,
    pub value: FieldValue,
    pub initial: FieldValue,
    pub touched: bool,
    pub dirty: bool,
    pub errors: Vec<ValidationError>,
}

impl Control {
    pub fn new(property: impl Into<String>, kind: FieldKind, initial: FieldValue) -> Self {
        Self {
            property: property.into(),
            kind,
            value: initial.clone(),
            initial,
            touched: false,
            dirty: false,
            errors: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn first_error(&self) -> Option<&ValidationError> {
        self.errors.first()
    }

    /// Re-run the descriptor's rules against the current value.
    pub fn revalidate(&mut self, field: &FieldDescriptor) {
        self.errors = run_rules(&field.validators, &self.value);
    }

    /// Restore initial value and clear interaction flags.
    pub fn reset(&mut self) {
        self.value = self.initial.clone();
        self.touched = false;
        self.dirty = false;
    }
}

/// Mutable state captured while editing a form.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    controls: Vec<Control>,
    index: HashMap<String, usize>,
}

impl FormState {
    pub(crate) fn from_controls(controls: Vec<Control>) -> Self {
        let index = controls
            .iter()
            .enumerate()
            .map(|(i, c)| (c.property.clone(), i))
            .collect();
        Self { controls, index }
    }

    pub fn get(&self, property: &str) -> Option<&Control> {
        self.index.get(property).map(|&i| &self.controls[i])
    }

    pub fn get_mut(&mut self, property: &str) -> Option<&mut Control> {
        match self.index.get(property) {
            Some(&i) => self.controls.get_mut(i),
            None => None,
        }
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub(crate) fn controls_mut(&mut self) -> &mut [Control] {
        &mut self.controls
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        self.controls.iter().all(Control::is_valid)
    }

    pub fn mark_all_touched(&mut self) {
        for control in &mut self.controls {
            control.touched = true;
        }
    }

    /// Snapshot of all current values.
    pub fn values(&self) -> FormPayload {
        self.controls
            .iter()
            .map(|c| (c.property.clone(), c.value.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_restores_initial_value_and_flags() {
        let mut control = Control::new("tags", FieldKind::Checkbox, FieldValue::empty_list());
        control.value = FieldValue::from(vec!["a"]);
        control.touched = true;
        control.dirty = true;

        control.reset();
        assert_eq!(control.value, FieldValue::empty_list());
        assert!(!control.touched);
        assert!(!control.dirty);
    }

    #[test]
    fn lookup_by_property() {
        let mut state = FormState::from_controls(vec![
            Control::new("a", FieldKind::Text, FieldValue::empty_text()),
            Control::new("b", FieldKind::Text, FieldValue::empty_text()),
        ]);
        state.get_mut("b").unwrap().value = FieldValue::from("x");
        assert_eq!(state.get("b").unwrap().value, FieldValue::from("x"));
        assert!(state.get("c").is_none());
        assert_eq!(state.values().len(), 2);
    }
}
