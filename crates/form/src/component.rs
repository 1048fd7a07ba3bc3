//! The form component: schema + state + presentation tables + event outputs.
//!
//! Responsibilities:
//! - Building controls from the schema (through a `ControlFactory`)
//! - Applying user edits and re-validating
//! - Submission (`on_submit`) and cancellation (`on_cancel`)
//! - Error-message resolution
//! - Checkbox multi-select toggling
//!
//! Events are returned to the caller and also delivered to every registered
//! listener. All operations run synchronously in the caller's turn.

use tracing::{debug, error, warn};

use crate::builder::{build_controls, ControlFactory, DefaultControlFactory};
use crate::error::{FormError, Result};
use crate::field::{FieldDescriptor, FieldOption};
use crate::messages::ErrorMessages;
use crate::schema::FormSchema;
use crate::state::{Control, FormState};
use crate::styles::{StyleMap, StyleOverrides};
use crate::value::{FieldValue, FormPayload};

/// Outputs emitted by the component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// All controls valid; carries every property's current value.
    Submitted(FormPayload),
    /// The user cancelled; controls were reset beforehand.
    Cancelled,
}

type Listener = Box<dyn FnMut(&FormEvent)>;

pub struct FormComponent {
    schema: FormSchema,
    state: FormState,
    styles: StyleMap,
    messages: ErrorMessages,
    factory: Box<dyn ControlFactory>,
    listeners: Vec<Listener>,
}

impl FormComponent {
    /// Create a component using the default control factory.
    pub fn new(schema: FormSchema) -> Result<Self> {
        Self::with_factory(schema, Box::new(DefaultControlFactory))
    }

    /// Create a component with an explicit control factory.
    pub fn with_factory(schema: FormSchema, factory: Box<dyn ControlFactory>) -> Result<Self> {
        let state = build_controls(&schema, factory.as_ref())?;
        Ok(Self {
            schema,
            state,
            styles: StyleMap::default(),
            messages: ErrorMessages::default(),
            factory,
            listeners: Vec::new(),
        })
    }

    /// Override class names; unspecified keys keep their defaults.
    pub fn custom_classes(mut self, overrides: &StyleOverrides) -> Self {
        self.styles = StyleMap::with_overrides(overrides);
        self
    }

    /// Replace the message table. Tables from `with_overrides` or from
    /// deserialization already include the defaults.
    pub fn error_messages(mut self, messages: ErrorMessages) -> Self {
        self.messages = messages;
        self
    }

    /// Register a listener for submit / cancel events.
    pub fn subscribe(&mut self, listener: impl FnMut(&FormEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Replace the schema and rebuild every control. Prior state is dropped.
    pub fn set_configurations(&mut self, schema: FormSchema) -> Result<()> {
        let state = build_controls(&schema, self.factory.as_ref())?;
        debug!(fields = schema.field_count(), "form schema replaced");
        self.schema = schema;
        self.state = state;
        Ok(())
    }

    // --- Accessors -----------------------------------------------------------------------------

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn styles(&self) -> &StyleMap {
        &self.styles
    }

    pub fn messages(&self) -> &ErrorMessages {
        &self.messages
    }

    pub fn control(&self, property: &str) -> Option<&Control> {
        self.state.get(property)
    }

    pub fn is_valid(&self) -> bool {
        self.state.is_valid()
    }

    /// Current values of all controls.
    pub fn value(&self) -> FormPayload {
        self.state.values()
    }

    // --- Edits ---------------------------------------------------------------------------------

    /// Apply a user edit. The value's shape must match the field kind.
    pub fn set_value(&mut self, property: &str, value: impl Into<FieldValue>) -> Result<()> {
        let value = value.into();
        let (field, control) = self.field_and_control(property)?;
        if value.is_list() != field.kind.is_multi_select() {
            error!(property, kind = %field.kind, "value shape does not match field kind");
            return Err(FormError::ValueShapeMismatch {
                property: property.to_string(),
                kind: field.kind,
            });
        }
        control.value = value;
        control.dirty = true;
        control.revalidate(field);
        Ok(())
    }

    /// Blur: the control has been visited.
    pub fn mark_touched(&mut self, property: &str) -> Result<()> {
        let (_, control) = self.field_and_control(property)?;
        control.touched = true;
        Ok(())
    }

    // --- Submit / cancel / reset ---------------------------------------------------------------

    /// Validate everything; emit the payload when valid, otherwise mark all
    /// controls touched and emit nothing.
    pub fn on_submit(&mut self) -> Option<FormEvent> {
        self.revalidate_all();
        if !self.state.is_valid() {
            self.state.mark_all_touched();
            let invalid: Vec<&str> = self
                .state
                .controls()
                .iter()
                .filter(|c| !c.is_valid())
                .map(|c| c.property.as_str())
                .collect();
            warn!(?invalid, "form submission rejected");
            return None;
        }
        let payload = self.state.values();
        debug!(fields = payload.len(), "form submitted");
        Some(self.emit(FormEvent::Submitted(payload)))
    }

    /// Reset every control and emit a cancellation signal.
    pub fn on_cancel(&mut self) -> FormEvent {
        self.reset();
        debug!("form cancelled");
        self.emit(FormEvent::Cancelled)
    }

    /// Restore every control to its initial state without emitting.
    pub fn reset(&mut self) {
        let fields = self.schema.fields();
        for (field, control) in fields.iter().zip(self.state.controls_mut()) {
            control.reset();
            control.revalidate(field);
        }
    }

    // --- Errors --------------------------------------------------------------------------------

    /// Message for the first failing rule of `property`, or `""` when valid.
    pub fn get_error_message(&self, property: &str) -> String {
        self.state
            .get(property)
            .and_then(Control::first_error)
            .map(|e| self.messages.resolve(&e.kind).to_string())
            .unwrap_or_default()
    }

    /// Like [`get_error_message`](Self::get_error_message) but only for
    /// touched controls; this is what renderers show.
    pub fn visible_error(&self, property: &str) -> Option<String> {
        let control = self.state.get(property)?;
        if !control.touched {
            return None;
        }
        control
            .first_error()
            .map(|e| self.messages.resolve(&e.kind).to_string())
    }

    // --- Checkbox multi-select -----------------------------------------------------------------

    /// Whether `option` is currently selected. `false` for non-list controls.
    pub fn has_option(&self, property: &str, option: &str) -> bool {
        self.state
            .get(property)
            .and_then(|c| c.value.as_list())
            .is_some_and(|items| items.iter().any(|i| i == option))
    }

    /// Toggle `option.key` in a checkbox control: remove when present,
    /// append otherwise.
    pub fn update_checkbox_selection(&mut self, property: &str, option: &FieldOption) -> Result<()> {
        let (field, control) = self.field_and_control(property)?;
        let FieldValue::List(items) = &mut control.value else {
            error!(property, "checkbox toggle on a non-collection control");
            return Err(FormError::NotACollection {
                property: property.to_string(),
            });
        };
        match items.iter().position(|i| *i == option.key) {
            Some(idx) => {
                items.remove(idx);
            }
            None => items.push(option.key.clone()),
        }
        control.dirty = true;
        control.revalidate(field);
        Ok(())
    }

    // --- Internals -----------------------------------------------------------------------------

    fn field_and_control(&mut self, property: &str) -> Result<(&FieldDescriptor, &mut Control)> {
        let field = self.schema.field_by_key(property);
        let control = self.state.get_mut(property);
        match (field, control) {
            (Some(field), Some(control)) => Ok((field, control)),
            _ => {
                error!(property, "unknown form property");
                Err(FormError::UnknownProperty(property.to_string()))
            }
        }
    }

    fn revalidate_all(&mut self) {
        let fields = self.schema.fields();
        for (field, control) in fields.iter().zip(self.state.controls_mut()) {
            control.revalidate(field);
        }
    }

    fn emit(&mut self, event: FormEvent) -> FormEvent {
        for listener in &mut self.listeners {
            listener(&event);
        }
        event
    }
}

impl std::fmt::Debug for FormComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormComponent")
            .field("schema", &self.schema)
            .field("state", &self.state)
            .field("styles", &self.styles)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
