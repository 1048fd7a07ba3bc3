//! Configuration-driven forms.
//!
//! A [`FormSchema`] (an ordered list of [`FieldDescriptor`]s) is turned into a
//! [`FormComponent`] holding one control per field. The component applies
//! edits, validates, resolves error messages, toggles checkbox selections and
//! emits either a [`FormEvent::Submitted`] payload or [`FormEvent::Cancelled`].
//!
//! ```
//! use form::{FieldDescriptor, FieldKind, FormComponent, FormEvent, FormSchema, ValidationRule};
//! use regex::Regex;
//!
//! let schema = FormSchema::new(vec![
//!     FieldDescriptor::new("phone", "Phone", FieldKind::Number)
//!         .validator(ValidationRule::Required)
//!         .validator(ValidationRule::Pattern(Regex::new(r"^\d{10}$").unwrap())),
//! ])
//! .unwrap();
//! let mut form = FormComponent::new(schema).unwrap();
//!
//! form.set_value("phone", "123").unwrap();
//! assert!(form.on_submit().is_none());
//! assert_eq!(form.get_error_message("phone"), "is not valid");
//!
//! form.set_value("phone", "1234567890").unwrap();
//! assert!(matches!(form.on_submit(), Some(FormEvent::Submitted(_))));
//! ```

pub mod builder;
pub mod component;
pub mod error;
pub mod field;
pub mod messages;
pub mod render;
pub mod schema;
pub mod state;
pub mod styles;
pub mod validation;
pub mod value;

pub use builder::{build_controls, ControlFactory, DefaultControlFactory};
pub use component::{FormComponent, FormEvent};
pub use error::{FormError, Result};
pub use field::{FieldConfig, FieldDescriptor, FieldKind, FieldOption};
pub use messages::{ErrorMessages, FALLBACK_MESSAGE};
pub use render::render_html;
pub use schema::{FormSchema, SchemaConfig};
pub use state::{Control, FormState};
pub use styles::{StyleMap, StyleOverrides};
pub use validation::{RuleConfig, ValidationError, ValidationRule};
pub use value::{payload_to_json, FieldValue, FormPayload};
