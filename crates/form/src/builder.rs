//! Schema-to-control construction.
//!
//! The component never reaches for a global builder; a `ControlFactory` is
//! handed to it explicitly. `DefaultControlFactory` covers the stock
//! behaviour (`""` for single-value fields, `[]` for checkbox fields).

use tracing::{debug, error};

use crate::error::{FormError, Result};
use crate::field::FieldDescriptor;
use crate::schema::FormSchema;
use crate::state::{Control, FormState};

/// Produces the control for one field descriptor.
pub trait ControlFactory {
    fn build(&self, field: &FieldDescriptor) -> Result<Control>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultControlFactory;

impl ControlFactory for DefaultControlFactory {
    fn build(&self, field: &FieldDescriptor) -> Result<Control> {
        Ok(Control::new(
            field.property.clone(),
            field.kind,
            field.kind.initial_value(),
        ))
    }
}

/// Build one control per descriptor and evaluate its rules once.
pub fn build_controls(schema: &FormSchema, factory: &dyn ControlFactory) -> Result<FormState> {
    let controls = schema
        .fields()
        .iter()
        .map(|field| {
            let mut control = factory.build(field)?;
            check_control(field, &control)?;
            control.revalidate(field);
            Ok(control)
        })
        .collect::<Result<Vec<_>>>()?;
    debug!(controls = controls.len(), "built form controls");
    Ok(FormState::from_controls(controls))
}

/// A factory's control must carry the field's key and a value of the right shape.
fn check_control(field: &FieldDescriptor, control: &Control) -> Result<()> {
    let message = if control.property != field.property {
        format!("control built for `{}`", control.property)
    } else if control.value.is_list() != field.kind.is_multi_select()
        || control.initial.is_list() != field.kind.is_multi_select()
    {
        format!("value shape does not fit a {} field", field.kind)
    } else {
        return Ok(());
    };
    error!(property = %field.property, %message, "control factory returned an invalid control");
    Err(FormError::Factory {
        property: field.property.clone(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldKind;
    use crate::validation::ValidationRule;
    use crate::value::FieldValue;

    struct FailingFactory;

    impl ControlFactory for FailingFactory {
        fn build(&self, field: &FieldDescriptor) -> Result<Control> {
            Err(FormError::Factory {
                property: field.property.clone(),
                message: "refused".into(),
            })
        }
    }

    /// Returns controls under a prefixed key, or text where a list belongs.
    struct SkewedFactory {
        rename: bool,
    }

    impl ControlFactory for SkewedFactory {
        fn build(&self, field: &FieldDescriptor) -> Result<Control> {
            if self.rename {
                Ok(Control::new(
                    format!("x_{}", field.property),
                    field.kind,
                    field.kind.initial_value(),
                ))
            } else {
                Ok(Control::new(
                    field.property.clone(),
                    field.kind,
                    FieldValue::empty_text(),
                ))
            }
        }
    }

    fn schema() -> FormSchema {
        FormSchema::new(vec![
            FieldDescriptor::new("name", "Name", FieldKind::Text)
                .validator(ValidationRule::Required),
            FieldDescriptor::new("tags", "Tags", FieldKind::Checkbox)
                .option("a", "A")
                .option("b", "B"),
        ])
        .unwrap()
    }

    #[test]
    fn one_control_per_field_with_initial_values() {
        let state = build_controls(&schema(), &DefaultControlFactory).unwrap();
        assert_eq!(state.len(), 2);
        assert_eq!(state.get("name").unwrap().value, FieldValue::empty_text());
        assert_eq!(state.get("tags").unwrap().value, FieldValue::empty_list());
    }

    #[test]
    fn initial_errors_are_computed() {
        let state = build_controls(&schema(), &DefaultControlFactory).unwrap();
        assert!(!state.get("name").unwrap().is_valid());
        assert!(state.get("tags").unwrap().is_valid());
        assert!(!state.get("name").unwrap().touched);
    }

    #[test]
    fn factory_failures_propagate() {
        let err = build_controls(&schema(), &FailingFactory).unwrap_err();
        assert!(matches!(err, FormError::Factory { property, .. } if property == "name"));
    }

    #[test]
    fn factory_controls_must_match_their_field() {
        let err = build_controls(&schema(), &SkewedFactory { rename: true }).unwrap_err();
        assert!(matches!(err, FormError::Factory { property, .. } if property == "name"));

        let err = build_controls(&schema(), &SkewedFactory { rename: false }).unwrap_err();
        assert!(matches!(err, FormError::Factory { property, .. } if property == "tags"));
    }
}
