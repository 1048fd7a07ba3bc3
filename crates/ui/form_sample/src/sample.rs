//! The demo form: a built-in contact schema, or one loaded from a file.

use std::path::Path;

use color_eyre::{eyre::WrapErr, Result};
use form::{
    ErrorMessages, FieldDescriptor, FieldKind, FieldValue, FormComponent, FormSchema,
    SchemaConfig, ValidationRule,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::info;

use crate::config::Config;

lazy_static! {
    static ref PHONE_RE: Regex = Regex::new(r"^\d{10}$").unwrap();
}

/// Ten-digit phone numbers; reported as `invalidPhoneNumber`.
pub fn phone_validator() -> ValidationRule {
    ValidationRule::custom("invalidPhoneNumber", |value: &FieldValue| {
        value.as_text().is_some_and(|s| PHONE_RE.is_match(s))
    })
}

pub fn contact_schema() -> form::Result<FormSchema> {
    FormSchema::new(vec![
        FieldDescriptor::new("name", "Name", FieldKind::Text).placeholder("name"),
        FieldDescriptor::new("email", "Email", FieldKind::Email)
            .placeholder("email@domain.com")
            .validators([ValidationRule::Required, ValidationRule::Email]),
        FieldDescriptor::new("phone", "Phone", FieldKind::Number)
            .placeholder("000000000")
            .validators([ValidationRule::Required, phone_validator()]),
        FieldDescriptor::new("contact", "Preferred contact", FieldKind::Radio)
            .option("email", "Email")
            .option("phone", "Phone"),
        FieldDescriptor::new("topics", "Topics", FieldKind::Checkbox)
            .option("news", "Newsletter")
            .option("events", "Events")
            .option("offers", "Offers"),
    ])
}

/// Load a schema file (json5 / toml, chosen by extension).
pub fn load_schema(path: &Path) -> Result<FormSchema> {
    let raw: SchemaConfig = config::Config::builder()
        .add_source(config::File::from(path))
        .build()
        .and_then(|c| c.try_deserialize())
        .wrap_err_with(|| format!("reading schema {}", path.display()))?;
    let schema = FormSchema::from_config(raw)?;
    info!(path = %path.display(), fields = schema.field_count(), "loaded form schema");
    Ok(schema)
}

/// Build the form component with the host's classes and messages applied.
pub fn build_form(schema_path: Option<&Path>, cfg: &Config) -> Result<FormComponent> {
    let schema = match schema_path {
        Some(path) => load_schema(path)?,
        None => contact_schema()?,
    };
    let messages = ErrorMessages::with_overrides(cfg.error_messages.clone());
    let form = FormComponent::new(schema)?
        .custom_classes(&cfg.custom_classes)
        .error_messages(messages);
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use form::FormEvent;
    use std::fs;

    #[test]
    fn phone_validator_accepts_ten_digits_only() {
        let rule = phone_validator();
        assert!(rule.check(&FieldValue::from("1234567890")).is_none());
        for v in ["", "123", "12345678901", "12345abcde"] {
            let err = rule.check(&FieldValue::from(v));
            assert_eq!(err.map(|e| e.kind).as_deref(), Some("invalidPhoneNumber"), "{v:?}");
        }
    }

    #[test]
    fn contact_form_submits_once_valid() {
        let mut form = build_form(None, &Config::default()).unwrap();
        assert!(form.on_submit().is_none());
        assert_eq!(form.get_error_message("email"), "is required");

        form.set_value("email", "ada@example.com").unwrap();
        form.set_value("phone", "123").unwrap();
        assert!(form.on_submit().is_none());
        assert_eq!(form.get_error_message("phone"), "is invalid");

        form.set_value("phone", "1234567890").unwrap();
        assert!(matches!(form.on_submit(), Some(FormEvent::Submitted(_))));
    }

    #[test]
    fn schema_file_is_loaded() {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let path = std::env::temp_dir().join(format!("form_sample_schema_{nanos}.toml"));
        fs::write(
            &path,
            r#"
[[fields]]
label = "Phone"
property = "phone"
type = "number"
validators = [{ rule = "required" }, { rule = "pattern", pattern = '\d{10}' }]

[[fields]]
label = "Size"
property = "size"
type = "select"
options = [{ key = "s", value = "Small" }, { key = "m", value = "Medium" }]
"#,
        )
        .unwrap();

        let schema = load_schema(&path).unwrap();
        assert_eq!(schema.properties().collect::<Vec<_>>(), vec!["phone", "size"]);
        assert_eq!(schema.field_by_key("size").unwrap().options.len(), 2);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn duplicate_properties_in_file_are_rejected() {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let path = std::env::temp_dir().join(format!("form_sample_dup_{nanos}.json5"));
        fs::write(
            &path,
            r#"{ fields: [
                { label: "A", property: "a", type: "text" },
                { label: "B", property: "a", type: "email" },
            ] }"#,
        )
        .unwrap();
        assert!(load_schema(&path).is_err());
        let _ = fs::remove_file(&path);
    }
}
