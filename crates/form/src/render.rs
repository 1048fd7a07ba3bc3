//! HTML markup for a form component.
//!
//! The output is a self-contained `<form>` element using the component's
//! `StyleMap` class names. Errors are only rendered for touched controls.
//! All user-supplied text is escaped.

use std::fmt::Write as _;

use crate::component::FormComponent;
use crate::field::{FieldDescriptor, FieldKind};
use crate::value::FieldValue;

/// Render the full form.
pub fn render_html(form: &FormComponent) -> String {
    let styles = form.styles();
    let mut out = String::new();
    let _ = writeln!(out, r#"<form class="{}" novalidate>"#, escape(&styles.container));

    for field in form.schema().fields() {
        let value = form
            .control(&field.property)
            .map(|c| c.value.clone())
            .unwrap_or_else(|| field.kind.initial_value());
        let _ = writeln!(
            out,
            r#"  <label class="{}" for="{}">{}</label>"#,
            escape(&styles.label),
            escape(&field.property),
            escape(&field.label)
        );
        render_input(&mut out, form, field, &value);
        if let Some(message) = form.visible_error(&field.property) {
            let _ = writeln!(
                out,
                r#"  <span class="{}">{} {}</span>"#,
                escape(&styles.error),
                escape(&field.label),
                escape(&message)
            );
        }
    }

    let _ = writeln!(out, r#"  <button type="submit" class="{}">Submit</button>"#, escape(&styles.submit));
    let _ = writeln!(out, r#"  <button type="button" class="{}">Cancel</button>"#, escape(&styles.cancel));
    out.push_str("</form>\n");
    out
}

fn render_input(out: &mut String, form: &FormComponent, field: &FieldDescriptor, value: &FieldValue) {
    let class = escape(&form.styles().input);
    let name = escape(&field.property);
    let placeholder = field
        .placeholder
        .as_deref()
        .map(|p| format!(r#" placeholder="{}""#, escape(p)))
        .unwrap_or_default();
    let text = escape(value.as_text().unwrap_or(""));

    match field.kind {
        FieldKind::Text | FieldKind::Email | FieldKind::Number | FieldKind::Date => {
            let _ = writeln!(
                out,
                r#"  <input id="{name}" name="{name}" type="{}" class="{class}" value="{text}"{placeholder}>"#,
                field.kind
            );
        }
        FieldKind::Textarea => {
            let _ = writeln!(
                out,
                r#"  <textarea id="{name}" name="{name}" class="{class}"{placeholder}>{text}</textarea>"#
            );
        }
        FieldKind::Select => {
            let _ = writeln!(out, r#"  <select id="{name}" name="{name}" class="{class}">"#);
            if let Some(p) = &field.placeholder {
                let _ = writeln!(out, r#"    <option value="" disabled>{}</option>"#, escape(p));
            }
            for option in &field.options {
                let selected = if value.as_text() == Some(option.key.as_str()) {
                    " selected"
                } else {
                    ""
                };
                let _ = writeln!(
                    out,
                    r#"    <option value="{}"{selected}>{}</option>"#,
                    escape(&option.key),
                    escape(&option.value)
                );
            }
            out.push_str("  </select>\n");
        }
        FieldKind::Radio | FieldKind::Checkbox => {
            let input_type = field.kind;
            for option in &field.options {
                let checked = match value {
                    FieldValue::Text(s) => *s == option.key,
                    FieldValue::List(_) => form.has_option(&field.property, &option.key),
                };
                let _ = writeln!(
                    out,
                    r#"  <label><input type="{input_type}" name="{name}" class="{class}" value="{}"{}> {}</label>"#,
                    escape(&option.key),
                    if checked { " checked" } else { "" },
                    escape(&option.value)
                );
            }
        }
    }
}

/// Minimal HTML escaping for text and attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
