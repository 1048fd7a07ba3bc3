//! Validation rules attached to form fields.
//!
//! A rule inspects a [`FieldValue`] and either accepts it or produces a
//! [`ValidationError`] tagged with the rule's error kind. The kind is the key
//! used by [`ErrorMessages`](crate::ErrorMessages) to resolve a user-facing
//! message.
//!
//! Empty-value handling:
//! - `Required` fails on `""` and `[]`
//! - `Email`, `Pattern` and `MinLength` accept empty values (pair them with
//!   `Required` to forbid those)
//! - `MaxLength` only fails when the length exceeds the limit
//! - `Custom` predicates always run

use std::fmt;
use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{FormError, Result};
use crate::value::FieldValue;

pub const REQUIRED: &str = "required";
pub const EMAIL: &str = "email";
pub const PATTERN: &str = "pattern";
pub const MIN_LENGTH: &str = "minlength";
pub const MAX_LENGTH: &str = "maxlength";

lazy_static! {
    // Local part and domain labels as accepted by browsers' email inputs.
    static ref EMAIL_RE: Regex = Regex::new(
        r"^[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+)*@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
    )
    .unwrap();
}

const EMAIL_MAX_LEN: usize = 254;
const EMAIL_LOCAL_MAX_LEN: usize = 64;

/// Predicate used by [`ValidationRule::Custom`]; returns `true` when valid.
pub type Predicate = Arc<dyn Fn(&FieldValue) -> bool + Send + Sync>;

/// A single failing rule on a control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub kind: String,
}

impl ValidationError {
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into() }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

/// Framework-independent validation rule.
#[derive(Clone)]
pub enum ValidationRule {
    Required,
    Email,
    Pattern(Regex),
    MinLength(usize),
    MaxLength(usize),
    Custom { kind: String, predicate: Predicate },
}

impl ValidationRule {
    /// Build a custom rule from a predicate. `kind` is the error-kind tag.
    pub fn custom(
        kind: impl Into<String>,
        predicate: impl Fn(&FieldValue) -> bool + Send + Sync + 'static,
    ) -> Self {
        ValidationRule::Custom {
            kind: kind.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// Error-kind tag reported when this rule fails.
    pub fn kind(&self) -> &str {
        match self {
            ValidationRule::Required => REQUIRED,
            ValidationRule::Email => EMAIL,
            ValidationRule::Pattern(_) => PATTERN,
            ValidationRule::MinLength(_) => MIN_LENGTH,
            ValidationRule::MaxLength(_) => MAX_LENGTH,
            ValidationRule::Custom { kind, .. } => kind,
        }
    }

    /// Validate a value against this rule.
    pub fn check(&self, value: &FieldValue) -> Option<ValidationError> {
        let valid = match self {
            ValidationRule::Required => !value.is_empty(),
            ValidationRule::Email => match value {
                FieldValue::Text(s) if !s.is_empty() => is_email(s),
                _ => true,
            },
            ValidationRule::Pattern(re) => match value {
                FieldValue::Text(s) if !s.is_empty() => re.is_match(s),
                _ => true,
            },
            ValidationRule::MinLength(min) => value.is_empty() || value.len() >= *min,
            ValidationRule::MaxLength(max) => value.len() <= *max,
            ValidationRule::Custom { predicate, .. } => predicate(value),
        };
        (!valid).then(|| ValidationError::new(self.kind()))
    }
}

impl fmt::Debug for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationRule::Required => write!(f, "Required"),
            ValidationRule::Email => write!(f, "Email"),
            ValidationRule::Pattern(re) => f.debug_tuple("Pattern").field(&re.as_str()).finish(),
            ValidationRule::MinLength(n) => f.debug_tuple("MinLength").field(n).finish(),
            ValidationRule::MaxLength(n) => f.debug_tuple("MaxLength").field(n).finish(),
            ValidationRule::Custom { kind, .. } => {
                f.debug_struct("Custom").field("kind", kind).finish_non_exhaustive()
            }
        }
    }
}

/// Run all rules in declaration order and collect the failures.
pub fn run_rules(rules: &[ValidationRule], value: &FieldValue) -> Vec<ValidationError> {
    rules.iter().filter_map(|rule| rule.check(value)).collect()
}

fn is_email(s: &str) -> bool {
    if s.len() > EMAIL_MAX_LEN {
        return false;
    }
    match s.split_once('@') {
        Some((local, _)) if local.len() <= EMAIL_LOCAL_MAX_LEN => EMAIL_RE.is_match(s),
        _ => false,
    }
}

/// Serialisable form of a rule, as written in schema files.
///
/// ```toml
/// validators = [
///   { rule = "required" },
///   { rule = "pattern", pattern = "\\d{10}" },
/// ]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum RuleConfig {
    Required,
    Email,
    Pattern { pattern: String },
    MinLength { len: usize },
    MaxLength { len: usize },
}

impl RuleConfig {
    /// Compile into a [`ValidationRule`]. Patterns are anchored at both ends
    /// unless they already are.
    pub fn compile(&self, property: &str) -> Result<ValidationRule> {
        Ok(match self {
            RuleConfig::Required => ValidationRule::Required,
            RuleConfig::Email => ValidationRule::Email,
            RuleConfig::Pattern { pattern } => {
                let anchored = anchor_pattern(pattern);
                let re = Regex::new(&anchored).map_err(|source| FormError::InvalidPattern {
                    property: property.to_string(),
                    source,
                })?;
                ValidationRule::Pattern(re)
            }
            RuleConfig::MinLength { len } => ValidationRule::MinLength(*len),
            RuleConfig::MaxLength { len } => ValidationRule::MaxLength(*len),
        })
    }
}

fn anchor_pattern(pattern: &str) -> String {
    let mut anchored = String::with_capacity(pattern.len() + 6);
    if !pattern.starts_with('^') {
        anchored.push_str("^(?:");
    }
    anchored.push_str(pattern);
    if !pattern.starts_with('^') {
        anchored.push(')');
    }
    if !pattern.ends_with('$') {
        anchored.push('$');
    }
    anchored
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> FieldValue {
        FieldValue::from(s)
    }

    #[test]
    fn required_rejects_empty_text_and_list() {
        assert!(ValidationRule::Required.check(&text("")).is_some());
        assert!(ValidationRule::Required.check(&FieldValue::empty_list()).is_some());
        assert!(ValidationRule::Required.check(&text(" ")).is_none());
        assert!(ValidationRule::Required.check(&FieldValue::from(vec!["a"])).is_none());
    }

    #[test]
    fn email_accepts_common_addresses() {
        for v in ["a@b", "first.last@example.com", "x+tag@sub.domain.org", ""] {
            assert!(ValidationRule::Email.check(&text(v)).is_none(), "expected OK for {v:?}");
        }
    }

    #[test]
    fn email_rejects_malformed_addresses() {
        let long_local = format!("{}@example.com", "a".repeat(65));
        for v in ["plain", "@example.com", "a@", "a@-bad.com", "a b@c.com", long_local.as_str()] {
            assert!(ValidationRule::Email.check(&text(v)).is_some(), "expected Err for {v:?}");
        }
    }

    #[test]
    fn length_rules_skip_or_apply_on_empty() {
        assert!(ValidationRule::MinLength(3).check(&text("")).is_none());
        assert!(ValidationRule::MinLength(3).check(&text("ab")).is_some());
        assert!(ValidationRule::MinLength(3).check(&text("abc")).is_none());
        assert!(ValidationRule::MaxLength(3).check(&text("abcd")).is_some());
        assert!(ValidationRule::MaxLength(3).check(&text("")).is_none());
        assert!(ValidationRule::MaxLength(1).check(&FieldValue::from(vec!["a", "b"])).is_some());
    }

    #[test]
    fn custom_rule_reports_its_kind() {
        let rule = ValidationRule::custom("invalidPhoneNumber", |v| {
            v.as_text().is_some_and(|s| s.len() == 10)
        });
        let err = rule.check(&text("123")).unwrap();
        assert_eq!(err.kind, "invalidPhoneNumber");
        assert!(rule.check(&text("1234567890")).is_none());
    }

    #[test]
    fn run_rules_keeps_declaration_order() {
        let rules = vec![ValidationRule::MinLength(5), ValidationRule::Email];
        let kinds: Vec<_> = run_rules(&rules, &text("ab"))
            .into_iter()
            .map(|e| e.kind)
            .collect();
        assert_eq!(kinds, vec![MIN_LENGTH.to_string(), EMAIL.to_string()]);
    }

    #[test]
    fn configured_patterns_are_anchored() {
        let rule = RuleConfig::Pattern { pattern: r"\d{10}".into() }
            .compile("phone")
            .unwrap();
        assert!(rule.check(&text("1234567890")).is_none());
        assert!(rule.check(&text("x1234567890x")).is_some());

        let explicit = RuleConfig::Pattern { pattern: r"^\d+$".into() }
            .compile("phone")
            .unwrap();
        assert!(explicit.check(&text("42")).is_none());
    }

    #[test]
    fn invalid_pattern_is_a_configuration_error() {
        let err = RuleConfig::Pattern { pattern: "(".into() }
            .compile("phone")
            .unwrap_err();
        assert!(matches!(err, FormError::InvalidPattern { ref property, .. } if property == "phone"));
    }

    #[test]
    fn rule_config_deserializes_from_tagged_json() {
        let rules: Vec<RuleConfig> = serde_json::from_str(
            r#"[{"rule":"required"},{"rule":"min_length","len":2},{"rule":"pattern","pattern":"a+"}]"#,
        )
        .unwrap();
        assert_eq!(
            rules,
            vec![
                RuleConfig::Required,
                RuleConfig::MinLength { len: 2 },
                RuleConfig::Pattern { pattern: "a+".into() },
            ]
        );
    }
}
