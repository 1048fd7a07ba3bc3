use thiserror::Error;

/// Configuration and programmer errors raised by the form engine.
///
/// User-input problems are never reported through this type; they are kept
/// as [`ValidationError`](crate::ValidationError)s on the affected control.
#[derive(Error, Debug)]
pub enum FormError {
    #[error("control '{property}' is not a collection")]
    NotACollection { property: String },

    #[error("unknown property: {0}")]
    UnknownProperty(String),

    #[error("duplicate property in schema: {0}")]
    DuplicateProperty(String),

    #[error("value for '{property}' does not match the {kind} field shape")]
    ValueShapeMismatch {
        property: String,
        kind: crate::FieldKind,
    },

    #[error("invalid pattern for '{property}': {source}")]
    InvalidPattern {
        property: String,
        #[source]
        source: regex::Error,
    },

    #[error("control factory failed for '{property}': {message}")]
    Factory { property: String, message: String },
}

pub type Result<T> = std::result::Result<T, FormError>;
