//! Error types for the serde engine
//!
//! One taxonomy, `SerdeError`, covers every failure the engine can surface:
//! decode failures, construction failures, validator rejections, and
//! definition-time mistakes. All failures propagate synchronously to the
//! immediate caller; the engine never logs or swallows them.

use thiserror::Error;

/// Result type for serde operations
pub type SerdeResult<T> = Result<T, SerdeError>;

/// Failures surfaced by decoding, construction, and schema definition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerdeError {
    /// Required field absent (or explicitly null) during decode or
    /// direct construction
    #[error("missing field '{field}'")]
    MissingField { field: String },

    /// A leaf or container check failed
    #[error("field '{field}': expected {expected}, got {got}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        got: String,
    },

    /// Value had the right shape but could not be parsed
    /// (e.g. a timestamp matching no accepted pattern)
    #[error("field '{field}': malformed value: {raw}")]
    MalformedValue { field: String, raw: String },

    /// `from_json` received a non-object wire value
    #[error("not an object: {raw}")]
    NotAnObject { raw: String },

    /// A field's attached validator rejected the value; the validator's
    /// message is preserved, its error type is not
    #[error("field '{field}' rejected: {message}")]
    ValidatorRejected { field: String, message: String },

    /// Two fields with the same name declared on one schema
    #[error("duplicate field '{field}' in schema '{schema}'")]
    DuplicateField { schema: String, field: String },

    /// A schema name registered twice
    #[error("schema '{schema}' is already registered")]
    SchemaRedefined { schema: String },
}

impl SerdeError {
    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create a type mismatch error
    pub fn type_mismatch(
        field: impl Into<String>,
        expected: &'static str,
        got: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected,
            got: got.into(),
        }
    }

    /// Create a malformed value error
    pub fn malformed_value(field: impl Into<String>, raw: impl Into<String>) -> Self {
        Self::MalformedValue {
            field: field.into(),
            raw: raw.into(),
        }
    }

    /// Create a not-an-object error from the offending wire value
    pub fn not_an_object(raw: &serde_json::Value) -> Self {
        Self::NotAnObject {
            raw: raw.to_string(),
        }
    }

    /// Create a validator rejection error
    pub fn validator_rejected(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidatorRejected {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns the field path this error is about, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingField { field }
            | Self::TypeMismatch { field, .. }
            | Self::MalformedValue { field, .. }
            | Self::ValidatorRejected { field, .. }
            | Self::DuplicateField { field, .. } => Some(field),
            Self::NotAnObject { .. } | Self::SchemaRedefined { .. } => None,
        }
    }

    /// Returns whether this error was raised at schema-definition time
    /// rather than while converting or constructing values
    pub fn is_definition_error(&self) -> bool {
        matches!(
            self,
            Self::DuplicateField { .. } | Self::SchemaRedefined { .. }
        )
    }
}
