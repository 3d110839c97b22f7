//! Field descriptors
//!
//! A `FieldDescriptor` declares one slot on a schema: which codec converts
//! it, whether it may be absent, the wire key it travels under, and an
//! optional post-validation callback. Descriptors are immutable once
//! declared and owned by exactly one schema.

use std::fmt;

use super::codec::Codec;
use super::value::Value;

/// Post-validation callback attached to a field.
///
/// Runs after the codec's kind check, with the field's value (null for an
/// absent optional field). A rejection message is re-surfaced as
/// `SerdeError::ValidatorRejected`; the callback's own error type never
/// reaches the caller.
pub type Validator = Box<dyn Fn(&Value) -> Result<(), String> + Send + Sync>;

/// Declares one named slot on a schema.
pub struct FieldDescriptor {
    name: String,
    wire_name: Option<String>,
    codec: Codec,
    optional: bool,
    validator: Option<Validator>,
}

impl FieldDescriptor {
    /// Declares a required field
    pub fn required(name: impl Into<String>, codec: Codec) -> Self {
        Self {
            name: name.into(),
            wire_name: None,
            codec,
            optional: false,
            validator: None,
        }
    }

    /// Declares an optional field
    pub fn optional(name: impl Into<String>, codec: Codec) -> Self {
        Self {
            name: name.into(),
            wire_name: None,
            codec,
            optional: true,
            validator: None,
        }
    }

    /// Sets a wire key different from the programmatic name.
    ///
    /// Used mostly with nested codecs, for APIs that wrap a sub-object
    /// under its own key.
    pub fn with_wire_name(mut self, wire_name: impl Into<String>) -> Self {
        self.wire_name = Some(wire_name.into());
        self
    }

    /// Attaches a post-validation callback
    pub fn with_validator(
        mut self,
        validator: impl Fn(&Value) -> Result<(), String> + Send + Sync + 'static,
    ) -> Self {
        self.validator = Some(Box::new(validator));
        self
    }

    /// Returns the programmatic field name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the key this field travels under on the wire
    pub fn wire_name(&self) -> &str {
        self.wire_name.as_deref().unwrap_or(&self.name)
    }

    /// Returns the field's codec
    pub fn codec(&self) -> &Codec {
        &self.codec
    }

    /// Returns whether the field may be absent
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Returns the attached validator, if any
    pub fn validator(&self) -> Option<&Validator> {
        self.validator.as_ref()
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("wire_name", &self.wire_name)
            .field("codec", &self.codec)
            .field("optional", &self.optional)
            .field("validator", &self.validator.is_some())
            .finish()
    }
}
