//! Wire converters for field values
//!
//! A `Codec` declares how one field crosses the JSON boundary. Leaf codecs
//! cover the primitive scalars, `List` lifts an element codec over ordered
//! sequences, and `Nested` embeds another schema as a single field value.
//!
//! Every codec exposes the same three operations, so dispatch is uniform:
//! - `from_json`: checked wire-to-value conversion
//! - `to_json`: value-to-wire conversion
//! - `validate`: kind check on an already-typed value

use super::errors::{SerdeError, SerdeResult};
use super::schema::Schema;
use super::value::{Timestamp, Value};

/// A field's wire converter.
#[derive(Debug, Clone)]
pub enum Codec {
    /// UTF-8 string, identity on the wire
    String,
    /// Boolean, identity on the wire
    Boolean,
    /// 64-bit signed integer, identity on the wire
    Integer,
    /// Timestamp text parsed against the accepted pattern list;
    /// re-emitted unreformatted
    Timestamp,
    /// Ordered sequence of an element codec (boxed to allow nesting)
    List(Box<Codec>),
    /// Another schema embedded as a single field value
    Nested(Schema),
}

impl Codec {
    /// Convenience constructor for a list codec
    pub fn list(element: Codec) -> Self {
        Codec::List(Box::new(element))
    }

    /// Convenience constructor for a nested schema codec
    pub fn nested(schema: &Schema) -> Self {
        Codec::Nested(schema.clone())
    }

    /// Returns the kind name for error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Codec::String => "string",
            Codec::Boolean => "bool",
            Codec::Integer => "int",
            Codec::Timestamp => "timestamp",
            Codec::List(_) => "list",
            Codec::Nested(_) => "record",
        }
    }

    /// Converts a wire value into a typed value.
    ///
    /// Null passes through as `Value::Null` for every codec; whether null
    /// is acceptable is decided later by the owning field's optionality.
    /// `field_path` names the field (or `field[index]` for list elements)
    /// in error messages.
    pub fn from_json(&self, field_path: &str, wire: &serde_json::Value) -> SerdeResult<Value> {
        if wire.is_null() {
            return Ok(Value::Null);
        }

        match self {
            Codec::String => wire
                .as_str()
                .map(|s| Value::Str(s.to_string()))
                .ok_or_else(|| mismatch(field_path, "string", wire)),
            Codec::Boolean => wire
                .as_bool()
                .map(Value::Bool)
                .ok_or_else(|| mismatch(field_path, "bool", wire)),
            Codec::Integer => match wire.as_i64() {
                Some(i) => Ok(Value::Int(i)),
                // An integral number too large for i64 has the right wire
                // kind but no representable value
                None if wire.is_u64() => {
                    Err(SerdeError::malformed_value(field_path, wire.to_string()))
                }
                None => Err(mismatch(field_path, "int", wire)),
            },
            Codec::Timestamp => {
                let text = wire
                    .as_str()
                    .ok_or_else(|| mismatch(field_path, "timestamp", wire))?;
                Timestamp::parse(text)
                    .map(Value::Timestamp)
                    .ok_or_else(|| SerdeError::malformed_value(field_path, text))
            }
            Codec::List(element) => {
                let items = wire
                    .as_array()
                    .ok_or_else(|| mismatch(field_path, "list", wire))?;
                let mut out = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    out.push(element.from_json(&format!("{}[{}]", field_path, i), item)?);
                }
                Ok(Value::List(out))
            }
            Codec::Nested(schema) => Ok(Value::Record(schema.from_json(wire)?)),
        }
    }

    /// Emits the wire form of a typed value.
    pub fn to_json(&self, value: &Value) -> serde_json::Value {
        value.to_wire()
    }

    /// Checks that a typed value has the kind this codec converts.
    ///
    /// List elements are not validated here; they were checked when the
    /// list was converted or constructed. Null is never valid: callers
    /// skip validation for null values and enforce optionality instead.
    pub fn validate(&self, field_path: &str, value: &Value) -> SerdeResult<()> {
        let ok = match self {
            Codec::String => matches!(value, Value::Str(_)),
            Codec::Boolean => matches!(value, Value::Bool(_)),
            Codec::Integer => matches!(value, Value::Int(_)),
            Codec::Timestamp => matches!(value, Value::Timestamp(_)),
            Codec::List(_) => matches!(value, Value::List(_)),
            Codec::Nested(schema) => match value {
                Value::Record(instance) => {
                    if instance.schema().name() == schema.name() {
                        true
                    } else {
                        return Err(SerdeError::type_mismatch(
                            field_path,
                            self.kind_name(),
                            format!("record of schema '{}'", instance.schema().name()),
                        ));
                    }
                }
                _ => false,
            },
        };

        if ok {
            Ok(())
        } else {
            Err(SerdeError::type_mismatch(
                field_path,
                self.kind_name(),
                value.kind_name(),
            ))
        }
    }
}

/// Returns the JSON type name for error messages.
fn wire_kind_name(wire: &serde_json::Value) -> &'static str {
    match wire {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "int"
            } else {
                "float"
            }
        }
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Creates a type mismatch error against a wire value.
fn mismatch(field_path: &str, expected: &'static str, wire: &serde_json::Value) -> SerdeError {
    SerdeError::type_mismatch(field_path, expected, wire_kind_name(wire))
}
