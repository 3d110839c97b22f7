//! Schemas and the behaviors synthesized from them
//!
//! A `Schema` is a named, ordered field table, fixed at definition time.
//! From that table the engine synthesizes construction-with-validation,
//! structural equality, hashing, and bidirectional JSON conversion, so a
//! record type never hand-writes any of them.
//!
//! Every operation is a single-pass, non-suspending transform over the
//! immutable table and the supplied values. The table is read-only after
//! definition and may be read concurrently without synchronization.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::errors::{SerdeError, SerdeResult};
use super::field::FieldDescriptor;
use super::value::Value;

/// A named, ordered field table defining a record type.
///
/// Cheap to clone: instances, nested codecs, and the registry all share
/// the same underlying table.
#[derive(Debug, Clone)]
pub struct Schema {
    inner: Arc<SchemaInner>,
}

#[derive(Debug)]
struct SchemaInner {
    name: String,
    fields: Vec<FieldDescriptor>,
}

impl Schema {
    /// Defines a schema from an ordered list of field descriptors.
    ///
    /// Field names must be unique within one schema.
    pub fn new(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> SerdeResult<Self> {
        let name = name.into();
        for (i, field) in fields.iter().enumerate() {
            if fields[..i].iter().any(|f| f.name() == field.name()) {
                return Err(SerdeError::DuplicateField {
                    schema: name,
                    field: field.name().to_string(),
                });
            }
        }
        Ok(Self {
            inner: Arc::new(SchemaInner { name, fields }),
        })
    }

    /// Returns the schema name
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Returns the declared fields, in declaration order
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.inner.fields
    }

    /// Looks up a declared field by programmatic name
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.inner.fields.iter().find(|f| f.name() == name)
    }

    /// Returns whether two handles share one underlying table
    fn same_table(&self, other: &Schema) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Constructs a validated instance from named values.
    ///
    /// For each declared field, in declaration order: an absent (or null)
    /// value fails with `MissingField` unless the field is optional; a
    /// non-null value must pass the codec's kind check; an attached
    /// validator then runs with the value (null included, for absent
    /// optional fields). Supplied names matching no declared field are
    /// ignored. Construction is all-or-nothing: no partially constructed
    /// instance is ever observable.
    pub fn construct<S, V, I>(&self, supplied: I) -> SerdeResult<Instance>
    where
        S: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (S, V)>,
    {
        let mut supplied: HashMap<String, Value> = supplied
            .into_iter()
            .map(|(name, value)| (name.into(), value.into()))
            .collect();

        let mut values = Vec::with_capacity(self.inner.fields.len());
        for field in &self.inner.fields {
            let value = supplied.remove(field.name()).unwrap_or(Value::Null);

            if value.is_null() && !field.is_optional() {
                return Err(SerdeError::missing_field(field.name()));
            }
            if !value.is_null() {
                field.codec().validate(field.name(), &value)?;
            }
            if let Some(validator) = field.validator() {
                validator(&value)
                    .map_err(|message| SerdeError::validator_rejected(field.name(), message))?;
            }

            values.push(value);
        }

        Ok(Instance {
            schema: self.clone(),
            values,
        })
    }

    /// Decodes a wire object into a validated instance.
    ///
    /// Fails with `NotAnObject` for non-object wire values. Only wire keys
    /// matching a declared field's wire name are read; unknown keys are
    /// silently ignored so newer servers can add fields without breaking
    /// older consumers. The converted values then go through `construct`,
    /// so the missing-field check and validators run uniformly whether an
    /// instance came from the wire or from code.
    pub fn from_json(&self, wire: &serde_json::Value) -> SerdeResult<Instance> {
        let obj = wire
            .as_object()
            .ok_or_else(|| SerdeError::not_an_object(wire))?;

        let mut converted: Vec<(String, Value)> = Vec::new();
        for field in &self.inner.fields {
            if let Some(raw) = obj.get(field.wire_name()) {
                let value = field.codec().from_json(field.wire_name(), raw)?;
                converted.push((field.name().to_string(), value));
            }
        }

        self.construct(converted)
    }
}

/// A validated value conforming to a schema.
///
/// Instances hold one value per declared field and are immutable: values
/// are reachable only through accessors, so the validated-at-construction
/// invariant can never be broken afterwards.
#[derive(Debug, Clone)]
pub struct Instance {
    schema: Schema,
    values: Vec<Value>,
}

impl Instance {
    /// Returns the schema this instance conforms to
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Returns a field's value by programmatic name.
    ///
    /// Names not declared on this schema fall through into nested record
    /// values, in declaration order, so a sub-object's fields read as if
    /// flattened onto the outer instance. Absent optional fields read as
    /// `Value::Null`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        if let Some(position) = self
            .schema
            .inner
            .fields
            .iter()
            .position(|f| f.name() == name)
        {
            return Some(&self.values[position]);
        }
        self.values
            .iter()
            .filter_map(Value::as_record)
            .find_map(|nested| nested.get(name))
    }

    /// Encodes this instance as a wire object.
    ///
    /// Fields travel under their wire names. An optional field holding
    /// null is omitted entirely: absence on the wire is the key missing,
    /// never an explicit null.
    pub fn to_json(&self) -> serde_json::Value {
        let mut out = serde_json::Map::new();
        for (field, value) in self.schema.inner.fields.iter().zip(&self.values) {
            if value.is_null() && field.is_optional() {
                continue;
            }
            out.insert(field.wire_name().to_string(), field.codec().to_json(value));
        }
        serde_json::Value::Object(out)
    }
}

impl PartialEq for Instance {
    /// Structural equality: same schema, then every declared field's value
    /// pairwise, short-circuiting on the first mismatch.
    fn eq(&self, other: &Self) -> bool {
        if !self.schema.same_table(&other.schema) && self.schema.name() != other.schema.name() {
            return false;
        }
        self.values == other.values
    }
}

impl Eq for Instance {}

impl Hash for Instance {
    /// Combines per-field value hashes with XOR, iterating fields in
    /// sorted-by-name order. Matches the `Eq` impl: equal instances hash
    /// identically regardless of declaration order.
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut order: Vec<usize> = (0..self.values.len()).collect();
        order.sort_by_key(|&i| self.schema.inner.fields[i].name());

        let mut combined = 0u64;
        for i in order {
            let mut hasher = DefaultHasher::new();
            self.values[i].hash(&mut hasher);
            combined ^= hasher.finish();
        }
        state.write_u64(combined);
    }
}
