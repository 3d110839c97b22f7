//! In-memory schema registry
//!
//! Schemas are defined once, at init, and live for the process lifetime.
//! The registry gives that lifecycle a home: it maps schema names to their
//! shared tables and rejects redefinition, so every consumer of a name
//! sees the same table for the life of the process.

use std::collections::HashMap;

use super::errors::{SerdeError, SerdeResult};
use super::schema::Schema;

/// Name-keyed registry of shared schemas.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, Schema>,
}

impl SchemaRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a schema under its own name.
    ///
    /// Registering the same name twice fails: schemas are immutable for
    /// the process lifetime.
    pub fn register(&mut self, schema: Schema) -> SerdeResult<()> {
        if self.schemas.contains_key(schema.name()) {
            return Err(SerdeError::SchemaRedefined {
                schema: schema.name().to_string(),
            });
        }
        self.schemas.insert(schema.name().to_string(), schema);
        Ok(())
    }

    /// Gets a schema by name
    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.schemas.get(name)
    }

    /// Checks whether a schema name is registered
    pub fn exists(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Returns all registered schemas
    pub fn all_schemas(&self) -> impl Iterator<Item = &Schema> {
        self.schemas.values()
    }

    /// Returns the number of registered schemas
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serde::codec::Codec;
    use crate::serde::field::FieldDescriptor;

    fn sample_schema() -> Schema {
        Schema::new(
            "AuthToken",
            vec![FieldDescriptor::required("token", Codec::String)],
        )
        .unwrap()
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = SchemaRegistry::new();
        registry.register(sample_schema()).unwrap();

        let schema = registry.get("AuthToken");
        assert!(schema.is_some());
        assert_eq!(schema.unwrap().name(), "AuthToken");
        assert!(registry.exists("AuthToken"));
        assert_eq!(registry.schema_count(), 1);
    }

    #[test]
    fn test_redefinition_rejected() {
        let mut registry = SchemaRegistry::new();
        registry.register(sample_schema()).unwrap();

        let result = registry.register(sample_schema());
        assert_eq!(
            result.unwrap_err(),
            SerdeError::SchemaRedefined {
                schema: "AuthToken".into(),
            }
        );
    }

    #[test]
    fn test_unknown_schema() {
        let registry = SchemaRegistry::new();
        assert!(registry.get("nonexistent").is_none());
        assert!(!registry.exists("nonexistent"));
    }
}
