//! Domain record catalog
//!
//! The concrete record types the API client exchanges with the server,
//! declared through the schema engine. Each schema is defined once, on
//! first use, and shared for the process lifetime through the catalog
//! registry. These are ordinary consumers of the engine: they inherit
//! construction, equality, hashing, and JSON conversion from their field
//! tables.

use std::sync::OnceLock;

use crate::serde::{Codec, FieldDescriptor, Schema, SchemaRegistry, Value};

/// Rejects negative values on count-like integer fields.
fn non_negative(value: &Value) -> Result<(), String> {
    match value.as_int() {
        Some(n) if n < 0 => Err(format!("must be non-negative, got {}", n)),
        _ => Ok(()),
    }
}

/// Rejects empty strings on identifier fields.
fn non_empty(value: &Value) -> Result<(), String> {
    match value.as_str() {
        Some("") => Err("must not be empty".to_string()),
        _ => Ok(()),
    }
}

fn build_catalog() -> SchemaRegistry {
    let source = Schema::new(
        "Source",
        vec![
            FieldDescriptor::required("source_id", Codec::Integer),
            FieldDescriptor::required("filesystem_id", Codec::String).with_validator(non_empty),
            FieldDescriptor::required("journalist_designation", Codec::String),
            FieldDescriptor::required("flagged", Codec::Boolean),
            FieldDescriptor::required("last_updated", Codec::Timestamp),
            FieldDescriptor::required("number_of_messages", Codec::Integer)
                .with_validator(non_negative),
            FieldDescriptor::required("number_of_documents", Codec::Integer)
                .with_validator(non_negative),
            FieldDescriptor::required("interaction_count", Codec::Integer)
                .with_validator(non_negative),
        ],
    )
    .expect("Source schema definition");

    let sources = Schema::new(
        "Sources",
        vec![FieldDescriptor::required(
            "sources",
            Codec::list(Codec::nested(&source)),
        )],
    )
    .expect("Sources schema definition");

    let submission = Schema::new(
        "Submission",
        vec![
            FieldDescriptor::required("submission_id", Codec::Integer),
            FieldDescriptor::required("source_id", Codec::Integer),
            FieldDescriptor::required("filename", Codec::String).with_validator(non_empty),
            FieldDescriptor::required("size", Codec::Integer).with_validator(non_negative),
            FieldDescriptor::required("is_read", Codec::Boolean),
            FieldDescriptor::optional("download_url", Codec::String),
        ],
    )
    .expect("Submission schema definition");

    let reply = Schema::new(
        "Reply",
        vec![
            FieldDescriptor::required("reply_id", Codec::Integer),
            FieldDescriptor::required("source_id", Codec::Integer),
            FieldDescriptor::required("journalist_username", Codec::String),
            FieldDescriptor::required("filename", Codec::String).with_validator(non_empty),
            FieldDescriptor::required("size", Codec::Integer).with_validator(non_negative),
        ],
    )
    .expect("Reply schema definition");

    // The server wraps the user payload under a "user" key; the nested
    // field keeps inner fields readable as if flattened on the outer type.
    let user_info = Schema::new(
        "UserInfo",
        vec![
            FieldDescriptor::required("username", Codec::String).with_validator(non_empty),
            FieldDescriptor::required("is_admin", Codec::Boolean),
            FieldDescriptor::optional("last_login", Codec::Timestamp),
        ],
    )
    .expect("UserInfo schema definition");

    let user = Schema::new(
        "User",
        vec![FieldDescriptor::required("user", Codec::nested(&user_info))],
    )
    .expect("User schema definition");

    let auth_token = Schema::new(
        "AuthToken",
        vec![
            FieldDescriptor::required("token", Codec::String).with_validator(non_empty),
            FieldDescriptor::required("expiration", Codec::Timestamp),
        ],
    )
    .expect("AuthToken schema definition");

    let mut registry = SchemaRegistry::new();
    for schema in [source, sources, submission, reply, user_info, user, auth_token] {
        registry.register(schema).expect("unique catalog names");
    }
    registry
}

/// Returns the process-wide catalog of domain schemas
pub fn catalog() -> &'static SchemaRegistry {
    static CATALOG: OnceLock<SchemaRegistry> = OnceLock::new();
    CATALOG.get_or_init(build_catalog)
}

fn lookup(name: &str) -> &'static Schema {
    catalog().get(name).expect("schema in catalog")
}

/// A single source, as returned by `GET sources/<filesystem_id>`
pub fn source() -> &'static Schema {
    lookup("Source")
}

/// The source collection envelope, as returned by `GET sources`
pub fn sources() -> &'static Schema {
    lookup("Sources")
}

/// A document or message submitted by a source
pub fn submission() -> &'static Schema {
    lookup("Submission")
}

/// A journalist reply to a source
pub fn reply() -> &'static Schema {
    lookup("Reply")
}

/// The current-user envelope, nested under the `user` wire key
pub fn user() -> &'static Schema {
    lookup("User")
}

/// An authentication token with its expiration instant
pub fn auth_token() -> &'static Schema {
    lookup("AuthToken")
}
