//! Serde Engine Invariant Tests
//!
//! Tests for the guarantees the engine makes to every record type:
//! - Fully populated instances round-trip through JSON
//! - Absent optional fields are omitted on the wire, never null
//! - Unknown wire keys are tolerated and ignored
//! - Missing required fields fail construction
//! - Equal instances hash identically
//! - Every accepted timestamp form decodes to the same instant

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use jsonrec::records;
use jsonrec::serde::{Codec, FieldDescriptor, Schema, SerdeError, Value};
use serde_json::json;

// =============================================================================
// Helper Functions
// =============================================================================

fn item_schema() -> Schema {
    Schema::new(
        "Item",
        vec![
            FieldDescriptor::required("item_id", Codec::Integer),
            FieldDescriptor::required("label", Codec::String),
            FieldDescriptor::required("active", Codec::Boolean),
            FieldDescriptor::required("created_at", Codec::Timestamp),
            FieldDescriptor::optional("tags", Codec::list(Codec::String)),
            FieldDescriptor::optional("note", Codec::String),
        ],
    )
    .unwrap()
}

fn full_item_wire() -> serde_json::Value {
    json!({
        "item_id": 7,
        "label": "first",
        "active": true,
        "created_at": "2018-01-01T00:00:00Z",
        "tags": ["a", "b"],
        "note": "hand-checked",
    })
}

fn hash_of(value: &impl Hash) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

// =============================================================================
// Round-Trip Tests
// =============================================================================

/// A fully populated instance survives to_json/from_json unchanged.
#[test]
fn test_round_trip_fully_populated() {
    let schema = item_schema();
    let instance = schema.from_json(&full_item_wire()).unwrap();
    let again = schema.from_json(&instance.to_json()).unwrap();
    assert_eq!(instance, again);
    assert_eq!(hash_of(&instance), hash_of(&again));
}

/// Round-tripping emits semantically equivalent wire output for every
/// declared field.
#[test]
fn test_round_trip_wire_equivalence() {
    let schema = item_schema();
    let instance = schema.from_json(&full_item_wire()).unwrap();
    assert_eq!(instance.to_json(), full_item_wire());
}

/// Decoding is deterministic: the same wire input always produces the
/// same instance.
#[test]
fn test_decode_is_deterministic() {
    let schema = item_schema();
    let first = schema.from_json(&full_item_wire()).unwrap();
    for _ in 0..100 {
        let decoded = schema.from_json(&full_item_wire()).unwrap();
        assert_eq!(first, decoded);
        assert_eq!(hash_of(&first), hash_of(&decoded));
    }
}

// =============================================================================
// Optional Field Tests
// =============================================================================

/// An optional field left null is omitted from the wire output entirely.
#[test]
fn test_optional_omission() {
    let schema = item_schema();
    let mut wire = full_item_wire();
    wire.as_object_mut().unwrap().remove("note");

    let instance = schema.from_json(&wire).unwrap();
    assert!(instance.get("note").unwrap().is_null());

    let out = instance.to_json();
    let obj = out.as_object().unwrap();
    assert!(!obj.contains_key("note"));
}

/// An explicit wire null for an optional field reads back as null and is
/// then omitted on re-encode.
#[test]
fn test_optional_explicit_null() {
    let schema = item_schema();
    let mut wire = full_item_wire();
    wire["note"] = serde_json::Value::Null;

    let instance = schema.from_json(&wire).unwrap();
    assert!(instance.get("note").unwrap().is_null());
    assert!(!instance.to_json().as_object().unwrap().contains_key("note"));
}

// =============================================================================
// Unknown Key and Missing Field Tests
// =============================================================================

/// Wire keys not declared on the schema are silently ignored.
#[test]
fn test_unknown_key_tolerance() {
    let schema = item_schema();
    let mut wire = full_item_wire();
    wire["added_by_newer_server"] = json!({"nested": [1, 2, 3]});

    let instance = schema.from_json(&wire).unwrap();
    assert_eq!(instance.get("item_id").unwrap().as_int(), Some(7));
    assert!(instance.get("added_by_newer_server").is_none());
}

/// An empty object fails with the first missing required field.
#[test]
fn test_missing_required_field() {
    let schema = item_schema();
    let err = schema.from_json(&json!({})).unwrap_err();
    assert_eq!(err, SerdeError::missing_field("item_id"));
}

/// Missing-field checks run identically for wire decode and direct
/// construction.
#[test]
fn test_construct_and_decode_agree_on_missing() {
    let schema = item_schema();
    let from_wire = schema.from_json(&json!({ "item_id": 7 })).unwrap_err();
    let from_code = schema
        .construct([("item_id", Value::Int(7))])
        .unwrap_err();
    assert_eq!(from_wire, from_code);
}

/// Non-object wire values are rejected before any field work.
#[test]
fn test_not_an_object() {
    let schema = item_schema();
    let err = schema.from_json(&json!(["not", "an", "object"])).unwrap_err();
    assert!(matches!(err, SerdeError::NotAnObject { .. }));
}

// =============================================================================
// Equality and Hash Tests
// =============================================================================

/// Instances with identical field values are equal and hash identically.
#[test]
fn test_hash_equals_consistency() {
    let schema = item_schema();
    let a = schema.from_json(&full_item_wire()).unwrap();
    let b = schema.from_json(&full_item_wire()).unwrap();
    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));
}

/// A single differing field value breaks equality.
#[test]
fn test_field_difference_breaks_equality() {
    let schema = item_schema();
    let a = schema.from_json(&full_item_wire()).unwrap();

    let mut wire = full_item_wire();
    wire["label"] = json!("second");
    let b = schema.from_json(&wire).unwrap();
    assert_ne!(a, b);
}

/// Instances of different schemas never compare equal, even with the same
/// field values.
#[test]
fn test_schema_identity_required_for_equality() {
    let a = Schema::new(
        "A",
        vec![FieldDescriptor::required("x", Codec::Integer)],
    )
    .unwrap();
    let b = Schema::new(
        "B",
        vec![FieldDescriptor::required("x", Codec::Integer)],
    )
    .unwrap();

    let left = a.construct([("x", Value::Int(1))]).unwrap();
    let right = b.construct([("x", Value::Int(1))]).unwrap();
    assert_ne!(left, right);
}

/// Timestamps written in different accepted forms of the same instant
/// still compare equal inside instances.
#[test]
fn test_equality_across_timestamp_spellings() {
    let schema = item_schema();
    let a = schema.from_json(&full_item_wire()).unwrap();

    let mut wire = full_item_wire();
    wire["created_at"] = json!("2018-01-01T00:00:00+0000");
    let b = schema.from_json(&wire).unwrap();

    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));
}

// =============================================================================
// Timestamp Format Coverage
// =============================================================================

/// Every accepted wire form decodes, and all decode to the same instant.
#[test]
fn test_timestamp_format_coverage() {
    let schema = Schema::new(
        "Stamped",
        vec![FieldDescriptor::required("at", Codec::Timestamp)],
    )
    .unwrap();

    let forms = [
        "2018-01-01T00:00:00Z",
        "2018-01-01T00:00:00.000000Z",
        "2018-01-01T00:00:00+0000",
        "2018-01-01T00:00:00+00:00",
        "2018-01-01T00:00:00.000000+0000",
    ];

    let mut instants = Vec::new();
    for form in forms {
        let instance = schema.from_json(&json!({ "at": form })).unwrap();
        let ts = instance.get("at").unwrap().as_timestamp().unwrap();
        // Serialization re-emits the text exactly as received
        assert_eq!(ts.as_str(), form);
        instants.push(ts.instant());
    }
    assert!(instants.windows(2).all(|w| w[0] == w[1]));
}

/// A date without a time component matches no accepted pattern.
#[test]
fn test_date_only_is_malformed() {
    let schema = Schema::new(
        "Stamped",
        vec![FieldDescriptor::required("at", Codec::Timestamp)],
    )
    .unwrap();

    let err = schema.from_json(&json!({ "at": "2018-01-01" })).unwrap_err();
    assert_eq!(err, SerdeError::malformed_value("at", "2018-01-01"));
}

// =============================================================================
// Domain Scenario Tests
// =============================================================================

/// The nested user payload decodes with inner fields readable through the
/// outer instance.
#[test]
fn test_nested_user_decode() {
    let wire = json!({
        "user": {
            "username": "journalist",
            "is_admin": true,
            "last_login": "2018-01-01T00:00:00Z",
        },
    });

    let instance = records::user().from_json(&wire).unwrap();
    assert_eq!(
        instance.get("username").unwrap().as_str(),
        Some("journalist")
    );
}

/// The sources envelope decodes into a list of nested source records.
#[test]
fn test_sources_list_decode() {
    let wire = json!({
        "sources": [
            {
                "source_id": 1,
                "filesystem_id": "abc",
                "journalist_designation": "foo bar",
                "flagged": true,
                "last_updated": "2018-01-01T00:00:00Z",
                "number_of_messages": 2,
                "number_of_documents": 3,
                "interaction_count": 4,
            },
        ],
    });

    let instance = records::sources().from_json(&wire).unwrap();
    let items = instance.get("sources").unwrap().as_list().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(
        items[0].as_record().unwrap().get("filesystem_id").unwrap().as_str(),
        Some("abc")
    );
}

/// A bad timestamp inside a list element surfaces from the nested decode.
#[test]
fn test_sources_bad_element_surfaces_error() {
    let wire = json!({
        "sources": [
            {
                "source_id": 1,
                "filesystem_id": "abc",
                "journalist_designation": "foo bar",
                "flagged": true,
                "last_updated": "2018-01-01",
                "number_of_messages": 2,
                "number_of_documents": 3,
                "interaction_count": 4,
            },
        ],
    });

    let err = records::sources().from_json(&wire).unwrap_err();
    assert_eq!(err, SerdeError::malformed_value("last_updated", "2018-01-01"));
}
