//! Schema/serde engine
//!
//! # Design Principles
//!
//! - A schema is declared once, at init, as an ordered field table
//! - Construct, equality, hash, and JSON conversion are synthesized from
//!   the table, never hand-written per record type
//! - Every converter exposes the same capability set, so dispatch is
//!   uniform
//! - Construction is all-or-nothing; instances are valid for life
//! - Failures surface synchronously; the engine never logs or swallows

mod codec;
mod errors;
mod field;
mod registry;
mod schema;
mod value;

pub use codec::Codec;
pub use errors::{SerdeError, SerdeResult};
pub use field::{FieldDescriptor, Validator};
pub use registry::SchemaRegistry;
pub use schema::{Instance, Schema};
pub use value::{Timestamp, Value};
