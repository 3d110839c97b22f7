//! jsonrec - declarative record schemas with validated JSON conversion
//!
//! A record type is declared once, at init, as an ordered table of field
//! descriptors. Construction-with-validation, structural equality, hashing,
//! and bidirectional JSON conversion are all synthesized from that table.

pub mod records;
pub mod serde;
