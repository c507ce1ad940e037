//! Feature encoding: categorical tables, the binary rule, and alignment
//! against the trained column order.
//!
//! The contract is deliberately asymmetric and reproduced from the system
//! the model was trained with: an unrecognized categorical label fails
//! hard, while a schema column missing from the encoded data silently
//! defaults to 0.

pub mod encoder;
pub mod table;

// Re-export commonly used types
pub use encoder::{align, encode, encode_and_align};
pub use table::{BinaryGate, EncodingTable, FieldEncoding, screening_table};
