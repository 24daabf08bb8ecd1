//! Conversion between wire JSON and records.
//!
//! `dump` functions turn records into serializable views; `load` functions
//! validate untrusted input and either produce a record to persist or a
//! field-keyed [`ValidationErrors`] map.

pub mod author;
pub mod errors;
pub mod quote;

pub use author::{AuthorDump, AuthorSchema};
pub use errors::{FieldError, ValidationErrors};
pub use quote::{QuoteDump, QuoteSchema, QuoteSummary};

/// JSON truthiness: `null`, `false`, zero, and empty strings, arrays and
/// objects count as "not provided".
pub fn is_falsy(value: &serde_json::Value) -> bool {
    use serde_json::Value;

    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}
