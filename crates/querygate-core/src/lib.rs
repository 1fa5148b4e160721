//! Core contracts and helpers for querygate.
//!
//! This crate holds the I/O-free half of the request pipeline: the schema
//! description handed to the generator, the sanitizer that turns generated
//! text into one candidate statement, the statement classifier, and the
//! read-only safety gate. Adapters and the engine build on these types.

pub mod classify;
pub mod error;
pub mod gate;
mod keywords;
pub mod prompt;
pub mod redaction;
pub mod sanitize;
pub mod schema;

pub use classify::{Classifier, KeywordClassifier, StatementCategory, classify};
pub use error::{Error, Result};
pub use gate::{GateRejection, check_select, is_safe_select};
pub use prompt::build_prompt;
pub use redaction::{RedactedConnection, redact_connection_string, redact_secrets};
pub use sanitize::sanitize;
pub use schema::{NO_TABLES, SchemaDescription, TableColumns};

/// Character that ends a single SQL statement.
pub const TERMINATOR: char = ';';

/// One result row: column name to value, in the column order the store reported.
pub type Row = serde_json::Map<String, serde_json::Value>;
