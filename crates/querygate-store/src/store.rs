use async_trait::async_trait;

use querygate_core::{Result, Row, SchemaDescription};

/// Trait implemented by stores the pipeline can introspect and execute against.
///
/// Every call acquires a connection for its own duration only.
#[async_trait]
pub trait Store: Send + Sync {
    /// Returns the engine identifier (e.g. `sqlite`).
    fn engine(&self) -> &'static str;

    /// List every user table with its columns.
    async fn introspect(&self) -> Result<SchemaDescription>;

    /// Run a read statement and return its rows. Nothing the statement does persists.
    async fn fetch_rows(&self, sql: &str) -> Result<Vec<Row>>;

    /// Run a write statement as one atomic unit and return the affected row count.
    async fn execute(&self, sql: &str) -> Result<u64>;
}
