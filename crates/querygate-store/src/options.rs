use std::time::Duration;

/// Options that control how a store connects.
#[derive(Debug, Clone)]
pub struct StoreOptions {
    pub connection_string: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub create_if_missing: bool,
}

impl StoreOptions {
    pub fn new(connection_string: impl Into<String>) -> Self {
        Self {
            connection_string: connection_string.into(),
            ..Self::default()
        }
    }

    /// In-memory SQLite databases live only as long as their connection.
    pub fn is_in_memory(&self) -> bool {
        let conn = self.connection_string.as_str();
        conn.contains(":memory:") || conn.contains("mode=memory")
    }
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            connection_string: "sqlite://sample.db".to_string(),
            max_connections: 5,
            acquire_timeout: Duration::from_secs(10),
            create_if_missing: true,
        }
    }
}
