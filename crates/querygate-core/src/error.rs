use thiserror::Error;

/// Core error type shared across querygate crates.
#[derive(Debug, Error)]
pub enum Error {
    /// Database error or adapter failure, carrying the store's own text.
    #[error("database error: {0}")]
    Db(String),
    /// A connection string or engine that this build can not talk to.
    #[error("unsupported: {0}")]
    Unsupported(String),
    /// Invalid runtime configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Convenience alias for results returned by querygate crates.
pub type Result<T> = std::result::Result<T, Error>;
