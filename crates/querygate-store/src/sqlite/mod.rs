use std::str::FromStr;

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use querygate_core::{Error, Result, Row, SchemaDescription, TableColumns, redact_connection_string};

use crate::options::StoreOptions;
use crate::store::Store;

mod queries;
mod rows;

/// Store backed by a SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Create a store using a pre-configured pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a pool for the connection string in `opts`.
    pub async fn connect(opts: &StoreOptions) -> Result<Self> {
        let conn = opts.connection_string.as_str();
        if !conn.starts_with("sqlite:") {
            return Err(Error::Unsupported(format!(
                "connection string {}",
                redact_connection_string(conn).redacted
            )));
        }

        let connect_options = SqliteConnectOptions::from_str(conn)
            .map_err(db_error)?
            .create_if_missing(opts.create_if_missing);

        let pool_options = SqlitePoolOptions::new().acquire_timeout(opts.acquire_timeout);
        let pool_options = if opts.is_in_memory() {
            pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            pool_options.max_connections(opts.max_connections)
        };

        let pool = pool_options
            .connect_with(connect_options)
            .await
            .map_err(db_error)?;
        Ok(Self { pool })
    }

    /// In-memory database for tests and dry runs.
    pub async fn in_memory() -> Result<Self> {
        Self::connect(&StoreOptions::new("sqlite::memory:")).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl Store for SqliteStore {
    fn engine(&self) -> &'static str {
        "sqlite"
    }

    async fn introspect(&self) -> Result<SchemaDescription> {
        let mut conn = self.pool.acquire().await.map_err(db_error)?;

        let mut tables = Vec::new();
        for name in queries::list_tables(&mut *conn).await? {
            let columns = queries::list_columns(&mut *conn, &name).await?;
            tables.push(TableColumns::new(name, columns));
        }

        Ok(SchemaDescription::new(tables))
    }

    async fn fetch_rows(&self, sql: &str) -> Result<Vec<Row>> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;
        let fetched = sqlx::query(sql).persistent(false).fetch_all(&mut *tx).await;
        tx.rollback().await.map_err(db_error)?;

        let rows = fetched.map_err(db_error)?;
        tracing::debug!(event = "rows_fetched", count = rows.len());
        rows.iter().map(rows::decode_row).collect()
    }

    async fn execute(&self, sql: &str) -> Result<u64> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;
        let done = sqlx::query(sql)
            .persistent(false)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;
        tx.commit().await.map_err(db_error)?;

        tracing::debug!(event = "statement_committed", rows_affected = done.rows_affected());
        Ok(done.rows_affected())
    }
}

pub(crate) fn db_error(err: sqlx::Error) -> Error {
    match err {
        sqlx::Error::Database(db) => Error::Db(db.message().to_string()),
        other => Error::Db(other.to_string()),
    }
}
