use sqlx::SqliteConnection;

use querygate_core::Result;

use super::db_error;

/// User tables ordered by name, skipping SQLite's own `sqlite_*` tables.
pub async fn list_tables(conn: &mut SqliteConnection) -> Result<Vec<String>> {
    sqlx::query_scalar::<_, String>(
        r#"
        select name
        from sqlite_master
        where type = 'table'
          and name not like 'sqlite~_%' escape '~'
        order by name
        "#,
    )
    .fetch_all(&mut *conn)
    .await
    .map_err(db_error)
}

/// Column names in declaration order.
pub async fn list_columns(conn: &mut SqliteConnection, table: &str) -> Result<Vec<String>> {
    sqlx::query_scalar::<_, String>("select name from pragma_table_info(?1) order by cid")
        .bind(table)
        .fetch_all(&mut *conn)
        .await
        .map_err(db_error)
}
