//! Demo tables for trying the pipeline against a fresh database.

use querygate_core::Result;

use crate::store::Store;

pub const DEMO_SCHEMA_SQL: &str = include_str!("../fixtures/sqlite/001_demo_schema.sql");
pub const DEMO_DATA_SQL: &str = include_str!("../fixtures/sqlite/002_demo_data.sql");

/// How much of the demo data to install.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedMode {
    /// Create missing demo tables, leave existing rows alone.
    SchemaOnly,
    /// Create missing tables and replace customers/orders with the sample rows.
    WithSampleData,
}

/// Install the demo tables; returns the number of statements run.
pub async fn seed_demo<S: Store + ?Sized>(store: &S, mode: SeedMode) -> Result<usize> {
    let mut executed = run_script(store, DEMO_SCHEMA_SQL).await?;
    if mode == SeedMode::WithSampleData {
        executed += run_script(store, DEMO_DATA_SQL).await?;
    }
    tracing::info!(event = "demo_seeded", statements = executed, mode = ?mode);
    Ok(executed)
}

async fn run_script<S: Store + ?Sized>(store: &S, script: &str) -> Result<usize> {
    let mut executed = 0;
    for statement in split_statements(script) {
        store.execute(statement).await?;
        executed += 1;
    }
    Ok(executed)
}

fn split_statements(script: &str) -> impl Iterator<Item = &str> {
    script
        .split(querygate_core::TERMINATOR)
        .map(str::trim)
        .filter(|statement| !statement.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_scripts_split_into_statements() {
        assert_eq!(split_statements(DEMO_SCHEMA_SQL).count(), 4);
        assert_eq!(split_statements(DEMO_DATA_SQL).count(), 4);
        assert!(
            split_statements(DEMO_SCHEMA_SQL).all(|sql| sql.starts_with("CREATE TABLE IF NOT EXISTS"))
        );
    }
}
