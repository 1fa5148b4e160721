use std::fmt;

use serde::{Deserialize, Serialize};

/// Rendered in place of an empty schema so prompts always carry a schema section.
pub const NO_TABLES: &str = "No tables found.";

/// Live table and column listing of a store.
///
/// Computed fresh for every request and never cached. Tables keep the order
/// the adapter reported them in, columns keep declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDescription {
    pub tables: Vec<TableColumns>,
}

/// A single table and its column names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableColumns {
    pub name: String,
    pub columns: Vec<String>,
}

impl TableColumns {
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }
}

impl SchemaDescription {
    pub fn new(tables: Vec<TableColumns>) -> Self {
        Self { tables }
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Look up a table by exact name.
    pub fn table(&self, name: &str) -> Option<&TableColumns> {
        self.tables.iter().find(|table| table.name == name)
    }

    /// Compact single-line form: `customers(id, name) | orders(id, amount)`.
    pub fn render(&self) -> String {
        if self.tables.is_empty() {
            return NO_TABLES.to_string();
        }
        self.tables
            .iter()
            .map(|table| format!("{}({})", table.name, table.columns.join(", ")))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

impl fmt::Display for SchemaDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
