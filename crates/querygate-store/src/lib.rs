//! Store adapters: schema introspection and statement execution.

pub mod fixtures;
pub mod options;
pub mod sqlite;
pub mod store;

pub use fixtures::{SeedMode, seed_demo};
pub use options::StoreOptions;
pub use sqlite::SqliteStore;
pub use store::Store;

pub use querygate_core::{Row, SchemaDescription};
