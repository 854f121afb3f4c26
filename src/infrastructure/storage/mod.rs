//! Storage infrastructure - SQLite connection handling

mod sqlite;

pub use sqlite::{connect, ensure_schema, SqliteConfig, IN_MEMORY_PATH};
