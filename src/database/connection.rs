//! SQLite connection management for the bookmarks store.
//!
//! Provides the [`Database`] struct that wraps a `rusqlite::Connection`
//! and runs schema migrations on open.

use rusqlite::Connection;
use std::path::Path;

use super::migrations;
use crate::types::errors::ConfigError;

/// Connection string value that selects a throwaway in-memory database.
pub const IN_MEMORY: &str = ":memory:";

/// Owns the SQLite connection for the bookmarks table.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (or creates) a SQLite database at the given file path and runs migrations.
    ///
    /// # Errors
    /// Returns `rusqlite::Error` if the connection cannot be established or migrations fail.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, rusqlite::Error> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.run_migrations()?;
        Ok(db)
    }

    /// Opens an in-memory SQLite database and runs migrations.
    ///
    /// The data is discarded when the `Database` is dropped.
    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.run_migrations()?;
        Ok(db)
    }

    /// Opens the database named by a connection string.
    ///
    /// Accepts a plain file path, `sqlite://<path>`, or `:memory:`.
    pub fn connect(database_url: &str) -> Result<Self, ConfigError> {
        let target = database_url.trim();
        let target = target.strip_prefix("sqlite://").unwrap_or(target);
        if target.is_empty() {
            return Err(ConfigError::InvalidDatabaseUrl(database_url.to_string()));
        }
        if target.contains("://") {
            return Err(ConfigError::InvalidDatabaseUrl(format!(
                "unsupported scheme in '{}'",
                database_url
            )));
        }

        let db = if target == IN_MEMORY {
            Self::open_in_memory()?
        } else {
            Self::open(target)?
        };
        tracing::info!(database = %target, "bookmark database ready");
        Ok(db)
    }

    fn run_migrations(&self) -> Result<(), rusqlite::Error> {
        migrations::run_all(&self.conn)
    }

    /// Returns a reference to the underlying `rusqlite::Connection`.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
