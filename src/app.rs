//! Application bootstrap.
//!
//! Opens the database named by the configuration and wires the repository
//! into the bookmark service.

use std::sync::Arc;

use crate::config::Config;
use crate::database::Database;
use crate::repository::SqliteBookmarkRepository;
use crate::services::BookmarkService;
use crate::types::errors::ConfigError;

/// Everything the server needs to start handling requests.
pub struct App {
    pub config: Config,
    pub service: BookmarkService,
}

impl App {
    /// Opens the database and builds the service stack.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        let db = Database::connect(&config.database_url)?;
        let repository = Arc::new(SqliteBookmarkRepository::new(db));
        let service = BookmarkService::new(repository);
        Ok(Self { config, service })
    }
}
