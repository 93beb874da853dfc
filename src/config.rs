//! Process configuration for the bookmarks server.
//!
//! Every option can be given as a flag or through the environment.

use std::net::SocketAddr;

use clap::Parser;

/// Default request body limit (64 KiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Debug, Clone, Parser)]
#[command(name = "bookmarks-server", version, about = "Serve the bookmarks JSON API")]
pub struct Config {
    /// Database connection string: a file path, `sqlite://<path>` or `:memory:`.
    #[arg(long = "db-url", env = "DB_URL", default_value = "sqlite://bookmarks.db")]
    pub database_url: String,

    /// Address the HTTP listener binds to.
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// Largest accepted request body, in bytes.
    #[arg(long, env = "MAX_BODY_BYTES", default_value_t = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,
}

impl Config {
    /// Configuration backed by a throwaway in-memory database on an ephemeral port.
    pub fn in_memory() -> Self {
        Self {
            database_url: crate::database::connection::IN_MEMORY.to_string(),
            bind: SocketAddr::from(([127, 0, 0, 1], 0)),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}
