//! Bookmarks: a small JSON API over a single SQLite-backed bookmark table.
//!
//! Requests are validated, persisted through an injected repository and
//! serialized into a client-safe form. This library crate exposes all modules
//! for use by the binary and integration tests.

pub mod app;
pub mod config;
pub mod database;
pub mod http_handler;
pub mod repository;
pub mod server;
pub mod services;
pub mod types;
