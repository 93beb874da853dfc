// Persistence for bookmarks: the repository trait and its SQLite implementation.

pub mod bookmark_repository;

pub use bookmark_repository::{BookmarkRepository, SqliteBookmarkRepository};
