//! Bookmark repository.
//!
//! Defines `BookmarkRepository`, the five persistence operations the service
//! relies on, and `SqliteBookmarkRepository`, which runs them against the
//! `bookmarks` table via `rusqlite`.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::types::{Value, ValueRef};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use uuid::Uuid;

use crate::database::Database;
use crate::types::bookmark::{BookmarkPatch, BookmarkRecord, NewBookmark, StoredRating};
use crate::types::errors::StorageError;

const SELECT_COLUMNS: &str = "SELECT id, title, url, description, rating FROM bookmarks";

/// Persistence operations for bookmarks. No validation happens here.
#[async_trait]
pub trait BookmarkRepository: Send + Sync {
    /// Every stored bookmark, in whatever order the store returns them.
    async fn list_all(&self) -> Result<Vec<BookmarkRecord>, StorageError>;
    /// The bookmark with `id`, or `None` if there is no such row.
    async fn get_by_id(&self, id: &str) -> Result<Option<BookmarkRecord>, StorageError>;
    /// Stores a bookmark under a freshly assigned id and returns the stored row.
    async fn insert(&self, bookmark: NewBookmark) -> Result<BookmarkRecord, StorageError>;
    /// Overwrites the supplied columns. Returns the number of rows changed.
    async fn update(&self, id: &str, patch: BookmarkPatch) -> Result<usize, StorageError>;
    /// Deletes the bookmark. Returns the number of rows removed (0 if absent).
    async fn remove(&self, id: &str) -> Result<usize, StorageError>;
}

/// Bookmark repository backed by a SQLite connection.
///
/// Statements run on tokio's blocking pool; the connection is shared behind a
/// mutex so one statement executes at a time.
#[derive(Clone)]
pub struct SqliteBookmarkRepository {
    db: Arc<Mutex<Database>>,
}

impl SqliteBookmarkRepository {
    /// Creates a repository that takes ownership of `db`.
    pub fn new(db: Database) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
        }
    }

    /// Runs `f` with the connection on the blocking pool.
    async fn with_connection<T, F>(&self, f: F) -> Result<T, StorageError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || {
            let guard = db.lock().map_err(|_| StorageError::Poisoned)?;
            f(guard.connection()).map_err(StorageError::from)
        })
        .await
        .map_err(|e| StorageError::Task(e.to_string()))?
    }

    /// Reads a single `bookmarks` row into a record.
    fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<BookmarkRecord> {
        let rating = match row.get_ref(4)? {
            ValueRef::Integer(n) => StoredRating::Integer(n),
            ValueRef::Real(n) => StoredRating::Real(n),
            ValueRef::Text(bytes) => StoredRating::Text(String::from_utf8_lossy(bytes).into_owned()),
            other => {
                return Err(rusqlite::Error::InvalidColumnType(
                    4,
                    "rating".to_string(),
                    other.data_type(),
                ))
            }
        };

        Ok(BookmarkRecord {
            id: row.get(0)?,
            title: row.get(1)?,
            url: row.get(2)?,
            description: row.get(3)?,
            rating,
        })
    }
}

#[async_trait]
impl BookmarkRepository for SqliteBookmarkRepository {
    async fn list_all(&self) -> Result<Vec<BookmarkRecord>, StorageError> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare(SELECT_COLUMNS)?;
            let rows = stmt.query_map([], Self::row_to_record)?;
            let records = rows.collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(records)
        })
        .await
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<BookmarkRecord>, StorageError> {
        let id = id.to_string();
        self.with_connection(move |conn| {
            conn.query_row(
                &format!("{} WHERE id = ?1", SELECT_COLUMNS),
                params![id],
                Self::row_to_record,
            )
            .optional()
        })
        .await
    }

    async fn insert(&self, bookmark: NewBookmark) -> Result<BookmarkRecord, StorageError> {
        let id = Uuid::new_v4().to_string();
        let record = self
            .with_connection(move |conn| {
                conn.query_row(
                    "INSERT INTO bookmarks (id, title, url, description, rating) \
                     VALUES (?1, ?2, ?3, ?4, ?5) \
                     RETURNING id, title, url, description, rating",
                    params![
                        id,
                        bookmark.title,
                        bookmark.url,
                        bookmark.description,
                        bookmark.rating
                    ],
                    Self::row_to_record,
                )
            })
            .await?;
        tracing::debug!(id = %record.id, "inserted bookmark");
        Ok(record)
    }

    async fn update(&self, id: &str, patch: BookmarkPatch) -> Result<usize, StorageError> {
        if patch.is_empty() {
            return Ok(0);
        }

        let id = id.to_string();
        self.with_connection(move |conn| {
            // Column names come from this fixed list, values are always bound.
            let mut columns: Vec<&str> = Vec::with_capacity(4);
            let mut values: Vec<Value> = Vec::with_capacity(5);
            if let Some(title) = patch.title {
                columns.push("title");
                values.push(Value::Text(title));
            }
            if let Some(url) = patch.url {
                columns.push("url");
                values.push(Value::Text(url));
            }
            if let Some(description) = patch.description {
                columns.push("description");
                values.push(Value::Text(description));
            }
            if let Some(rating) = patch.rating {
                columns.push("rating");
                values.push(Value::Integer(i64::from(rating)));
            }

            let assignments = columns
                .iter()
                .enumerate()
                .map(|(i, column)| format!("{} = ?{}", column, i + 1))
                .collect::<Vec<_>>()
                .join(", ");
            values.push(Value::Text(id));
            let sql = format!(
                "UPDATE bookmarks SET {} WHERE id = ?{}",
                assignments,
                values.len()
            );
            conn.execute(&sql, params_from_iter(values))
        })
        .await
    }

    async fn remove(&self, id: &str) -> Result<usize, StorageError> {
        let id = id.to_string();
        self.with_connection(move |conn| conn.execute("DELETE FROM bookmarks WHERE id = ?1", params![id]))
            .await
    }
}
