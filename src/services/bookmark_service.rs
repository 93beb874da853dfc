//! Bookmark service.
//!
//! Composes validation, persistence and serialization for each operation.
//! The repository is injected at construction; the service holds no other state.

use std::sync::Arc;

use crate::repository::BookmarkRepository;
use crate::services::serializer;
use crate::services::validator;
use crate::types::bookmark::{BookmarkCandidate, BookmarkRecord, PublicBookmark};
use crate::types::errors::{BookmarkError, StorageError};

/// Entry point for all bookmark operations.
#[derive(Clone)]
pub struct BookmarkService {
    repository: Arc<dyn BookmarkRepository>,
}

impl BookmarkService {
    pub fn new(repository: Arc<dyn BookmarkRepository>) -> Self {
        Self { repository }
    }

    /// Lists every stored bookmark.
    pub async fn list(&self) -> Result<Vec<PublicBookmark>, BookmarkError> {
        let records = self.repository.list_all().await.map_err(storage_failure)?;
        serializer::serialize_all(&records)
    }

    /// Fetches one bookmark.
    pub async fn get(&self, id: &str) -> Result<PublicBookmark, BookmarkError> {
        let record = self.require_existing(id).await?;
        serializer::serialize(&record)
    }

    /// Looks up `id`, turning absence into `NotFound`.
    ///
    /// Used by every id-addressed operation that must report a missing record.
    pub async fn require_existing(&self, id: &str) -> Result<BookmarkRecord, BookmarkError> {
        match self.repository.get_by_id(id).await.map_err(storage_failure)? {
            Some(record) => Ok(record),
            None => {
                tracing::info!(id = %id, "bookmark not found");
                Err(BookmarkError::NotFound)
            }
        }
    }

    /// Validates and stores a new bookmark.
    pub async fn create(&self, candidate: &BookmarkCandidate) -> Result<PublicBookmark, BookmarkError> {
        let bookmark = validator::validate_create(candidate)?;
        let record = self.repository.insert(bookmark).await.map_err(storage_failure)?;
        tracing::info!(id = %record.id, "bookmark created");
        serializer::serialize(&record)
    }

    /// Validates and applies a partial update, returning the updated bookmark.
    ///
    /// Nothing is written when validation fails or the bookmark does not exist.
    pub async fn update(
        &self,
        id: &str,
        candidate: &BookmarkCandidate,
    ) -> Result<PublicBookmark, BookmarkError> {
        let patch = validator::validate_update(candidate)?;
        self.require_existing(id).await?;

        let affected = self.repository.update(id, patch).await.map_err(storage_failure)?;
        if affected == 0 {
            // Deleted between the lookup and the write.
            return Err(BookmarkError::NotFound);
        }
        tracing::info!(id = %id, "bookmark updated");

        let record = self.require_existing(id).await?;
        serializer::serialize(&record)
    }

    /// Deletes a bookmark. Deleting an unknown id is not an error.
    pub async fn delete(&self, id: &str) -> Result<usize, BookmarkError> {
        let removed = self.repository.remove(id).await.map_err(storage_failure)?;
        tracing::info!(id = %id, removed, "bookmark delete");
        Ok(removed)
    }
}

fn storage_failure(err: StorageError) -> BookmarkError {
    tracing::error!(error = %err, "bookmark storage failure");
    BookmarkError::Storage(err)
}
