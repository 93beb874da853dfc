//! Unit tests for the SQLite bookmark repository.
//!
//! These tests exercise the five persistence operations through the
//! `BookmarkRepository` trait, using an in-memory SQLite database.

use bookmarks::database::Database;
use bookmarks::repository::{BookmarkRepository, SqliteBookmarkRepository};
use bookmarks::types::bookmark::{BookmarkPatch, NewBookmark, StoredRating};
use bookmarks::types::errors::StorageError;
use tempfile::TempDir;

/// Helper: a repository backed by a fresh in-memory database.
fn setup() -> SqliteBookmarkRepository {
    let db = Database::open_in_memory().expect("Failed to open in-memory database");
    SqliteBookmarkRepository::new(db)
}

fn new_bookmark(title: &str, url: &str, rating: u8) -> NewBookmark {
    NewBookmark {
        title: title.to_string(),
        url: url.to_string(),
        description: None,
        rating,
    }
}

#[tokio::test]
async fn test_insert_returns_stored_row_with_id() {
    let repo = setup();
    let record = repo
        .insert(NewBookmark {
            description: Some("Docs".to_string()),
            ..new_bookmark("Rust", "https://rust-lang.org", 5)
        })
        .await
        .unwrap();

    assert!(!record.id.is_empty());
    assert!(uuid::Uuid::parse_str(&record.id).is_ok(), "id should be a UUID");
    assert_eq!(record.title, "Rust");
    assert_eq!(record.url, "https://rust-lang.org");
    assert_eq!(record.description.as_deref(), Some("Docs"));
    assert_eq!(record.rating, StoredRating::Integer(5));
}

#[tokio::test]
async fn test_insert_assigns_unique_ids() {
    let repo = setup();
    let a = repo.insert(new_bookmark("A", "https://a.io", 1)).await.unwrap();
    let b = repo.insert(new_bookmark("A", "https://a.io", 1)).await.unwrap();
    assert_ne!(a.id, b.id);
}

#[tokio::test]
async fn test_get_by_id_roundtrip() {
    let repo = setup();
    let inserted = repo.insert(new_bookmark("Example", "https://example.com", 3)).await.unwrap();

    let fetched = repo.get_by_id(&inserted.id).await.unwrap().expect("bookmark should exist");
    assert_eq!(fetched, inserted);
}

#[tokio::test]
async fn test_get_by_id_missing_returns_none() {
    let repo = setup();
    assert!(repo.get_by_id("does-not-exist").await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_all_returns_every_row() {
    let repo = setup();
    assert!(repo.list_all().await.unwrap().is_empty());

    repo.insert(new_bookmark("One", "https://one.io", 1)).await.unwrap();
    repo.insert(new_bookmark("Two", "https://two.io", 2)).await.unwrap();

    let mut titles: Vec<String> = repo.list_all().await.unwrap().into_iter().map(|b| b.title).collect();
    titles.sort();
    assert_eq!(titles, vec!["One", "Two"]);
}

#[tokio::test]
async fn test_update_overwrites_only_supplied_fields() {
    let repo = setup();
    let inserted = repo
        .insert(NewBookmark {
            description: Some("keep me".to_string()),
            ..new_bookmark("Old", "https://old.io", 1)
        })
        .await
        .unwrap();

    let affected = repo
        .update(
            &inserted.id,
            BookmarkPatch {
                title: Some("New".to_string()),
                rating: Some(4),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(affected, 1);

    let updated = repo.get_by_id(&inserted.id).await.unwrap().unwrap();
    assert_eq!(updated.title, "New");
    assert_eq!(updated.rating, StoredRating::Integer(4));
    assert_eq!(updated.url, "https://old.io");
    assert_eq!(updated.description.as_deref(), Some("keep me"));
}

#[tokio::test]
async fn test_update_every_field() {
    let repo = setup();
    let inserted = repo.insert(new_bookmark("Old", "https://old.io", 1)).await.unwrap();

    let patch = BookmarkPatch {
        title: Some("T".to_string()),
        url: Some("https://new.io".to_string()),
        description: Some("D".to_string()),
        rating: Some(0),
    };
    assert_eq!(repo.update(&inserted.id, patch).await.unwrap(), 1);

    let updated = repo.get_by_id(&inserted.id).await.unwrap().unwrap();
    assert_eq!(updated.title, "T");
    assert_eq!(updated.url, "https://new.io");
    assert_eq!(updated.description.as_deref(), Some("D"));
    assert_eq!(updated.rating, StoredRating::Integer(0));
}

#[tokio::test]
async fn test_update_missing_id_affects_nothing() {
    let repo = setup();
    let patch = BookmarkPatch { title: Some("X".to_string()), ..Default::default() };
    assert_eq!(repo.update("missing", patch).await.unwrap(), 0);
}

#[tokio::test]
async fn test_empty_patch_affects_nothing() {
    let repo = setup();
    let inserted = repo.insert(new_bookmark("Same", "https://same.io", 2)).await.unwrap();
    assert_eq!(repo.update(&inserted.id, BookmarkPatch::default()).await.unwrap(), 0);
    assert_eq!(repo.get_by_id(&inserted.id).await.unwrap().unwrap(), inserted);
}

#[tokio::test]
async fn test_remove_is_idempotent() {
    let repo = setup();
    let inserted = repo.insert(new_bookmark("Gone", "https://gone.io", 2)).await.unwrap();

    assert_eq!(repo.remove(&inserted.id).await.unwrap(), 1);
    assert_eq!(repo.remove(&inserted.id).await.unwrap(), 0);
    assert!(repo.get_by_id(&inserted.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_constraint_violation_surfaces_as_storage_error() {
    let repo = setup();
    // Bypasses validation on purpose: the store must still refuse the row.
    let result = repo.insert(new_bookmark("", "https://x.io", 3)).await;
    assert!(matches!(result, Err(StorageError::Database(_))));

    let result = repo.insert(new_bookmark("T", "https://x.io", 9)).await;
    assert!(matches!(result, Err(StorageError::Database(_))));
    assert!(repo.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_text_rating_is_read_back_as_stored() {
    let db = Database::open_in_memory().unwrap();
    db.connection()
        .execute(
            "INSERT INTO bookmarks (id, title, url, rating) VALUES ('legacy', 'Old', 'https://x.io', CAST('4' AS TEXT))",
            [],
        )
        .unwrap();
    let repo = SqliteBookmarkRepository::new(db);

    let record = repo.get_by_id("legacy").await.unwrap().unwrap();
    // INTEGER affinity converts well-formed numeric text on write.
    assert_eq!(record.rating, StoredRating::Integer(4));
}

#[tokio::test]
async fn test_data_persists_across_reopen() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("bookmarks.db");

    let id = {
        let repo = SqliteBookmarkRepository::new(Database::open(&path).unwrap());
        repo.insert(new_bookmark("Saved", "https://saved.io", 5)).await.unwrap().id
    };

    let repo = SqliteBookmarkRepository::new(Database::open(&path).unwrap());
    let record = repo.get_by_id(&id).await.unwrap().unwrap();
    assert_eq!(record.title, "Saved");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_inserts_all_persist() {
    let repo = setup();
    let mut handles = Vec::new();
    for i in 0..16u8 {
        let repo = repo.clone();
        handles.push(tokio::spawn(async move {
            repo.insert(new_bookmark(&format!("B{}", i), "https://c.io", i % 6)).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }
    assert_eq!(repo.list_all().await.unwrap().len(), 16);
}
