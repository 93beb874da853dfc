//! Unit tests for the bookmarks database layer (connection + migrations).

use bookmarks::database::migrations::{get_schema_version, run_all, CURRENT_SCHEMA_VERSION};
use bookmarks::database::Database;
use bookmarks::types::errors::ConfigError;
use tempfile::TempDir;

#[test]
fn test_open_in_memory_succeeds() {
    let db = Database::open_in_memory();
    assert!(db.is_ok(), "open_in_memory should succeed");
}

#[test]
fn test_migrations_create_bookmarks_table() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    let conn = db.connection();

    let mut stmt = conn.prepare("PRAGMA table_info(bookmarks)").unwrap();
    let columns: Vec<String> = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .unwrap()
        .map(|c| c.unwrap())
        .collect();

    assert_eq!(columns, vec!["id", "title", "url", "description", "rating"]);
}

#[test]
fn test_schema_version_recorded() {
    let db = Database::open_in_memory().unwrap();
    assert_eq!(get_schema_version(db.connection()).unwrap(), CURRENT_SCHEMA_VERSION);
}

#[test]
fn test_migrations_are_idempotent() {
    let db = Database::open_in_memory().unwrap();
    run_all(db.connection()).expect("second run should be a no-op");
    run_all(db.connection()).expect("third run should be a no-op");

    let versions: i64 = db
        .connection()
        .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(versions, 1);
}

#[test]
fn test_rating_check_constraint_rejects_out_of_range() {
    let db = Database::open_in_memory().unwrap();
    let result = db.connection().execute(
        "INSERT INTO bookmarks (id, title, url, rating) VALUES ('a', 'T', 'https://x.io', 9)",
        [],
    );
    assert!(result.is_err(), "rating 9 must violate the CHECK constraint");
}

#[test]
fn test_not_null_constraint_rejects_missing_title() {
    let db = Database::open_in_memory().unwrap();
    let result = db.connection().execute(
        "INSERT INTO bookmarks (id, url, rating) VALUES ('a', 'https://x.io', 3)",
        [],
    );
    assert!(result.is_err());
}

#[test]
fn test_connect_accepts_memory_and_sqlite_urls() {
    assert!(Database::connect(":memory:").is_ok());

    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("bookmarks.db");
    let url = format!("sqlite://{}", path.display());
    assert!(Database::connect(&url).is_ok());
    assert!(path.exists(), "database file should be created");

    // A plain path works too and reopens the same file.
    assert!(Database::connect(path.to_str().unwrap()).is_ok());
}

#[test]
fn test_connect_rejects_unsupported_urls() {
    assert!(matches!(
        Database::connect("postgres://localhost/bookmarks"),
        Err(ConfigError::InvalidDatabaseUrl(_))
    ));
    assert!(matches!(Database::connect("  "), Err(ConfigError::InvalidDatabaseUrl(_))));
    assert!(matches!(Database::connect("sqlite://"), Err(ConfigError::InvalidDatabaseUrl(_))));
}
