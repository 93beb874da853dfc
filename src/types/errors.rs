use std::fmt;

use thiserror::Error;

/// A required bookmark field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Url,
    Rating,
}

impl Field {
    /// Column name as it appears in requests and in the table.
    pub fn name(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Url => "url",
            Field::Rating => "rating",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Title => write!(f, "Title"),
            Field::Url => write!(f, "URL"),
            Field::Rating => write!(f, "Rating"),
        }
    }
}

// === StorageError ===

/// Failures raised by the persistence layer.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The database rejected or failed a statement.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    /// The blocking task running the statement panicked or was cancelled.
    #[error("storage task failed: {0}")]
    Task(String),
    /// A previous statement panicked while holding the connection.
    #[error("database connection lock poisoned")]
    Poisoned,
    /// A stored row could not be interpreted.
    #[error("corrupt bookmark record: {0}")]
    Corrupt(String),
}

// === BookmarkError ===

/// Every way a bookmark operation can fail, as seen by the transport layer.
#[derive(Debug, Error)]
pub enum BookmarkError {
    /// A required field was absent, null or empty.
    #[error("{0} is required")]
    MissingField(Field),
    /// The rating was not an integer between 0 and 5.
    #[error("'rating' must be an integer between 0 and 5")]
    InvalidRating,
    /// The url was not an http(s) URL with a host.
    #[error("'url' must be a valid http or https URL")]
    InvalidUrl,
    /// A partial update that sets nothing.
    #[error("Request body must contain either 'title', 'url', 'description' or 'rating'")]
    EmptyUpdate,
    /// The request body was not a JSON object of the expected shape.
    #[error("Request body must be a JSON object")]
    MalformedBody,
    /// No bookmark with the requested id.
    #[error("Bookmark doesn't exist")]
    NotFound,
    /// The store failed; details stay server-side.
    #[error("storage failure: {0}")]
    Storage(#[from] StorageError),
}

impl BookmarkError {
    /// HTTP status class for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            BookmarkError::MissingField(_)
            | BookmarkError::InvalidRating
            | BookmarkError::InvalidUrl
            | BookmarkError::EmptyUpdate
            | BookmarkError::MalformedBody => 400,
            BookmarkError::NotFound => 404,
            BookmarkError::Storage(_) => 500,
        }
    }

    /// Message safe to hand to a client. Storage details are never included.
    pub fn public_message(&self) -> String {
        match self {
            BookmarkError::Storage(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }

    /// Returns `true` for errors caused by caller input.
    pub fn is_validation(&self) -> bool {
        self.status_code() == 400
    }
}

// === ConfigError ===

/// Errors raised while turning configuration into live resources.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The connection string was empty or used an unsupported scheme.
    #[error("invalid database url: {0}")]
    InvalidDatabaseUrl(String),
    /// The database could not be opened or migrated.
    #[error("failed to open database: {0}")]
    Open(#[from] rusqlite::Error),
    /// The listener could not be bound or the server stopped with an error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}
