use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Bookmark fields as supplied by a client. Nothing is trusted yet.
///
/// `rating` stays a raw JSON value so that `"3"` or `2.5` can be reported
/// as an invalid rating instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookmarkCandidate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub rating: Option<Value>,
}

/// A validated bookmark ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBookmark {
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub rating: u8,
}

/// A validated partial update. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookmarkPatch {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub rating: Option<u8>,
}

impl BookmarkPatch {
    /// Returns `true` when the patch would not change any column.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.url.is_none()
            && self.description.is_none()
            && self.rating.is_none()
    }
}

/// The rating column exactly as the store handed it back.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredRating {
    Integer(i64),
    Real(f64),
    Text(String),
}

/// A bookmark row as read from the `bookmarks` table.
#[derive(Debug, Clone, PartialEq)]
pub struct BookmarkRecord {
    pub id: String,
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub rating: StoredRating,
}

/// Client-safe representation returned over the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicBookmark {
    pub id: String,
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub rating: i64,
}
