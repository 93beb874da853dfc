//! Shapes stored bookmark rows into the client-facing representation.
//!
//! `title` and `description` are user-supplied and may be rendered as HTML by
//! clients, so markup characters are escaped. `url` is passed through as
//! stored; it was checked for well-formedness when written.

use crate::types::bookmark::{BookmarkRecord, PublicBookmark, StoredRating};
use crate::types::errors::{BookmarkError, StorageError};

/// Converts a stored record into a `PublicBookmark`.
///
/// # Errors
/// Returns a storage error if the rating cannot be read as a number.
pub fn serialize(record: &BookmarkRecord) -> Result<PublicBookmark, BookmarkError> {
    let rating = coerce_rating(&record.rating).map_err(|err| {
        tracing::error!(id = %record.id, error = %err, "unreadable bookmark rating");
        BookmarkError::Storage(err)
    })?;

    Ok(PublicBookmark {
        id: record.id.clone(),
        title: escape_html(&record.title),
        url: record.url.clone(),
        description: record.description.as_deref().map(escape_html),
        rating,
    })
}

/// Serializes every record, stopping at the first unreadable one.
pub fn serialize_all(records: &[BookmarkRecord]) -> Result<Vec<PublicBookmark>, BookmarkError> {
    records.iter().map(serialize).collect()
}

/// Normalizes whatever storage class the rating came back as into an integer.
///
/// Only whole values are accepted; `4.7` is reported as corrupt, not rounded.
pub fn coerce_rating(rating: &StoredRating) -> Result<i64, StorageError> {
    match rating {
        StoredRating::Integer(n) => Ok(*n),
        StoredRating::Real(n) => whole_number(*n)
            .ok_or_else(|| StorageError::Corrupt(format!("non-integral rating {}", n))),
        StoredRating::Text(text) => {
            let text = text.trim();
            if let Ok(n) = text.parse::<i64>() {
                return Ok(n);
            }
            text.parse::<f64>()
                .ok()
                .and_then(whole_number)
                .ok_or_else(|| StorageError::Corrupt(format!("non-integral rating '{}'", text)))
        }
    }
}

fn whole_number(n: f64) -> Option<i64> {
    (n.is_finite() && n.fract() == 0.0).then_some(n as i64)
}

/// Escapes the characters that let text break out into markup.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
