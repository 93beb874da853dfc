//! Bookmark validation.
//!
//! Checks caller-supplied fields before anything reaches the repository.
//! Rules are applied in a fixed order (presence, rating, url) and the first
//! violation is returned. Every rejection is logged with the offending value;
//! the returned error only carries a human-readable message.

use serde_json::Value;
use url::Url;

use crate::types::bookmark::{BookmarkCandidate, BookmarkPatch, NewBookmark};
use crate::types::errors::{BookmarkError, Field};

/// Highest accepted rating.
pub const MAX_RATING: i64 = 5;

/// Which operation the candidate is destined for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// Every required field must be present.
    Create,
    /// Fields may be omitted, but supplied ones must be valid.
    Update,
}

/// Validates `candidate` for the given operation.
///
/// `Ok(())` means no rule was violated.
pub fn validate(candidate: &BookmarkCandidate, mode: ValidationMode) -> Result<(), BookmarkError> {
    match mode {
        ValidationMode::Create => {
            require_text(Field::Title, candidate.title.as_deref())?;
            require_text(Field::Url, candidate.url.as_deref())?;
            if candidate.rating.as_ref().map_or(true, is_blank_rating) {
                return Err(reject_missing(Field::Rating));
            }
        }
        ValidationMode::Update => {
            if is_empty_update(candidate) {
                tracing::warn!("rejected bookmark update: no fields supplied");
                return Err(BookmarkError::EmptyUpdate);
            }
            if let Some(title) = candidate.title.as_deref() {
                require_text(Field::Title, Some(title))?;
            }
            if let Some(url) = candidate.url.as_deref() {
                require_text(Field::Url, Some(url))?;
            }
            if candidate.rating.as_ref().is_some_and(is_blank_rating) {
                return Err(reject_missing(Field::Rating));
            }
        }
    }

    if let Some(rating) = candidate.rating.as_ref() {
        parse_rating(rating)?;
    }
    if let Some(url) = candidate.url.as_deref() {
        check_url(url)?;
    }
    Ok(())
}

/// Validates a create request and returns the insertable bookmark.
pub fn validate_create(candidate: &BookmarkCandidate) -> Result<NewBookmark, BookmarkError> {
    validate(candidate, ValidationMode::Create)?;

    let title = candidate
        .title
        .clone()
        .ok_or(BookmarkError::MissingField(Field::Title))?;
    let url = candidate
        .url
        .clone()
        .ok_or(BookmarkError::MissingField(Field::Url))?;
    let rating = candidate
        .rating
        .as_ref()
        .ok_or(BookmarkError::MissingField(Field::Rating))
        .and_then(parse_rating)?;

    Ok(NewBookmark {
        title,
        url,
        description: candidate.description.clone(),
        rating,
    })
}

/// Validates a partial update and returns the columns to overwrite.
pub fn validate_update(candidate: &BookmarkCandidate) -> Result<BookmarkPatch, BookmarkError> {
    validate(candidate, ValidationMode::Update)?;

    let rating = match candidate.rating.as_ref() {
        Some(value) => Some(parse_rating(value)?),
        None => None,
    };

    Ok(BookmarkPatch {
        title: candidate.title.clone(),
        url: candidate.url.clone(),
        description: candidate.description.clone(),
        rating,
    })
}

/// Accepts JSON integers in `0..=5`. Floats, strings and booleans are refused.
pub fn parse_rating(value: &Value) -> Result<u8, BookmarkError> {
    match value.as_i64() {
        Some(n) if (0..=MAX_RATING).contains(&n) => Ok(n as u8),
        _ => {
            tracing::warn!(field = "rating", value = %value, "rejected bookmark: rating out of range");
            Err(BookmarkError::InvalidRating)
        }
    }
}

/// Accepts absolute `http`/`https` URLs that name a host.
///
/// The parser repairs a lot of sloppy input (surrounding spaces, tabs, a
/// missing `//`, backslashes, unencoded quotes). The value is stored exactly
/// as given, so it must already be in the parser's serialized form; the only
/// difference tolerated is the root `/` the parser appends to a bare host.
pub fn check_url(raw: &str) -> Result<(), BookmarkError> {
    let well_formed = Url::parse(raw)
        .map(|parsed| {
            matches!(parsed.scheme(), "http" | "https")
                && parsed.host_str().is_some_and(|host| !host.is_empty())
                && is_serialized_form(raw, parsed.as_str())
        })
        .unwrap_or(false);

    if well_formed {
        Ok(())
    } else {
        tracing::warn!(field = "url", value = %raw, "rejected bookmark: malformed url");
        Err(BookmarkError::InvalidUrl)
    }
}

fn is_serialized_form(raw: &str, serialized: &str) -> bool {
    raw == serialized || serialized.strip_suffix('/') == Some(raw)
}

/// `null` and blank strings count as an absent rating.
fn is_blank_rating(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.trim().is_empty(),
        _ => false,
    }
}

fn require_text(field: Field, value: Option<&str>) -> Result<(), BookmarkError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(()),
        Some(text) => {
            tracing::warn!(field = field.name(), value = ?text, "rejected bookmark: blank field");
            Err(BookmarkError::MissingField(field))
        }
        None => Err(reject_missing(field)),
    }
}

fn reject_missing(field: Field) -> BookmarkError {
    tracing::warn!(field = field.name(), "rejected bookmark: required field missing");
    BookmarkError::MissingField(field)
}

fn is_empty_update(candidate: &BookmarkCandidate) -> bool {
    candidate.title.is_none()
        && candidate.url.is_none()
        && candidate.description.is_none()
        && candidate.rating.is_none()
}
