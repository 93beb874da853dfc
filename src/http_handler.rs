//! Transport mapping for the bookmarks API.
//!
//! Each function runs one service operation and turns the outcome into an
//! [`ApiResponse`]: a status code plus an optional JSON body. Kept free of any
//! HTTP framework so the mapping can be tested directly; `server` only adapts
//! these responses to axum.

use serde_json::{json, Value};

use crate::services::BookmarkService;
use crate::types::bookmark::BookmarkCandidate;
use crate::types::errors::BookmarkError;

/// Path prefix of the bookmark collection.
pub const BOOKMARKS_PATH: &str = "/bookmarks";

/// Status, body and optional `Location` header of a reply.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Option<Value>,
    pub location: Option<String>,
}

impl ApiResponse {
    pub fn ok(body: Value) -> Self {
        Self { status: 200, body: Some(body), location: None }
    }

    pub fn created(body: Value, location: String) -> Self {
        Self { status: 201, body: Some(body), location: Some(location) }
    }

    pub fn no_content() -> Self {
        Self { status: 204, body: None, location: None }
    }

    /// Builds the `{"error": {"message": ...}}` reply for `err`.
    pub fn from_error(err: &BookmarkError) -> Self {
        Self {
            status: err.status_code(),
            body: Some(error_body(&err.public_message())),
            location: None,
        }
    }
}

/// The JSON error envelope.
pub fn error_body(message: &str) -> Value {
    json!({ "error": { "message": message } })
}

/// Parses a raw request body into JSON.
pub fn parse_body(raw: &[u8]) -> Result<Value, BookmarkError> {
    serde_json::from_slice(raw).map_err(|e| {
        tracing::warn!(error = %e, "rejected bookmark request: body is not JSON");
        BookmarkError::MalformedBody
    })
}

/// Reads bookmark fields out of a JSON object.
///
/// Unknown keys are ignored. A non-object body, or a field of the wrong JSON
/// type (e.g. a numeric title), is a malformed body.
pub fn parse_candidate(body: &Value) -> Result<BookmarkCandidate, BookmarkError> {
    if !body.is_object() {
        tracing::warn!(body = %body, "rejected bookmark request: body is not an object");
        return Err(BookmarkError::MalformedBody);
    }
    serde_json::from_value(body.clone()).map_err(|e| {
        tracing::warn!(error = %e, "rejected bookmark request: unexpected field type");
        BookmarkError::MalformedBody
    })
}

/// `GET /bookmarks`
pub async fn list_bookmarks(service: &BookmarkService) -> ApiResponse {
    match service.list().await {
        Ok(bookmarks) => ApiResponse::ok(json!(bookmarks)),
        Err(err) => ApiResponse::from_error(&err),
    }
}

/// `GET /bookmarks/:id`
pub async fn get_bookmark(service: &BookmarkService, id: &str) -> ApiResponse {
    match service.get(id).await {
        Ok(bookmark) => ApiResponse::ok(json!(bookmark)),
        Err(err) => ApiResponse::from_error(&err),
    }
}

/// `POST /bookmarks`
pub async fn create_bookmark(service: &BookmarkService, body: &Value) -> ApiResponse {
    let candidate = match parse_candidate(body) {
        Ok(candidate) => candidate,
        Err(err) => return ApiResponse::from_error(&err),
    };
    match service.create(&candidate).await {
        Ok(bookmark) => {
            let location = format!("{}/{}", BOOKMARKS_PATH, bookmark.id);
            ApiResponse::created(json!(bookmark), location)
        }
        Err(err) => ApiResponse::from_error(&err),
    }
}

/// `PATCH /bookmarks/:id`
pub async fn update_bookmark(service: &BookmarkService, id: &str, body: &Value) -> ApiResponse {
    let candidate = match parse_candidate(body) {
        Ok(candidate) => candidate,
        Err(err) => return ApiResponse::from_error(&err),
    };
    match service.update(id, &candidate).await {
        Ok(bookmark) => ApiResponse::ok(json!(bookmark)),
        Err(err) => ApiResponse::from_error(&err),
    }
}

/// `DELETE /bookmarks/:id`
pub async fn delete_bookmark(service: &BookmarkService, id: &str) -> ApiResponse {
    match service.delete(id).await {
        Ok(_) => ApiResponse::no_content(),
        Err(err) => ApiResponse::from_error(&err),
    }
}
