// Bookmark services
// Validation, serialization and the service that composes them with the repository.

pub mod bookmark_service;
pub mod serializer;
pub mod validator;

pub use bookmark_service::BookmarkService;
