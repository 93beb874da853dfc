// Bookmark types and error definitions

pub mod bookmark;
pub mod errors;
