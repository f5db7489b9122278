//! Error types for the search sink repository.

mod metadata_error;
mod search_error;

pub use metadata_error::MetadataError;
pub use search_error::SearchError;
