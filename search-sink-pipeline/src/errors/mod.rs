//! Error types for the search sink pipeline.

use search_sink_repository::{MetadataError, SearchError};
use thiserror::Error;

/// Errors that can occur while building or writing a document.
///
/// Failures from either downstream client are wrapped unchanged; the sink
/// performs no recovery of its own.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Error from the search engine.
    #[error("Search error: {0}")]
    SearchError(#[from] SearchError),

    /// Error resolving a reference against the metadata store.
    #[error("Metadata error: {0}")]
    MetadataError(#[from] MetadataError),

    /// Error from the loader component.
    #[error("Loader error: {0}")]
    LoaderError(String),
}

impl PipelineError {
    /// Create a loader error.
    pub fn loader(msg: impl Into<String>) -> Self {
        Self::LoaderError(msg.into())
    }
}
