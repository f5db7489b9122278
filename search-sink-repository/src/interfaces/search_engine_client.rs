//! Search engine client trait definition.
//!
//! This module defines the abstract interface for the index administration and
//! document calls the sink needs, allowing for different backend
//! implementations (OpenSearch, Elasticsearch, in-memory mocks).

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::SearchError;

/// Abstract interface for search engine operations.
///
/// The sink only ever touches a handful of named indices, so every call takes
/// the index name explicitly instead of binding the client to one index.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` to allow use across async tasks.
///
/// # Error Handling
///
/// All methods return `Result<T, SearchError>`; callers propagate failures
/// without retrying.
#[async_trait]
pub trait SearchEngineClient: Send + Sync {
    /// Check whether an index exists.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The index exists
    /// * `Ok(false)` - The index does not exist
    /// * `Err(SearchError)` - If the check could not be performed
    async fn index_exists(&self, index: &str) -> Result<bool, SearchError>;

    /// Fetch the field mapping of an index.
    ///
    /// Returns the `mappings` object of the index, which is an empty object
    /// when the index was auto-created without mappings.
    async fn get_mapping(&self, index: &str) -> Result<Value, SearchError>;

    /// Apply a mapping update (`{"properties": {...}}`) to an existing index.
    async fn put_mapping(&self, index: &str, body: &Value) -> Result<(), SearchError>;

    /// Create an index from a full settings + mappings body.
    async fn create_index(&self, index: &str, body: &Value) -> Result<(), SearchError>;

    /// Index a document under an explicit ID.
    ///
    /// If a document with the same ID already exists, it is replaced.
    ///
    /// # Arguments
    ///
    /// * `index` - Target index name
    /// * `id` - Document ID
    /// * `document` - The JSON document body
    async fn index_document(
        &self,
        index: &str,
        id: &str,
        document: &Value,
    ) -> Result<(), SearchError>;

    /// Signal that no further requests will be sent.
    ///
    /// Pooled connections are released when the last handle to the client is
    /// dropped, which the caller does after this returns. The default
    /// implementation has nothing to flush.
    async fn close(&self) -> Result<(), SearchError> {
        Ok(())
    }
}
