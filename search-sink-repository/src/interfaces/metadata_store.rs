//! Metadata store trait definition.
//!
//! This module defines the lookups the document builders perform to resolve
//! foreign references (owning database, owning service, dashboard charts).

use async_trait::async_trait;
use futures::future::try_join_all;
use uuid::Uuid;

use crate::errors::MetadataError;
use search_sink_shared::{Chart, Database, Service, ServiceKind};

/// Abstracts the metadata server the records were ingested from.
///
/// Implementations are injected into the document processor, so tests can
/// substitute an in-memory store.
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Fetch a database by ID.
    ///
    /// # Returns
    ///
    /// * `Ok(Database)` - The database, including its service reference
    /// * `Err(MetadataError::NotFound)` - If no database has this ID
    /// * `Err(MetadataError)` - If the lookup fails
    async fn get_database(&self, id: &Uuid) -> Result<Database, MetadataError>;

    /// Fetch a service of the given family by ID.
    async fn get_service(&self, kind: ServiceKind, id: &Uuid) -> Result<Service, MetadataError>;

    /// Fetch a chart by ID, including its tags.
    async fn get_chart(&self, id: &Uuid) -> Result<Chart, MetadataError>;

    /// Fetch several charts, returned in the same order as `ids`.
    ///
    /// The default implementation issues the single-chart lookups
    /// concurrently and fails on the first error.
    async fn get_charts(&self, ids: &[Uuid]) -> Result<Vec<Chart>, MetadataError> {
        try_join_all(ids.iter().map(|id| self.get_chart(id))).await
    }
}
