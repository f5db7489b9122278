//! Loader module for the search sink pipeline.
//!
//! Bootstraps the search indices and writes processed documents into them.

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

use crate::errors::PipelineError;
use search_sink_repository::opensearch::index_config;
use search_sink_repository::{SearchEngineClient, SearchError};
use search_sink_shared::{EntityKind, SearchDocument};

/// Target index of one entity kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexTarget {
    pub name: String,
    pub enabled: bool,
}

impl IndexTarget {
    pub fn new(name: impl Into<String>, enabled: bool) -> Self {
        Self {
            name: name.into(),
            enabled,
        }
    }
}

/// Index name and enablement for each of the four entity kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexTargets {
    pub table: IndexTarget,
    pub topic: IndexTarget,
    pub dashboard: IndexTarget,
    pub pipeline: IndexTarget,
}

impl Default for IndexTargets {
    fn default() -> Self {
        let target = |kind: EntityKind| IndexTarget::new(kind.default_index_name(), true);
        Self {
            table: target(EntityKind::Table),
            topic: target(EntityKind::Topic),
            dashboard: target(EntityKind::Dashboard),
            pipeline: target(EntityKind::Pipeline),
        }
    }
}

impl IndexTargets {
    pub fn get(&self, kind: EntityKind) -> &IndexTarget {
        match kind {
            EntityKind::Table => &self.table,
            EntityKind::Topic => &self.topic,
            EntityKind::Dashboard => &self.dashboard,
            EntityKind::Pipeline => &self.pipeline,
        }
    }
}

/// What index bootstrap did to a single index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexBootstrap {
    /// The index did not exist and was created with settings and mappings.
    Created,
    /// The index existed without field mappings; the properties were applied.
    MappingPatched,
    /// The index existed with mappings and was left alone.
    Unchanged,
}

/// Loader that writes documents into the search engine.
///
/// The loader is responsible for:
/// - Creating or patching the enabled indices before the first write
/// - Routing each document to the index of its kind
/// - Upserting by entity ID so re-sending a record replaces its document
pub struct SearchLoader {
    client: Arc<dyn SearchEngineClient>,
    targets: IndexTargets,
}

impl SearchLoader {
    /// Create a new search loader with the given client and index targets.
    pub fn new(client: Arc<dyn SearchEngineClient>, targets: IndexTargets) -> Self {
        Self { client, targets }
    }

    pub fn is_enabled(&self, kind: EntityKind) -> bool {
        self.targets.get(kind).enabled
    }

    /// Bootstrap every enabled index in `EntityKind::ALL` order.
    ///
    /// Stops at the first failure; indices already handled stay as they are.
    #[instrument(skip(self))]
    pub async fn ensure_indices(&self) -> Result<Vec<(EntityKind, IndexBootstrap)>, PipelineError> {
        let mut outcomes = Vec::new();

        for kind in EntityKind::ALL {
            let target = self.targets.get(kind);
            if !target.enabled {
                debug!(kind = %kind, "Index disabled, skipping bootstrap");
                continue;
            }

            let template = index_config::parse_template(index_config::mapping_template(kind))?;
            let outcome = self.ensure_index(&target.name, &template).await?;
            outcomes.push((kind, outcome));
        }

        Ok(outcomes)
    }

    /// Ensure one index exists with field mappings.
    ///
    /// A missing index is created from the full template. An index that
    /// exists with an empty mapping receives only the template's properties.
    #[instrument(skip(self, template))]
    pub async fn ensure_index(
        &self,
        index: &str,
        template: &serde_json::Value,
    ) -> Result<IndexBootstrap, PipelineError> {
        if !self.client.index_exists(index).await? {
            self.client.create_index(index, template).await?;
            info!(index = %index, "Created search index");
            return Ok(IndexBootstrap::Created);
        }

        let mappings = self.client.get_mapping(index).await?;
        if index_config::is_empty_mapping(&mappings) {
            let update = index_config::mapping_update(template)?;
            self.client.put_mapping(index, &update).await?;
            warn!(index = %index, "Search index existed without mappings, applied properties");
            return Ok(IndexBootstrap::MappingPatched);
        }

        debug!(index = %index, "Search index already mapped");
        Ok(IndexBootstrap::Unchanged)
    }

    /// Write a document into its kind's index, replacing any previous version.
    #[instrument(skip(self, document), fields(id = %document.document_id()))]
    pub async fn upsert(&self, document: &SearchDocument) -> Result<(), PipelineError> {
        let kind = document.kind();
        let target = self.targets.get(kind);
        if !target.enabled {
            return Err(PipelineError::loader(format!(
                "Index for {} documents is disabled",
                kind
            )));
        }

        let body = serde_json::to_value(document).map_err(SearchError::from)?;

        match self
            .client
            .index_document(&target.name, document.document_id(), &body)
            .await
        {
            Ok(()) => {
                debug!(index = %target.name, "Indexed document");
                Ok(())
            }
            Err(e) => {
                error!(index = %target.name, error = %e, "Failed to index document");
                Err(e.into())
            }
        }
    }

    /// Close the client and drop this loader's handle to it.
    pub async fn close(self) -> Result<(), PipelineError> {
        self.client.close().await?;
        drop(self.client);
        Ok(())
    }
}
