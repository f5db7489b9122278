//! Dependency initialization and wiring for the search sink.

use std::sync::Arc;
use tracing::info;

use super::{MetadataServerConfig, SinkConfig};
use crate::SinkError;
use search_sink_pipeline::{DocumentProcessor, IndexTargets, MetadataSearchSink, SearchLoader};
use search_sink_repository::{
    MetadataStore, OpenMetadataClient, OpenSearchClient, SearchEngineClient,
};

/// Container for the initialized downstream clients.
pub struct Dependencies {
    /// Client for the search engine the documents are written to.
    pub search_client: Arc<dyn SearchEngineClient>,
    /// Client for the metadata server references are resolved against.
    pub metadata_store: Arc<dyn MetadataStore>,
    /// Index names and switches for the loader.
    pub targets: IndexTargets,
}

impl Dependencies {
    /// Build both clients from their configurations.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(SinkError)` - If a client cannot be constructed
    pub fn new(
        sink_config: &SinkConfig,
        metadata_config: &MetadataServerConfig,
    ) -> Result<Self, SinkError> {
        info!(
            search_url = %sink_config.url(),
            basic_auth = sink_config.es_username.is_some(),
            api_endpoint = %metadata_config.api_endpoint,
            "Initializing dependencies"
        );

        let search_client = OpenSearchClient::new(&sink_config.connection_config()).map_err(|e| {
            SinkError::config(format!("Failed to create OpenSearch client: {}", e))
        })?;

        let metadata_store = OpenMetadataClient::new(
            &metadata_config.api_endpoint,
            metadata_config.auth_token.clone(),
        )
        .map_err(|e| SinkError::config(format!("Failed to create metadata client: {}", e)))?;

        Ok(Self {
            search_client: Arc::new(search_client),
            metadata_store: Arc::new(metadata_store),
            targets: sink_config.index_targets(),
        })
    }

    /// Initialize all dependencies from environment variables.
    pub fn from_env() -> Result<Self, SinkError> {
        let sink_config = SinkConfig::from_env()?;
        let metadata_config = MetadataServerConfig::from_env();
        Self::new(&sink_config, &metadata_config)
    }

    /// Assemble the sink, bootstrapping the enabled indices.
    pub async fn into_sink(self) -> Result<MetadataSearchSink, SinkError> {
        let processor = DocumentProcessor::new(self.metadata_store);
        let loader = SearchLoader::new(self.search_client, self.targets);

        Ok(MetadataSearchSink::new(processor, loader).await?)
    }
}
