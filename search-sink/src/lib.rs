//! # Search Sink
//!
//! Main library for the metadata search sink.
//!
//! This crate provides the configuration, the dependency wiring and the
//! tracing setup for running the sink inside an ingestion workflow.

pub mod config;
pub mod telemetry;

pub use config::{Dependencies, MetadataServerConfig, SinkConfig};
pub use search_sink_pipeline::{MetadataSearchSink, SinkStatus};

use chrono::{DateTime, Utc};
use serde_json::Value;
use thiserror::Error;
use tracing::info;

/// Errors that can occur during sink initialization or execution.
#[derive(Error, Debug)]
pub enum SinkError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Pipeline error.
    #[error("Pipeline error: {0}")]
    PipelineError(#[from] search_sink_pipeline::PipelineError),

    /// Search error.
    #[error("Search error: {0}")]
    SearchError(#[from] search_sink_repository::SearchError),

    /// Metadata error.
    #[error("Metadata error: {0}")]
    MetadataError(#[from] search_sink_repository::MetadataError),
}

impl SinkError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}

/// The workflow run a sink belongs to.
#[derive(Debug, Clone)]
pub struct WorkflowContext {
    pub workflow_id: String,
    pub started_at: DateTime<Utc>,
}

impl WorkflowContext {
    pub fn new(workflow_id: impl Into<String>) -> Self {
        Self {
            workflow_id: workflow_id.into(),
            started_at: Utc::now(),
        }
    }
}

/// Construct a sink from the workflow's config objects.
///
/// Parses both configs, connects the clients and bootstraps the enabled
/// indices before returning.
pub async fn create(
    sink_config: Value,
    metadata_config: Value,
    ctx: WorkflowContext,
) -> Result<MetadataSearchSink, SinkError> {
    let sink_config = SinkConfig::from_value(sink_config)?;
    let metadata_config = MetadataServerConfig::from_value(metadata_config)?;

    info!(
        workflow_id = %ctx.workflow_id,
        started_at = %ctx.started_at,
        "Creating search sink"
    );

    Dependencies::new(&sink_config, &metadata_config)?
        .into_sink()
        .await
}
