//! Configuration for the search sink.
//!
//! Both configurations arrive as JSON objects from the ingestion workflow, or
//! can be read from the environment (after loading a `.env` file).

mod dependencies;

pub use dependencies::Dependencies;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::env;
use std::str::FromStr;

use crate::SinkError;
use search_sink_pipeline::{IndexTarget, IndexTargets};
use search_sink_repository::ConnectionConfig;
use search_sink_shared::EntityKind;

/// Default search engine port.
const DEFAULT_ES_PORT: u16 = 9200;

/// Default search engine scheme.
const DEFAULT_ES_SCHEME: &str = "http";

/// Default metadata server API endpoint.
const DEFAULT_API_ENDPOINT: &str = "http://localhost:8585/api";

/// Search engine connection and index layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinkConfig {
    pub es_host: String,
    #[serde(default = "default_es_port")]
    pub es_port: u16,
    #[serde(default)]
    pub es_username: Option<String>,
    #[serde(default, skip_serializing)]
    pub es_password: Option<String>,
    #[serde(default = "default_es_scheme")]
    pub es_scheme: String,
    #[serde(default = "enabled")]
    pub index_tables: bool,
    #[serde(default = "enabled")]
    pub index_topics: bool,
    #[serde(default = "enabled")]
    pub index_dashboards: bool,
    #[serde(default = "enabled")]
    pub index_pipelines: bool,
    #[serde(default = "default_table_index")]
    pub table_index_name: String,
    #[serde(default = "default_topic_index")]
    pub topic_index_name: String,
    #[serde(default = "default_dashboard_index")]
    pub dashboard_index_name: String,
    #[serde(default = "default_pipeline_index")]
    pub pipeline_index_name: String,
}

fn default_es_port() -> u16 {
    DEFAULT_ES_PORT
}

fn default_es_scheme() -> String {
    DEFAULT_ES_SCHEME.to_string()
}

fn enabled() -> bool {
    true
}

fn default_table_index() -> String {
    EntityKind::Table.default_index_name().to_string()
}

fn default_topic_index() -> String {
    EntityKind::Topic.default_index_name().to_string()
}

fn default_dashboard_index() -> String {
    EntityKind::Dashboard.default_index_name().to_string()
}

fn default_pipeline_index() -> String {
    EntityKind::Pipeline.default_index_name().to_string()
}

impl SinkConfig {
    /// Create a config for `es_host` with every other field at its default.
    pub fn new(es_host: impl Into<String>) -> Self {
        Self {
            es_host: es_host.into(),
            es_port: DEFAULT_ES_PORT,
            es_username: None,
            es_password: None,
            es_scheme: default_es_scheme(),
            index_tables: true,
            index_topics: true,
            index_dashboards: true,
            index_pipelines: true,
            table_index_name: default_table_index(),
            topic_index_name: default_topic_index(),
            dashboard_index_name: default_dashboard_index(),
            pipeline_index_name: default_pipeline_index(),
        }
    }

    /// Parse the sink config object handed over by the workflow.
    pub fn from_value(value: Value) -> Result<Self, SinkError> {
        serde_json::from_value(value)
            .map_err(|e| SinkError::config(format!("Invalid sink config: {}", e)))
    }

    /// Read the config from the environment.
    ///
    /// # Environment Variables
    ///
    /// - `ES_HOST`: search engine host (required)
    /// - `ES_PORT`: search engine port (default: 9200)
    /// - `ES_SCHEME`: `http` or `https` (default: http)
    /// - `ES_USERNAME` / `ES_PASSWORD`: basic-auth credentials
    /// - `INDEX_TABLES`, `INDEX_TOPICS`, `INDEX_DASHBOARDS`, `INDEX_PIPELINES`:
    ///   per-kind switches (default: true)
    /// - `TABLE_INDEX_NAME`, `TOPIC_INDEX_NAME`, `DASHBOARD_INDEX_NAME`,
    ///   `PIPELINE_INDEX_NAME`: index names
    pub fn from_env() -> Result<Self, SinkError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, SinkError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let es_host = lookup("ES_HOST").ok_or_else(|| SinkError::config("ES_HOST is not set"))?;
        let mut config = Self::new(es_host);

        config.es_port = parse_var(&lookup, "ES_PORT", config.es_port)?;
        config.es_scheme = lookup("ES_SCHEME").unwrap_or(config.es_scheme);
        config.es_username = lookup("ES_USERNAME");
        config.es_password = lookup("ES_PASSWORD");

        config.index_tables = parse_var(&lookup, "INDEX_TABLES", config.index_tables)?;
        config.index_topics = parse_var(&lookup, "INDEX_TOPICS", config.index_topics)?;
        config.index_dashboards = parse_var(&lookup, "INDEX_DASHBOARDS", config.index_dashboards)?;
        config.index_pipelines = parse_var(&lookup, "INDEX_PIPELINES", config.index_pipelines)?;

        config.table_index_name = lookup("TABLE_INDEX_NAME").unwrap_or(config.table_index_name);
        config.topic_index_name = lookup("TOPIC_INDEX_NAME").unwrap_or(config.topic_index_name);
        config.dashboard_index_name =
            lookup("DASHBOARD_INDEX_NAME").unwrap_or(config.dashboard_index_name);
        config.pipeline_index_name =
            lookup("PIPELINE_INDEX_NAME").unwrap_or(config.pipeline_index_name);

        Ok(config)
    }

    /// Base URL of the search engine.
    pub fn url(&self) -> String {
        format!("{}://{}:{}", self.es_scheme, self.es_host, self.es_port)
    }

    /// Connection settings for the search engine client. Basic auth is used
    /// only when a username is configured.
    pub fn connection_config(&self) -> ConnectionConfig {
        let config = ConnectionConfig::new(self.url());
        match &self.es_username {
            Some(username) => config.with_basic_auth(username.clone(), self.es_password.clone()),
            None => config,
        }
    }

    /// Per-kind index names and switches for the loader.
    pub fn index_targets(&self) -> IndexTargets {
        IndexTargets {
            table: IndexTarget::new(&self.table_index_name, self.index_tables),
            topic: IndexTarget::new(&self.topic_index_name, self.index_topics),
            dashboard: IndexTarget::new(&self.dashboard_index_name, self.index_dashboards),
            pipeline: IndexTarget::new(&self.pipeline_index_name, self.index_pipelines),
        }
    }
}

/// Metadata server connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataServerConfig {
    #[serde(default = "default_api_endpoint")]
    pub api_endpoint: String,
    #[serde(default, skip_serializing)]
    pub auth_token: Option<String>,
}

fn default_api_endpoint() -> String {
    DEFAULT_API_ENDPOINT.to_string()
}

impl Default for MetadataServerConfig {
    fn default() -> Self {
        Self {
            api_endpoint: default_api_endpoint(),
            auth_token: None,
        }
    }
}

impl MetadataServerConfig {
    /// Parse the metadata server config object handed over by the workflow.
    pub fn from_value(value: Value) -> Result<Self, SinkError> {
        serde_json::from_value(value)
            .map_err(|e| SinkError::config(format!("Invalid metadata server config: {}", e)))
    }

    /// Read `METADATA_API_ENDPOINT` and `METADATA_AUTH_TOKEN` from the
    /// environment.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            api_endpoint: lookup("METADATA_API_ENDPOINT").unwrap_or_else(default_api_endpoint),
            auth_token: lookup("METADATA_AUTH_TOKEN"),
        }
    }
}

fn parse_var<F, T>(lookup: &F, name: &str, default: T) -> Result<T, SinkError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| SinkError::config(format!("Invalid {}={:?}: {}", name, raw, e))),
        None => Ok(default),
    }
}
