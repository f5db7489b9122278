//! # Search Sink Repository
//!
//! This crate provides traits and implementations for the two downstream
//! systems of the sink: the search engine the documents are written to, and
//! the metadata server foreign references are resolved against. It includes
//! error definitions, interfaces, and concrete implementations for OpenSearch
//! and the metadata server's REST API.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod openmetadata;
pub mod opensearch;

pub use config::{BasicAuth, ConnectionConfig};
pub use errors::{MetadataError, SearchError};
pub use interfaces::{MetadataStore, SearchEngineClient};
pub use openmetadata::OpenMetadataClient;
pub use self::opensearch::OpenSearchClient;
