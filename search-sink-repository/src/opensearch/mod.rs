//! OpenSearch implementation of the search engine client.
//!
//! This module provides a concrete implementation of `SearchEngineClient`
//! using OpenSearch as the backend, plus the per-kind index templates.

mod client;
pub mod index_config;

pub use client::OpenSearchClient;
