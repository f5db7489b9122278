//! Metadata store error types.
//!
//! This module defines the error types that can occur while resolving entity
//! references against the metadata server.

use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during metadata store lookups.
#[derive(Debug, Clone, Error)]
pub enum MetadataError {
    /// Failed to reach the metadata server.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },

    /// The metadata server answered with a non-success status.
    #[error("Request error: {0}")]
    RequestError(String),

    /// The response body could not be decoded.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid client configuration (e.g. a malformed endpoint).
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl MetadataError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a not found error.
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        Self::NotFound { entity, id }
    }

    /// Create a request error.
    pub fn request(msg: impl Into<String>) -> Self {
        Self::RequestError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
