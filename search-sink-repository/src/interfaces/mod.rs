//! Interface definitions for the downstream clients.
//!
//! This module defines the abstract `SearchEngineClient` and `MetadataStore`
//! traits that allow for dependency injection and swappable backends.

mod metadata_store;
mod search_engine_client;

pub use metadata_store::MetadataStore;
pub use search_engine_client::SearchEngineClient;
