//! REST implementation of the metadata store.
//!
//! This module provides a concrete implementation of `MetadataStore` against
//! the metadata server's `/v1` entity API.

mod client;

pub use client::OpenMetadataClient;
