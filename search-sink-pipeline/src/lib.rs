//! # Search Sink Pipeline
//!
//! This crate provides the pipeline components for turning metadata records
//! into search documents and writing them into OpenSearch.
//!
//! ## Architecture
//!
//! The pipeline follows the Processor-Loader pattern:
//!
//! 1. **Processor**: Transforms records into search documents
//! 2. **Loader**: Bootstraps the indices and upserts documents
//! 3. **Sink**: Coordinates both per record and tracks status

pub mod errors;
pub mod loader;
pub mod processor;
pub mod sink;

#[cfg(test)]
mod testing;

pub use errors::PipelineError;
pub use loader::{IndexBootstrap, IndexTarget, IndexTargets, SearchLoader};
pub use processor::DocumentProcessor;
pub use sink::{MetadataSearchSink, SinkStatus};
