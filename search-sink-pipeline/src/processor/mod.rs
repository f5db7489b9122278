//! Processor module for the search sink pipeline.
//!
//! Transforms metadata records into search documents.

mod document_processor;
mod tags;

pub use document_processor::{flatten_columns, DocumentProcessor};
pub use tags::{TagSet, TIER_MARKER};
