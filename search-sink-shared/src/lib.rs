//! # Search Sink Shared
//!
//! Shared types for the metadata search sink: the metadata entities received
//! from the ingestion pipeline and the denormalized documents written into the
//! search index.

pub mod document;
pub mod entity;
pub mod record;

pub use document::{
    DashboardDocument, PipelineDocument, SearchDocument, Suggestion, TableDocument,
    TopicDocument, UsageFields,
};
pub use entity::{
    Chart, Column, Dashboard, Database, EntityReference, Pipeline, Service, ServiceKind, Table,
    TableType, TagLabel, Task, Topic, UsageDetails, UsageStats,
};
pub use record::{EntityKind, OtherRecord, Record};
