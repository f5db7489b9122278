//! Sink module for the search sink pipeline.
//!
//! Coordinates the processor and loader components for each incoming record.

mod status;

pub use status::SinkStatus;

use tracing::{debug, error, info, instrument};

use crate::errors::PipelineError;
use crate::loader::SearchLoader;
use crate::processor::DocumentProcessor;
use search_sink_shared::Record;

/// Sink that turns metadata records into search documents.
///
/// The sink:
/// - Bootstraps the enabled indices when it is constructed
/// - Routes each record to the builder for its kind
/// - Upserts the built document into the kind's index
/// - Tracks which records were written, skipped or failed
///
/// Records are handled one at a time; a failing record is recorded and its
/// error returned to the caller, which decides whether to continue.
pub struct MetadataSearchSink {
    processor: DocumentProcessor,
    loader: SearchLoader,
    status: SinkStatus,
}

impl MetadataSearchSink {
    /// Create a new sink, bootstrapping every enabled index.
    #[instrument(skip(processor, loader))]
    pub async fn new(
        processor: DocumentProcessor,
        loader: SearchLoader,
    ) -> Result<Self, PipelineError> {
        let outcomes = loader.ensure_indices().await?;
        info!(indices = outcomes.len(), "Search indices ready");

        Ok(Self {
            processor,
            loader,
            status: SinkStatus::default(),
        })
    }

    /// Write one record.
    ///
    /// Records of a disabled kind are skipped with a warning and not counted
    /// as written. Records of a kind the sink does not index are counted as
    /// written without touching the search engine.
    #[instrument(skip(self, record), fields(name = %record.name(), id = ?record.id()))]
    pub async fn write_record(&mut self, record: &Record) -> Result<(), PipelineError> {
        if let Some(kind) = record.kind() {
            if !self.loader.is_enabled(kind) {
                debug!(kind = %kind, "Index disabled, skipping record");
                self.status
                    .warning(record.name(), &format!("{} index disabled", kind));
                return Ok(());
            }
        }

        match self.index_record(record).await {
            Ok(()) => {
                self.status.records_written(record.name());
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Failed to write record");
                self.status.failure(record.name());
                Err(e)
            }
        }
    }

    async fn index_record(&self, record: &Record) -> Result<(), PipelineError> {
        if let Some(document) = self.processor.process(record).await? {
            self.loader.upsert(&document).await?;
        }
        Ok(())
    }

    pub fn get_status(&self) -> &SinkStatus {
        &self.status
    }

    /// Close the search engine connection.
    pub async fn close(self) -> Result<(), PipelineError> {
        info!(status = %self.status, "Closing search sink");
        self.loader.close().await
    }
}
