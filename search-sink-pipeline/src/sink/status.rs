use serde::Serialize;
use std::fmt;

/// Progress report of a sink: names of the records written, of the records
/// skipped with a warning, and of the records that failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SinkStatus {
    pub records: Vec<String>,
    pub warnings: Vec<String>,
    pub failures: Vec<String>,
}

impl SinkStatus {
    pub fn records_written(&mut self, name: impl Into<String>) {
        self.records.push(name.into());
    }

    pub fn warning(&mut self, name: impl Into<String>, reason: &str) {
        self.warnings.push(format!("{}: {}", name.into(), reason));
    }

    pub fn failure(&mut self, name: impl Into<String>) {
        self.failures.push(name.into());
    }

    pub fn written_count(&self) -> usize {
        self.records.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

impl fmt::Display for SinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} records written, {} warnings, {} failed",
            self.records.len(),
            self.warnings.len(),
            self.failures.len()
        )
    }
}
