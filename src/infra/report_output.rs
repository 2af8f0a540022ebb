//! JSON writer for the quality summary artifact.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::common::Result;
use crate::domain::QualitySummary;
use crate::pipeline::orchestrator::SummarySink;

/// File-based implementation of [`SummarySink`]; pretty-printed JSON so
/// the report stays reviewable by hand.
pub struct JsonSummaryWriter {
    path: PathBuf,
}

impl JsonSummaryWriter {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl SummarySink for JsonSummaryWriter {
    fn write_summary(&mut self, summary: &QualitySummary) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = fs::File::create(&self.path)?;
        serde_json::to_writer_pretty(file, summary)?;
        info!("💾 Wrote quality summary to {}", self.path.display());
        Ok(())
    }
}
