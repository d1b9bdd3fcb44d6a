use crate::aggregator::file_aggregator::AggregationProgress;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregationReport {
    pub root: String,
    pub output_file: String,
    pub summary: AggregationSummary,
    pub records: Vec<RecordInfo>,
    pub skipped: Vec<SkippedFile>,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregationSummary {
    pub files_matched: usize,
    pub records_written: usize,
    /// Sum of the source file sizes, as reported in the `Size:` lines.
    pub source_bytes: u64,
    /// Size of the snapshot file, markers included.
    pub output_bytes: u64,
    pub duration: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordInfo {
    pub relative_path: String,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedFile {
    pub relative_path: String,
    pub reason: String,
}

impl AggregationReport {
    pub fn from_progress(root: &Path, output_file: &Path, progress: AggregationProgress) -> Self {
        let summary = AggregationSummary {
            files_matched: progress.total_files,
            records_written: progress.records.len(),
            source_bytes: progress.bytes_processed,
            output_bytes: progress.output_bytes,
            duration: progress.elapsed(),
        };

        Self {
            root: root.display().to_string(),
            output_file: output_file.display().to_string(),
            summary,
            records: progress.records,
            skipped: progress.skipped,
            completed_at: Utc::now(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
