use crate::aggregator::record_writer::{FileRecord, RecordWriter};
use crate::aggregator::report::{AggregationReport, RecordInfo, SkippedFile};
use crate::config::{Config, FilterConfig};
use crate::error::{CodeSnapError, Result};
use crate::scanner::{SourceFile, SourceScanner};
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::{Duration, Instant};

const OUTPUT_BUFFER_SIZE: usize = 64 * 1024;

#[derive(Debug, Clone)]
pub struct AggregationProgress {
    pub files_processed: usize,
    pub total_files: usize,
    pub bytes_processed: u64,
    pub output_bytes: u64,
    pub current_file: Option<String>,
    pub start_time: Instant,
    pub records: Vec<RecordInfo>,
    pub skipped: Vec<SkippedFile>,
}

impl AggregationProgress {
    pub fn new(total_files: usize) -> Self {
        Self {
            files_processed: 0,
            total_files,
            bytes_processed: 0,
            output_bytes: 0,
            current_file: None,
            start_time: Instant::now(),
            records: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn record_written(&mut self, record: RecordInfo, block_bytes: u64) {
        self.files_processed += 1;
        self.bytes_processed += record.size;
        self.output_bytes += block_bytes;
        self.current_file = Some(record.relative_path.clone());
        self.records.push(record);
    }

    pub fn record_skipped(&mut self, skipped: SkippedFile) {
        self.files_processed += 1;
        self.current_file = Some(skipped.relative_path.clone());
        self.skipped.push(skipped);
    }

    pub fn percentage(&self) -> f64 {
        if self.total_files == 0 {
            0.0
        } else {
            (self.files_processed as f64 / self.total_files as f64) * 100.0
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Walks a root folder and writes every matching, readable file into one
/// snapshot, in traversal order.
pub struct Aggregator {
    scanner: SourceScanner,
}

impl Aggregator {
    pub fn new(config: &FilterConfig) -> Self {
        Self {
            scanner: SourceScanner::new(config),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.filters).with_sorted_paths(config.output.sort_paths)
    }

    pub fn with_sorted_paths(mut self, sort_paths: bool) -> Self {
        self.scanner = self.scanner.with_sorted_paths(sort_paths);
        self
    }

    pub fn scanner(&self) -> &SourceScanner {
        &self.scanner
    }

    /// Files that a run over `root` would consider, without reading them.
    pub fn collect<P: AsRef<Path>>(&self, root: P) -> Result<Vec<SourceFile>> {
        self.scanner.scan_directory(root)
    }

    /// Writes the snapshot of `root` to `output`, truncating it first.
    ///
    /// Unreadable files are logged and listed in the report. Only failures to
    /// create or write `output`, or to read `root` itself, are returned as errors.
    pub fn aggregate<P, Q>(
        &self,
        root: P,
        output: Q,
        progress_callback: Option<&dyn Fn(&AggregationProgress)>,
    ) -> Result<AggregationReport>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let root = root.as_ref();
        let output = output.as_ref();

        let file = fs::File::create(output).map_err(|e| output_error(output, e))?;
        let output_identity = fs::canonicalize(output).ok();

        let files = self.scanner.scan_directory(root)?;
        let files: Vec<&SourceFile> = files
            .iter()
            .filter(|f| !is_output_file(f, output, output_identity.as_deref()))
            .collect();

        let mut writer = RecordWriter::new(BufWriter::with_capacity(OUTPUT_BUFFER_SIZE, file));
        let progress = write_records(&files, &mut writer, progress_callback)
            .map_err(|e| output_error(output, e))?;
        writer.finish().map_err(|e| output_error(output, e))?;

        tracing::info!("Code collected into {}", output.display());

        Ok(AggregationReport::from_progress(root, output, progress))
    }

    /// Same as [`Aggregator::aggregate`] but writes to an arbitrary sink.
    pub fn aggregate_to_writer<P, W>(
        &self,
        root: P,
        sink: W,
        progress_callback: Option<&dyn Fn(&AggregationProgress)>,
    ) -> Result<(AggregationProgress, W)>
    where
        P: AsRef<Path>,
        W: Write,
    {
        let files = self.scanner.scan_directory(root)?;
        let files: Vec<&SourceFile> = files.iter().collect();

        let mut writer = RecordWriter::new(sink);
        let progress = write_records(&files, &mut writer, progress_callback)?;
        let sink = writer.finish()?;

        Ok((progress, sink))
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(&FilterConfig::default())
    }
}

/// Reads a source file completely. Size comes from the filesystem after the read.
pub fn read_record(file: &SourceFile) -> io::Result<FileRecord> {
    let content = fs::read_to_string(&file.source_path)?;
    let size = fs::metadata(&file.source_path)?.len();
    Ok(FileRecord::new(file.display_path(), size, content))
}

fn write_records<W: Write>(
    files: &[&SourceFile],
    writer: &mut RecordWriter<W>,
    progress_callback: Option<&dyn Fn(&AggregationProgress)>,
) -> io::Result<AggregationProgress> {
    let mut progress = AggregationProgress::new(files.len());

    for file in files {
        if let Some(callback) = progress_callback {
            callback(&progress);
        }

        match read_record(file) {
            Ok(record) => {
                let before = writer.bytes_written();
                writer.write_record(&record)?;
                progress.record_written(
                    RecordInfo {
                        relative_path: record.relative_path,
                        size: record.size,
                    },
                    writer.bytes_written() - before,
                );
            }
            Err(err) => {
                tracing::warn!("Could not read {}: {}", file.source_path.display(), err);
                progress.record_skipped(SkippedFile {
                    relative_path: file.display_path(),
                    reason: err.to_string(),
                });
            }
        }
    }

    if let Some(callback) = progress_callback {
        callback(&progress);
    }

    Ok(progress)
}

// The snapshot may live inside the tree it describes.
fn is_output_file(file: &SourceFile, output: &Path, output_identity: Option<&Path>) -> bool {
    let Some(identity) = output_identity else {
        return false;
    };

    if file.source_path.file_name() != output.file_name() {
        return false;
    }

    let same = fs::canonicalize(&file.source_path)
        .map(|p| p == identity)
        .unwrap_or(false);
    if same {
        tracing::debug!("Skipping {}: it is the output file", file.source_path.display());
    }
    same
}

fn output_error(path: &Path, source: io::Error) -> CodeSnapError {
    CodeSnapError::OutputFile {
        path: path.display().to_string(),
        source,
    }
}
