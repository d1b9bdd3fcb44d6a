pub mod aggregator;
pub mod cli;
pub mod config;
pub mod error;
pub mod scanner;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, FilterConfig, OutputConfig};
pub use error::{CodeSnapError, Result, UserFriendlyError};

// Core functionality re-exports
pub use aggregator::{
    AggregationProgress, AggregationReport, Aggregator, FileRecord, RecordWriter, SkippedFile,
};
pub use scanner::{ExtensionFilter, SourceFile, SourceScanner};
pub use ui::{OutputFormatter, OutputMode, ProgressManager};

use std::path::Path;

/// Snapshot `root_folder` into `output_file` with the default extension filter
/// (`.jsx`, `.ts`).
///
/// ```no_run
/// let report = codesnap::aggregate("src/service", "all_code_with_metadata.txt")?;
/// println!("{} files collected", report.summary.records_written);
/// # Ok::<(), codesnap::CodeSnapError>(())
/// ```
pub fn aggregate<P: AsRef<Path>, Q: AsRef<Path>>(
    root_folder: P,
    output_file: Q,
) -> Result<AggregationReport> {
    Aggregator::default().aggregate(root_folder, output_file, None)
}

/// Main library interface for CodeSnap functionality
pub struct CodeSnap {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

impl CodeSnap {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        Self {
            config,
            output_formatter: OutputFormatter::new(output_mode, verbose, quiet),
            progress_manager: ProgressManager::new(false),
        }
    }

    pub fn with_progress(mut self, enabled: bool) -> Self {
        self.progress_manager = ProgressManager::new(enabled);
        self
    }

    /// Create CodeSnap instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let show_progress = cli_args.progress && !cli_args.quiet;

        Ok(Self::new(
            config,
            cli_args.output_format.into(),
            cli_args.verbose,
            cli_args.quiet,
        )
        .with_progress(show_progress))
    }

    /// Write the snapshot described by the configuration.
    pub fn run(&self) -> Result<AggregationReport> {
        let root = &self.config.output.root;
        let output = &self.config.output.path;
        let aggregator = Aggregator::from_config(&self.config);

        self.output_formatter.debug(&format!(
            "Collecting {} from {}",
            self.config.filters.extensions.join(", "),
            root.display()
        ));

        let file_progress = self.progress_manager.create_file_progress();
        let progress_callback = {
            let pb = file_progress.clone();
            move |progress: &AggregationProgress| {
                ui::progress::update_file_progress(&pb, progress);
            }
        };

        let report = aggregator.aggregate(root, output, Some(&progress_callback))?;

        ui::progress::finish_progress_with_summary(
            &file_progress,
            &format!("Collected {} files", report.summary.records_written),
            report.summary.duration,
        );

        Ok(report)
    }

    /// Scan without writing; returns the files a run would collect.
    pub fn dry_run(&self) -> Result<Vec<SourceFile>> {
        let aggregator = Aggregator::from_config(&self.config);
        let files = aggregator.collect(&self.config.output.root)?;
        let stats = aggregator.scanner().statistics(&files);

        self.output_formatter.print_dry_run(&files, &stats);

        Ok(files)
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config)?;
        Ok(())
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &CodeSnapError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}
