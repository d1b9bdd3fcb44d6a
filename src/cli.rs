use crate::config::{CliOverrides, Config};
use crate::error::Result;
use crate::ui::OutputMode;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "codesnap")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Collect source files from a directory tree into one annotated snapshot")]
#[command(
    long_about = "CodeSnap walks a folder, picks every file whose name ends with one of the \
                  configured extensions, and writes them one after another into a single text \
                  file. Each file is wrapped in a block carrying its relative path and size."
)]
#[command(after_help = "EXAMPLES:\n  \
    codesnap\n  \
    codesnap frontend/src --output frontend.txt\n  \
    codesnap . --extensions .rs,.toml --exclude target,.git\n  \
    codesnap app --config codesnap.toml --dry-run")]
pub struct Cli {
    /// Root folder to scan (defaults to src/service)
    pub root: Option<PathBuf>,

    /// Snapshot file to write (defaults to all_code_with_metadata.txt)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// File name suffixes to collect (comma-separated)
    #[arg(
        short,
        long,
        help = "File name suffixes to collect, case-sensitive (e.g., .ts,.jsx)"
    )]
    pub extensions: Option<String>,

    /// Directory names to skip
    #[arg(short = 'x', long, value_delimiter = ',')]
    pub exclude: Option<Vec<String>>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Keep the raw directory listing order instead of sorting by name
    #[arg(long)]
    pub no_sort: bool,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (only errors)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Show a progress bar while collecting
    #[arg(long)]
    pub progress: bool,

    /// List the files that would be collected without writing the snapshot
    #[arg(long)]
    pub dry_run: bool,

    /// Generate a sample configuration file
    #[arg(long)]
    pub generate_config: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl From<OutputFormat> for OutputMode {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        }
    }
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_root(self.root.clone())
            .with_output(self.output.clone())
            .with_extensions(self.extensions.clone())
            .with_exclude(self.exclude.clone())
            .with_sort_paths(if self.no_sort { Some(false) } else { None })
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose > 0 && !self.quiet
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}
