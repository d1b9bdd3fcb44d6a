use crate::aggregator::AggregationReport;
use crate::error::{CodeSnapError, UserFriendlyError};
use crate::scanner::{ScanStatistics, SourceFile};
use crate::ui::progress::format_duration;
use console::{style, Emoji, Term};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

static CHECKMARK: Emoji = Emoji("✅ ", "✓ ");
static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static SPARKLES: Emoji = Emoji("✨ ", "* ");

/// Everything the user sees on stdout. Diagnostics go through `tracing` instead.
pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let use_colors = match mode {
            OutputMode::Human => Term::stdout().features().colors_supported() && !quiet,
            _ => false,
        };

        Self {
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    pub fn success(&self, message: &str) {
        if self.should_show_message(0) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Success, message),
                OutputMode::Json => self.print_json_message("success", message),
                OutputMode::Plain => println!("SUCCESS: {}", message),
            }
        }
    }

    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Error, message),
            OutputMode::Json => self.print_json_message("error", message),
            OutputMode::Plain => eprintln!("ERROR: {}", message),
        }
    }

    pub fn debug(&self, message: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("  {}", style(message).dim());
                    } else {
                        println!("  DEBUG: {}", message);
                    }
                }
                OutputMode::Json => self.print_json_message("debug", message),
                OutputMode::Plain => println!("DEBUG: {}", message),
            }
        }
    }

    pub fn print_user_friendly_error(&self, error: &CodeSnapError) {
        self.error(&error.user_message());

        if let Some(suggestion) = error.suggestion() {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        eprintln!(
                            "{}{}",
                            INFO,
                            style(format!("Suggestion: {}", suggestion)).cyan()
                        );
                    } else {
                        eprintln!("Suggestion: {}", suggestion);
                    }
                }
                OutputMode::Json => {
                    self.print_json_object(&serde_json::json!({
                        "type": "suggestion",
                        "message": suggestion
                    }));
                }
                OutputMode::Plain => eprintln!("SUGGESTION: {}", suggestion),
            }
        }
    }

    /// Final report. JSON mode prints the full report even when quiet.
    ///
    /// The completion notice itself is logged by the aggregator, so the text
    /// modes only print the summary figures.
    pub fn print_report(&self, report: &AggregationReport) {
        match self.mode {
            OutputMode::Json => println!("{}", report.to_json()),
            _ if self.quiet => {}
            OutputMode::Human => self.print_human_report(report),
            OutputMode::Plain => self.print_plain_report(report),
        }
    }

    /// Lists what a run would collect, without touching the output file.
    pub fn print_dry_run(&self, files: &[SourceFile], stats: &ScanStatistics) {
        match self.mode {
            OutputMode::Json => {
                let paths: Vec<String> = files.iter().map(SourceFile::display_path).collect();
                self.print_json_object(&serde_json::json!({
                    "type": "dry_run",
                    "files": paths,
                    "files_by_extension": stats.files_by_extension,
                    "timestamp": chrono::Utc::now().to_rfc3339()
                }));
            }
            _ => {
                self.print_header("Dry Run");
                for file in files {
                    println!("  {}", file.display_path());
                }
                self.print_separator();
                print!("{}", stats.display_summary());
            }
        }
    }

    pub fn print_header(&self, title: &str) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human => {
                println!();
                if self.use_colors {
                    println!("{} {}", SPARKLES, style(title).bold().cyan());
                } else {
                    println!("=== {} ===", title);
                }
                println!();
            }
            OutputMode::Json => {
                self.print_json_object(&serde_json::json!({
                    "type": "header",
                    "title": title
                }));
            }
            OutputMode::Plain => println!("=== {} ===", title),
        }
    }

    pub fn print_separator(&self) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human => {
                if self.use_colors {
                    println!("{}", style("─".repeat(60)).dim());
                } else {
                    println!("{}", "-".repeat(60));
                }
            }
            OutputMode::Plain => println!("{}", "-".repeat(60)),
            OutputMode::Json => {}
        }
    }

    fn should_show_message(&self, min_verbose_level: u8) -> bool {
        !self.quiet && self.verbose_level >= min_verbose_level
    }

    fn print_human_message(&self, msg_type: MessageType, message: &str) {
        #[allow(clippy::type_complexity)]
        let (emoji, color_fn): (Emoji, Box<dyn Fn(&str) -> console::StyledObject<&str>>) =
            match msg_type {
                MessageType::Success => (CHECKMARK, Box::new(|msg| style(msg).green().bold())),
                MessageType::Error => (CROSS, Box::new(|msg| style(msg).red().bold())),
            };

        if self.use_colors {
            match msg_type {
                MessageType::Error => eprintln!("{}{}", emoji, color_fn(message)),
                _ => println!("{}{}", emoji, color_fn(message)),
            }
        } else {
            let prefix = match msg_type {
                MessageType::Success => "✓",
                MessageType::Error => "✗",
            };

            match msg_type {
                MessageType::Error => eprintln!("{} {}", prefix, message),
                _ => println!("{} {}", prefix, message),
            }
        }
    }

    fn print_json_message(&self, level: &str, message: &str) {
        self.print_json_object(&serde_json::json!({
            "type": "message",
            "level": level,
            "message": message,
            "timestamp": chrono::Utc::now().to_rfc3339()
        }));
    }

    fn print_json_object(&self, obj: &serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string(obj).unwrap_or_else(|_| "{}".to_string())
        );
    }

    fn highlight(&self, value: String) -> String {
        if self.use_colors {
            style(value).cyan().bold().to_string()
        } else {
            value
        }
    }

    fn print_human_report(&self, report: &AggregationReport) {
        let summary = &report.summary;

        self.print_separator();
        println!("  Root:            {}", report.root);
        println!("  Snapshot:        {}", report.output_file);
        println!(
            "  Records written: {}",
            self.highlight(summary.records_written.to_string())
        );
        println!(
            "  Source bytes:    {}",
            self.highlight(format_bytes(summary.source_bytes))
        );
        println!(
            "  Snapshot size:   {}",
            self.highlight(format_bytes(summary.output_bytes))
        );
        println!(
            "  Time taken:      {}",
            self.highlight(format_duration(summary.duration))
        );

        if !report.skipped.is_empty() {
            println!("  Skipped:         {}", report.skipped.len());
            println!();
            println!("Files that could not be read:");
            for skipped in &report.skipped {
                println!("  - {}: {}", skipped.relative_path, skipped.reason);
            }
        }

        if self.verbose_level >= 1 && !report.records.is_empty() {
            println!();
            println!("Records:");
            for record in &report.records {
                println!("  {} ({} bytes)", record.relative_path, record.size);
            }
        }

        self.print_separator();
    }

    fn print_plain_report(&self, report: &AggregationReport) {
        let summary = &report.summary;

        println!("Root: {}", report.root);
        println!("Snapshot: {}", report.output_file);
        println!("Records: {}", summary.records_written);
        println!("Source bytes: {}", summary.source_bytes);
        println!("Snapshot bytes: {}", summary.output_bytes);
        println!("Duration: {:?}", summary.duration);

        for skipped in &report.skipped {
            println!("SKIPPED: {}: {}", skipped.relative_path, skipped.reason);
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum MessageType {
    Success,
    Error,
}

fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}
