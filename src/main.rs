use clap::Parser;
use codesnap::{Cli, CodeSnap, CodeSnapError, OutputFormatter, OutputMode};
use std::io::IsTerminal;
use std::process;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse();
    setup_logging(cli.verbosity_level(), cli.quiet);

    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let codesnap = match CodeSnap::from_cli(&cli) {
        Ok(codesnap) => codesnap,
        Err(e) => {
            print_startup_error(&cli, &e);
            return 1;
        }
    };

    if cli.dry_run {
        return match codesnap.dry_run() {
            Ok(_) => 0,
            Err(e) => {
                codesnap.handle_error(&e);
                1
            }
        };
    }

    match codesnap.run() {
        Ok(report) => {
            codesnap.output_formatter().print_report(&report);
            0
        }
        Err(e) => {
            codesnap.handle_error(&e);
            1
        }
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "codesnap.toml".to_string());

    let formatter = OutputFormatter::new(OutputMode::from(cli.output_format), 0, cli.quiet);

    match CodeSnap::generate_sample_config(&config_path) {
        Ok(()) => {
            formatter.success(&format!(
                "Generated sample configuration file: {}",
                config_path
            ));
            if !cli.quiet {
                println!("\nTo use this configuration:");
                println!("  codesnap --config {}", config_path);
            }
            0
        }
        Err(e) => {
            formatter.print_user_friendly_error(&e);
            1
        }
    }
}

fn print_startup_error(cli: &Cli, error: &CodeSnapError) {
    let formatter = OutputFormatter::new(OutputMode::from(cli.output_format), 0, false);
    formatter.print_user_friendly_error(error);
}

/// Diagnostics go to stderr so the JSON report on stdout stays parseable.
/// `RUST_LOG` wins over the verbosity flags when set.
fn setup_logging(verbosity: u8, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else {
        match verbosity {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false),
        )
        .with(filter)
        .init();
}
