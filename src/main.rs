//! momo-config
//!
//! Prints the momo plugin configuration as it resolves for a directory,
//! together with the source of every field.

use anyhow::{Context, Result};
use clap::Parser;
use momo_pi_config::cli::{Cli, Command, FormatArg};
use momo_pi_config::config::{ConfigResolver, strip_jsonc};
use momo_pi_config::format::{OutputFormat, format_resolution, format_sources_text};
use std::fs::OpenOptions;
use std::path::Path;
use tracing::{Level, debug};
use tracing_subscriber::{EnvFilter, FmtSubscriber, filter::LevelFilter};

/// Convert the CLI format flag to the formatter's format.
fn cli_format_to_output(format: FormatArg) -> OutputFormat {
    match format {
        FormatArg::Text => OutputFormat::Text,
        FormatArg::Json => OutputFormat::Json,
    }
}

/// Install the global tracing subscriber. `RUST_LOG` refines the default level.
fn init_logging(target: &str, level: Level) -> Result<()> {
    let filter = || {
        EnvFilter::builder()
            .with_default_directive(LevelFilter::from_level(level).into())
            .from_env_lossy()
    };

    match target {
        "0" | "off" => {
            // No logging
        }
        "1" | "stdout" => {
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(filter())
                .with_writer(std::io::stdout)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        "2" | "stderr" => {
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(filter())
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        filename => {
            // Log to file (append mode)
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(filename)
                .with_context(|| format!("failed to open log file {filename}"))?;
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(filter())
                .with_writer(file)
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    init_logging(&cli.log, level)?;

    let format = cli_format_to_output(cli.format);
    let resolver = ConfigResolver::from_process(cli.cwd.as_deref().map(Path::new));

    match cli.command {
        Some(Command::Strip { file }) => {
            let content = std::fs::read_to_string(&file)
                .map_err(momo_pi_config::ConfigError::from)
                .with_context(|| format!("failed to read {}", file.display()))?;
            print!("{}", strip_jsonc(&content));
        }
        Some(Command::Sources) => {
            let resolution = resolver.resolve()?;
            match format {
                OutputFormat::Text => print!("{}", format_sources_text(&resolution.meta)),
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&resolution.meta)?)
                }
            }
        }
        Some(Command::Show) | None => {
            debug!(cwd = %resolver.paths().cwd.display(), "Resolving configuration");
            let resolution = resolver.resolve()?;
            let rendered = format_resolution(&resolution, format);
            if rendered.ends_with('\n') {
                print!("{}", rendered);
            } else {
                println!("{}", rendered);
            }
        }
    }

    Ok(())
}
