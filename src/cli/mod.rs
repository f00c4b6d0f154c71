//! CLI command definitions for momo-config
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for resolved configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FormatArg {
    /// Human-readable text (default)
    #[default]
    Text,
    /// JSON document with `config` and `meta`
    Json,
}

/// Inspect how the momo plugin configuration resolves
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to resolve the project file from (default: current directory)
    #[arg(long, global = true)]
    pub cwd: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = FormatArg::Text, global = true)]
    pub format: FormatArg,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the resolved configuration and its provenance (default)
    Show,

    /// Print which source supplied each field
    Sources,

    /// Print a relaxed JSON file as strict JSON
    Strip {
        /// File to sanitize
        file: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_show() {
        let cli = Cli::parse_from(["momo-config"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.format, FormatArg::Text);
        assert_eq!(cli.log, "2");
        assert!(!cli.verbose);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["momo-config", "sources", "--cwd", "/tmp/x", "-f", "json"]);
        assert!(matches!(cli.command, Some(Command::Sources)));
        assert_eq!(cli.cwd.as_deref(), Some("/tmp/x"));
        assert_eq!(cli.format, FormatArg::Json);
    }

    #[test]
    fn test_strip_takes_file() {
        let cli = Cli::parse_from(["momo-config", "strip", "momo.jsonc"]);
        match cli.command {
            Some(Command::Strip { file }) => assert_eq!(file, PathBuf::from("momo.jsonc")),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
