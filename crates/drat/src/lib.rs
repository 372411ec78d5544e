//! Library interface for the `drat` CLI.
//!
//! This crate exposes the CLI's argument parser and command structure as a library,
//! primarily for documentation generation and testing. The actual entry point is
//! in `main.rs`.
//!
//! # Structure
//!
//! - [`Cli`] - The root argument parser (clap derive)
//! - [`Commands`] - Available subcommands
//! - [`commands`] - Command implementations
//!
//! # Documentation Generation
//!
//! The [`command()`] function returns the clap `Command` for generating man pages
//! and shell completions via `xtask`.

pub mod commands;

#[cfg(feature = "mcp")]
pub mod server;

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// Color output preference.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect terminal capabilities automatically.
    #[default]
    Auto,
    /// Always emit colors.
    Always,
    /// Never emit colors.
    Never,
}

impl ColorChoice {
    /// Configure global color output based on this choice.
    ///
    /// Call this once at startup to set the color mode.
    pub fn apply(self) {
        match self {
            Self::Auto => {} // owo-colors auto-detects by default
            Self::Always => owo_colors::set_override(true),
            Self::Never => owo_colors::set_override(false),
        }
    }
}

const ENV_HELP: &str = "\
ENVIRONMENT VARIABLES:
    RUST_LOG                 Log filter (e.g., debug, drat_core=trace)
    DRAT_LOG_PATH            Explicit log file path
    DRAT_LOG_DIR             Log directory
    DRAT_WORDLIST_DIR        Directory holding EN_function.txt and EN_vocab.txt
    DRAT_OUTPUT_DIR          Where report files are written
    DRAT_FETCH_TIMEOUT_SECS  Timeout for fetching URLs

With no INFILE, targets are read from stdin, one per line.
";

/// Command-line interface definition for drat.
#[derive(Parser)]
#[command(name = "drat")]
#[command(
    about = "Report the lexical density and uncommon words of documents and web pages",
    long_about = None
)]
#[command(version, args_conflicts_with_subcommands = true)]
#[command(after_long_help = ENV_HELP)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Documents to check (default command).
    #[command(flatten)]
    pub check: commands::check::CheckArgs,

    /// Print only the version number (for scripting)
    #[arg(long)]
    pub version_only: bool,

    /// Path to configuration file (overrides discovery)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Run as if started in DIR
    #[arg(short = 'C', long, global = true)]
    pub chdir: Option<PathBuf>,

    /// Only print errors (suppresses warnings/info)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// More detail (repeatable; e.g. -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Colorize output
    #[arg(long, global = true, value_enum, default_value_t)]
    pub color: ColorChoice,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,
}

/// Available subcommands for the CLI.
#[derive(Subcommand)]
pub enum Commands {
    /// Show package information and resolved configuration
    Info(commands::info::InfoArgs),

    /// Start MCP (Model Context Protocol) server on stdio
    #[cfg(feature = "mcp")]
    Serve(commands::serve::ServeArgs),
}

/// Returns the clap command for documentation generation
pub fn command() -> clap::Command {
    Cli::command()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        command().debug_assert();
    }

    #[test]
    fn positional_targets_parse_without_subcommand() {
        let cli = Cli::try_parse_from(["drat", "a.txt", "https://example.com", "-w", "extra.txt"])
            .unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.check.infile, vec!["a.txt", "https://example.com"]);
        assert_eq!(cli.check.wordlist.len(), 1);
    }

    #[test]
    fn subcommand_parses() {
        let cli = Cli::try_parse_from(["drat", "--json", "info"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Info(_))));
        assert!(cli.json);
    }
}
