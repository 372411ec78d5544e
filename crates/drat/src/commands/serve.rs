//! Serve command: run the MCP server on stdio.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use drat_core::config::Config;
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use tracing::{info, instrument};

use super::load_word_sets;
use crate::server::DratServer;

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Supplementary word list merged into the common vocabulary (repeatable)
    #[arg(short, long, value_name = "FILE")]
    pub wordlist: Vec<Utf8PathBuf>,
}

/// Load the word sets once and serve MCP requests until stdin closes.
///
/// Stdout carries the protocol; all logging goes to stderr or the log file.
#[instrument(name = "cmd_serve", skip_all)]
pub async fn cmd_serve(args: ServeArgs, config: &Config) -> anyhow::Result<()> {
    let words = load_word_sets(config, &args.wordlist)?;
    info!(
        function_words = words.function_len(),
        common_words = words.common_len(),
        "starting MCP server on stdio"
    );

    let service = DratServer::new(words)
        .serve(stdio())
        .await
        .context("failed to start MCP server")?;
    let reason = service.waiting().await.context("MCP server task failed")?;

    info!(?reason, "MCP server stopped");
    Ok(())
}
