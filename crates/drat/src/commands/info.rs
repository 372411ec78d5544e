//! Info command implementation

use clap::Args;
use drat_core::config::{Config, ConfigSources};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

/// Arguments for the `info` subcommand.
#[derive(Args, Debug, Default)]
pub struct InfoArgs {
    // No subcommand-specific arguments; uses global --json flag
}

#[derive(Serialize)]
struct PackageInfo {
    name: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    license: &'static str,
}

impl PackageInfo {
    const fn new() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            description: env!("CARGO_PKG_DESCRIPTION"),
            license: env!("CARGO_PKG_LICENSE"),
        }
    }
}

#[derive(Serialize)]
struct ConfigInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    config_file: Option<String>,
    log_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_dir: Option<String>,
    word_lists: String,
    supplementary_lists: Vec<String>,
    output_dir: String,
    fetch_timeout_secs: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_input_bytes: Option<usize>,
}

impl ConfigInfo {
    fn from_config(config: &Config, sources: &ConfigSources) -> Self {
        Self {
            config_file: sources.primary_file().map(|p| p.to_string()),
            log_level: config.log_level.as_str().to_string(),
            log_dir: config.log_dir.as_ref().map(|p| p.to_string()),
            word_lists: config
                .wordlist_dir
                .as_ref()
                .map_or_else(|| "built-in".to_string(), |p| p.to_string()),
            supplementary_lists: config
                .wordlists
                .iter()
                .flatten()
                .map(|p| p.to_string())
                .collect(),
            output_dir: config
                .output_dir
                .as_ref()
                .map_or_else(|| ".".to_string(), |p| p.to_string()),
            fetch_timeout_secs: config.fetch_timeout().as_secs(),
            max_input_bytes: config.input_limit(),
        }
    }
}

#[derive(Serialize)]
struct FullInfo {
    #[serde(flatten)]
    package: PackageInfo,
    config: ConfigInfo,
}

/// Print package information
///
/// # Arguments
/// * `global_json` - Global `--json` flag from CLI
/// * `config` - Loaded configuration
/// * `sources` - Config source metadata from loading
#[instrument(name = "cmd_info", skip_all, fields(json_output))]
pub fn cmd_info(
    _args: InfoArgs,
    global_json: bool,
    config: &Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    debug!(json_output = global_json, "executing info command");

    let full_info = FullInfo {
        package: PackageInfo::new(),
        config: ConfigInfo::from_config(config, sources),
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&full_info)?);
        return Ok(());
    }

    println!(
        "{} {}",
        full_info.package.name.bold(),
        full_info.package.version.green()
    );
    if !full_info.package.description.is_empty() {
        println!("{}", full_info.package.description);
    }
    if !full_info.package.license.is_empty() {
        println!("{}: {}", "License".dimmed(), full_info.package.license);
    }

    let cfg = &full_info.config;
    println!();
    println!("{}", "Configuration".bold().underline());
    if let Some(ref path) = cfg.config_file {
        println!("{}: {}", "Config file".dimmed(), path.cyan());
    } else {
        println!("{}: {}", "Config file".dimmed(), "none loaded".yellow());
    }
    println!("{}: {}", "Log level".dimmed(), cfg.log_level);
    if let Some(ref dir) = cfg.log_dir {
        println!("{}: {}", "Log directory".dimmed(), dir);
    }

    println!();
    println!("{}", "Analysis".bold().underline());
    println!("{}: {}", "Word lists".dimmed(), cfg.word_lists);
    if cfg.supplementary_lists.is_empty() {
        println!("{}: {}", "Supplementary".dimmed(), "(none)".dimmed());
    } else {
        println!(
            "{}: {}",
            "Supplementary".dimmed(),
            cfg.supplementary_lists.join(", ")
        );
    }
    println!("{}: {}", "Output directory".dimmed(), cfg.output_dir);
    println!("{}: {}s", "Fetch timeout".dimmed(), cfg.fetch_timeout_secs);
    match cfg.max_input_bytes {
        Some(max) => println!("{}: {} bytes", "Input limit".dimmed(), max),
        None => println!("{}: {}", "Input limit".dimmed(), "disabled".yellow()),
    }

    Ok(())
}
