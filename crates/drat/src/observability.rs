//! Logging and tracing setup for the CLI.
//!
//! Human-readable logs go to stderr. A JSONL log file is written as well
//! when a log location can be resolved, from (highest first):
//!
//! 1. `DRAT_LOG_PATH`: an explicit file
//! 2. `DRAT_LOG_DIR`: a directory, file `drat.jsonl`
//! 3. the configured `log_dir`
//! 4. the platform data directory (`.../drat/logs`)
//!
//! Stdout is never written to, so `drat serve` keeps it for the protocol.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

const LOG_PATH_VAR: &str = "DRAT_LOG_PATH";
const LOG_DIR_VAR: &str = "DRAT_LOG_DIR";
const LOG_FILE_NAME: &str = "drat.jsonl";

/// Where logs are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// JSONL log file, if any.
    pub log_file: Option<PathBuf>,
    /// Most detailed level shown on stderr.
    pub stderr_level: Option<LevelFilter>,
}

impl ObservabilityConfig {
    /// Resolve the log file from the environment, then `log_dir`, then the
    /// platform default.
    pub fn from_env_with_overrides(log_dir: Option<PathBuf>) -> Self {
        let platform_dir = drat_core::config::user_data_local_dir()
            .map(|dir| dir.join("logs").into_std_path_buf());
        Self {
            log_file: resolve_log_file(
                std::env::var_os(LOG_PATH_VAR).map(PathBuf::from),
                std::env::var_os(LOG_DIR_VAR).map(PathBuf::from),
                log_dir,
                platform_dir,
            ),
            stderr_level: None,
        }
    }

    /// Cap what reaches stderr; the log file still gets everything the
    /// filter lets through.
    #[must_use]
    pub const fn with_stderr_level(mut self, level: LevelFilter) -> Self {
        self.stderr_level = Some(level);
        self
    }
}

fn resolve_log_file(
    explicit: Option<PathBuf>,
    env_dir: Option<PathBuf>,
    config_dir: Option<PathBuf>,
    platform_dir: Option<PathBuf>,
) -> Option<PathBuf> {
    explicit.or_else(|| {
        env_dir
            .or(config_dir)
            .or(platform_dir)
            .map(|dir| dir.join(LOG_FILE_NAME))
    })
}

/// Build the log filter: `RUST_LOG` if set, otherwise the flags, otherwise
/// the configured level.
pub fn env_filter(quiet: bool, verbose: u8, level: &str) -> EnvFilter {
    if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some()
        && let Ok(filter) = EnvFilter::try_from_default_env()
    {
        return filter;
    }
    EnvFilter::new(filter_directive(quiet, verbose, level))
}

fn filter_directive(quiet: bool, verbose: u8, level: &str) -> &str {
    match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => level,
        (false, 1) => "debug",
        (false, _) => "trace",
    }
}

/// Most detailed level printed to stderr for the given flags.
pub const fn stderr_level(quiet: bool, verbose: u8) -> LevelFilter {
    match (quiet, verbose) {
        (true, _) => LevelFilter::ERROR,
        (false, 0) => LevelFilter::WARN,
        (false, _) => LevelFilter::TRACE,
    }
}

/// Keeps the background log writer alive; drop it to flush.
pub struct ObservabilityGuard {
    _file: Option<WorkerGuard>,
}

/// Install the global subscriber.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<ObservabilityGuard> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_filter(config.stderr_level.unwrap_or(LevelFilter::TRACE));

    // A log file that cannot be opened is not fatal: stderr logging remains.
    let (file_layer, file_guard) = match config.log_file.as_deref().and_then(open_log_file) {
        Some((writer, guard)) => (
            Some(fmt::layer().json().with_writer(writer)),
            Some(guard),
        ),
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("a global tracing subscriber is already installed")?;

    Ok(ObservabilityGuard { _file: file_guard })
}

fn open_log_file(path: &Path) -> Option<(NonBlocking, WorkerGuard)> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty())?;
    let file_name = path.file_name()?.to_str()?;
    std::fs::create_dir_all(dir).ok()?;
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(dir)
        .ok()?;
    Some(tracing_appender::non_blocking(appender))
}
