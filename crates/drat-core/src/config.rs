//! Settings for word lists, report output, input limits and logging.
//!
//! Values come from defaults, a per-user file, the nearest project file
//! (searched upward from the working directory, stopping at a `.git`
//! boundary), files named with `--config`, and `DRAT_*` variables. Files may
//! be TOML, YAML or JSON.
//!
//! # Precedence (highest first)
//! - `DRAT_*` environment variables
//! - files passed explicitly (`--config`)
//! - `drat.<ext>` in current directory or any parent
//! - `.drat.<ext>` in current directory or any parent
//! - `~/.config/drat/config.<ext>` (user config)
//!
//! When multiple files exist in the same directory, all are merged via figment.
//! Later extensions override earlier: toml < yaml < yml < json.
//!
//! # Example
//! ```no_run
//! use camino::Utf8PathBuf;
//! use drat_core::config::ConfigLoader;
//!
//! let cwd = std::env::current_dir().unwrap();
//! let cwd = Utf8PathBuf::try_from(cwd).expect("current directory is not valid UTF-8");
//! let (config, _sources) = ConfigLoader::new()
//!     .with_project_search(&cwd)
//!     .load()
//!     .unwrap();
//! println!("reports go to {:?}", config.output_dir);
//! ```

use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Default cap on the size of a single input document (5 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;

/// Default timeout for fetching a URL, in seconds.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// The configuration for drat.
///
/// Deserialized from config files found during discovery (TOML, YAML, or
/// JSON) and from `DRAT_*` environment variables.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Log level for the application (e.g., "debug", "info", "warn", "error").
    pub log_level: LogLevel,
    /// Directory for JSONL log files (falls back to platform defaults if unset).
    pub log_dir: Option<Utf8PathBuf>,
    /// Directory holding `EN_function.txt` and `EN_vocab.txt`.
    ///
    /// When unset, the lists compiled into the binary are used.
    pub wordlist_dir: Option<Utf8PathBuf>,
    /// Supplementary word lists merged into the common vocabulary.
    pub wordlists: Option<Vec<Utf8PathBuf>>,
    /// Directory report files are written to (default: current directory).
    pub output_dir: Option<Utf8PathBuf>,
    /// Timeout for fetching a URL, in seconds (default: 30).
    pub fetch_timeout_secs: Option<u64>,
    /// Maximum input size in bytes (default: 5 MiB).
    ///
    /// Applies to local files and downloaded pages alike. Use
    /// `disable_input_limit` to remove the limit entirely.
    pub max_input_bytes: Option<usize>,
    /// Disable the input size limit entirely.
    ///
    /// When `true`, `max_input_bytes` is ignored and no size check is performed.
    pub disable_input_limit: bool,
}

impl Config {
    /// The effective per-document size limit, or `None` when disabled.
    pub fn input_limit(&self) -> Option<usize> {
        if self.disable_input_limit {
            None
        } else {
            Some(self.max_input_bytes.unwrap_or(DEFAULT_MAX_INPUT_BYTES))
        }
    }

    /// The effective URL fetch timeout.
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(
            self.fetch_timeout_secs
                .unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS),
        )
    }
}

/// Log level configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Verbose output for debugging and development.
    Debug,
    /// Standard operational information (default).
    #[default]
    Info,
    /// Warnings about potential issues.
    Warn,
    /// Errors that indicate failures.
    Error,
}

impl LogLevel {
    /// Returns the log level as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Metadata about which configuration sources were loaded.
///
/// Returned alongside [`Config`] from [`ConfigLoader::load()`] so commands
/// can report the actual config files without re-discovering them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigSources {
    /// Project config files found by walking up, ordered low→high precedence.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub project_files: Vec<Utf8PathBuf>,
    /// User config file from XDG config directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_file: Option<Utf8PathBuf>,
    /// Explicit config files loaded (e.g., from `--config` flag).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigSources {
    /// Returns the highest-precedence config file that was loaded.
    ///
    /// Precedence: explicit files > project files > user file.
    pub fn primary_file(&self) -> Option<&Utf8Path> {
        self.explicit_files
            .last()
            .map(Utf8PathBuf::as_path)
            .or_else(|| self.project_files.last().map(Utf8PathBuf::as_path))
            .or(self.user_file.as_deref())
    }
}

/// Supported configuration file extensions (in order of preference).
const CONFIG_EXTENSIONS: &[&str] = &["toml", "yaml", "yml", "json"];

/// Application name for XDG directory lookup and config file names.
const APP_NAME: &str = "drat";

/// The upward search stops at a directory containing this entry.
const BOUNDARY_MARKER: &str = ".git";

/// Collects config sources and merges them into a [`Config`].
#[derive(Debug, Default)]
pub struct ConfigLoader {
    /// Starting directory for project config search.
    project_search_root: Option<Utf8PathBuf>,
    /// Whether to include user config from XDG directory.
    include_user_config: bool,
    /// Files named with `--config`.
    explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigLoader {
    /// A loader that reads the user config and no project or explicit files.
    pub fn new() -> Self {
        Self {
            project_search_root: None,
            include_user_config: true,
            explicit_files: Vec::new(),
        }
    }

    /// Set the starting directory for project config search.
    ///
    /// The loader will walk up from this directory looking for config files.
    pub fn with_project_search<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.project_search_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set whether to include user config from `~/.config/drat/`.
    pub const fn with_user_config(mut self, include: bool) -> Self {
        self.include_user_config = include;
        self
    }

    /// Add an explicit config file to load.
    ///
    /// Files are loaded in order, with later files taking precedence.
    /// Explicit files are loaded after discovered files.
    pub fn with_file<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.explicit_files.push(path.as_ref().to_path_buf());
        self
    }

    /// Load configuration, merging all discovered sources.
    ///
    /// Precedence (highest to lowest):
    /// 1. `DRAT_*` environment variables
    /// 2. Explicit files (in order added via `with_file`)
    /// 3. Project config (closest to search root)
    /// 4. User config (`~/.config/drat/config.<ext>`)
    /// 5. Default values
    #[tracing::instrument(skip(self), fields(search_root = ?self.project_search_root))]
    pub fn load(self) -> ConfigResult<(Config, ConfigSources)> {
        tracing::debug!("loading configuration");
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        let mut sources = ConfigSources::default();

        if self.include_user_config
            && let Some(user_config) = Self::find_user_config()
        {
            figment = Self::merge_file(figment, &user_config);
            sources.user_file = Some(user_config);
        }

        if let Some(ref root) = self.project_search_root {
            let project_configs = Self::find_project_configs(root);
            for pc in &project_configs {
                figment = Self::merge_file(figment, pc);
            }
            sources.project_files = project_configs;
        }

        for file in &self.explicit_files {
            figment = Self::merge_file(figment, file);
        }
        sources.explicit_files = self.explicit_files;

        // DRAT_OUTPUT_DIR=reports, DRAT_FETCH_TIMEOUT_SECS=5, etc.
        figment = figment.merge(Env::prefixed("DRAT_").lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| ConfigError::Deserialize(Box::new(e)))?;
        tracing::info!(
            log_level = config.log_level.as_str(),
            wordlist_dir = ?config.wordlist_dir,
            "configuration loaded"
        );
        Ok((config, sources))
    }

    /// Find project config files by walking up from the given directory.
    ///
    /// Returns all matching config files from the closest directory that has
    /// any match, dotfiles before regular files. The walk ends at the first
    /// directory above `start` that holds a `.git` entry.
    fn find_project_configs(start: &Utf8Path) -> Vec<Utf8PathBuf> {
        let mut current = Some(start.to_path_buf());

        while let Some(dir) = current {
            let mut found = Vec::new();

            for ext in CONFIG_EXTENSIONS {
                let dotfile = dir.join(format!(".{APP_NAME}.{ext}"));
                if dotfile.is_file() {
                    found.push(dotfile);
                }
            }
            for ext in CONFIG_EXTENSIONS {
                let regular = dir.join(format!("{APP_NAME}.{ext}"));
                if regular.is_file() {
                    found.push(regular);
                }
            }

            if !found.is_empty() {
                return found;
            }

            // Checked after the config files so a config next to the marker is found.
            if dir != start && dir.join(BOUNDARY_MARKER).exists() {
                break;
            }

            current = dir.parent().map(Utf8Path::to_path_buf);
        }

        Vec::new()
    }

    /// Find user config in XDG config directory.
    fn find_user_config() -> Option<Utf8PathBuf> {
        let config_dir = user_config_dir()?;
        CONFIG_EXTENSIONS
            .iter()
            .map(|ext| config_dir.join(format!("config.{ext}")))
            .find(|path| path.is_file())
    }

    /// Merge a config file into the figment, detecting format from extension.
    fn merge_file(figment: Figment, path: &Utf8Path) -> Figment {
        match path.extension() {
            Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path.as_str())),
            Some("json") => figment.merge(Json::file_exact(path.as_str())),
            _ => figment.merge(Toml::file_exact(path.as_str())),
        }
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", APP_NAME)
}

/// Get the user config directory path.
///
/// Returns `~/.config/drat/` on Linux, `~/Library/Application Support/drat/`
/// on macOS, and equivalent on other platforms.
pub fn user_config_dir() -> Option<Utf8PathBuf> {
    let proj_dirs = project_dirs()?;
    Utf8PathBuf::from_path_buf(proj_dirs.config_dir().to_path_buf()).ok()
}

/// Get the local data directory path (machine-specific, not synced).
///
/// Used as the default home for JSONL log files.
pub fn user_data_local_dir() -> Option<Utf8PathBuf> {
    let proj_dirs = project_dirs()?;
    Utf8PathBuf::from_path_buf(proj_dirs.data_local_dir().to_path_buf()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Serializes tests that mutate environment variables via `set_var`/`remove_var`.
    static TEST_ENV_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(config.log_dir.is_none());
        assert!(config.wordlist_dir.is_none());
        assert_eq!(config.input_limit(), Some(DEFAULT_MAX_INPUT_BYTES));
        assert_eq!(config.fetch_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_loader_builds_with_defaults() {
        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .load()
            .unwrap();
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(sources.primary_file().is_none());
    }

    #[test]
    fn test_single_file_overrides_default() {
        let _lock = TEST_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        fs::write(
            &config_path,
            r#"log_level = "debug"
output_dir = "/tmp/drat-reports"
fetch_timeout_secs = 5
wordlists = ["extra.txt", "names.txt"]
"#,
        )
        .unwrap();
        let config_path = Utf8PathBuf::try_from(config_path).unwrap();

        let (config, _sources) = ConfigLoader::new()
            .with_user_config(false)
            .with_file(&config_path)
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(
            config.output_dir.as_ref().map(|dir| dir.as_str()),
            Some("/tmp/drat-reports")
        );
        assert_eq!(config.fetch_timeout(), Duration::from_secs(5));
        assert_eq!(config.wordlists.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn test_later_file_overrides_earlier() {
        let tmp = TempDir::new().unwrap();

        let base_config = tmp.path().join("base.toml");
        fs::write(&base_config, r#"log_level = "warn""#).unwrap();
        let override_config = tmp.path().join("override.toml");
        fs::write(&override_config, r#"log_level = "error""#).unwrap();

        let base_config = Utf8PathBuf::try_from(base_config).unwrap();
        let override_config = Utf8PathBuf::try_from(override_config).unwrap();

        let (config, _sources) = ConfigLoader::new()
            .with_user_config(false)
            .with_file(&base_config)
            .with_file(&override_config)
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Error);
    }

    #[test]
    fn test_project_config_discovery() {
        let tmp = TempDir::new().unwrap();
        let project_dir = tmp.path().join("project");
        let sub_dir = project_dir.join("src").join("deep");
        fs::create_dir_all(&sub_dir).unwrap();
        fs::write(project_dir.join(".drat.toml"), r#"log_level = "debug""#).unwrap();

        let sub_dir = Utf8PathBuf::try_from(sub_dir).unwrap();

        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .with_project_search(&sub_dir)
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Debug);
        assert!(!sources.project_files.is_empty());
    }

    #[test]
    fn test_boundary_marker_stops_search() {
        let tmp = TempDir::new().unwrap();
        let parent = tmp.path().join("parent");
        let child = parent.join("child");
        let work = child.join("work");
        fs::create_dir_all(&work).unwrap();

        fs::write(parent.join(".drat.toml"), r#"log_level = "warn""#).unwrap();
        fs::create_dir(child.join(".git")).unwrap();

        let work = Utf8PathBuf::try_from(work).unwrap();

        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .with_project_search(&work)
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Info);
        assert!(sources.project_files.is_empty());
    }

    #[test]
    fn test_explicit_file_overrides_project_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".drat.toml"), r#"log_level = "warn""#).unwrap();
        let override_config = tmp.path().join("override.toml");
        fs::write(&override_config, r#"log_level = "error""#).unwrap();

        let tmp_path = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let override_config = Utf8PathBuf::try_from(override_config).unwrap();

        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .with_project_search(&tmp_path)
            .with_file(&override_config)
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Error);
        assert!(!sources.project_files.is_empty());
        assert_eq!(sources.explicit_files.len(), 1);
        assert_eq!(sources.primary_file(), Some(override_config.as_path()));
    }

    #[test]
    fn test_user_config_dir() {
        if let Some(path) = user_config_dir() {
            assert!(path.as_str().contains("drat"));
        }
    }

    #[test]
    fn disable_input_limit_overrides_max_bytes() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        fs::write(
            &config_path,
            "max_input_bytes = 1024\ndisable_input_limit = true\n",
        )
        .unwrap();
        let config_path = Utf8PathBuf::try_from(config_path).unwrap();

        let (config, _sources) = ConfigLoader::new()
            .with_user_config(false)
            .with_file(&config_path)
            .load()
            .unwrap();

        assert_eq!(config.max_input_bytes, Some(1024));
        assert_eq!(config.input_limit(), None);
    }

    #[test]
    fn max_input_bytes_applies_when_enabled() {
        let config = Config {
            max_input_bytes: Some(64),
            ..Config::default()
        };
        assert_eq!(config.input_limit(), Some(64));
    }

    #[test]
    fn yaml_config_parses_wordlists() {
        let yaml = "wordlist_dir: /usr/share/drat\nwordlists:\n  - names.txt\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            config.wordlist_dir.as_ref().map(|d| d.as_str()),
            Some("/usr/share/drat")
        );
        assert_eq!(
            config.wordlists,
            Some(vec![Utf8PathBuf::from("names.txt")])
        );
    }

    #[test]
    fn dotfile_before_regular() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".drat.toml"), r#"log_level = "debug""#).unwrap();
        fs::write(tmp.path().join("drat.toml"), r#"log_level = "error""#).unwrap();

        let tmp_path = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();

        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .with_project_search(&tmp_path)
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(sources.project_files.len(), 2);
    }

    #[test]
    fn only_closest_directory_contributes() {
        let _lock = TEST_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let tmp = TempDir::new().unwrap();
        let parent = tmp.path().join("parent");
        let child = parent.join("child");
        fs::create_dir_all(&child).unwrap();

        fs::write(parent.join(".drat.toml"), "fetch_timeout_secs = 9\n").unwrap();
        fs::write(child.join("drat.yaml"), "log_level: error\n").unwrap();

        let child_path = Utf8PathBuf::try_from(child).unwrap();

        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .with_project_search(&child_path)
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(config.fetch_timeout_secs, None);
        assert_eq!(sources.project_files.len(), 1);
    }

    #[test]
    #[allow(unsafe_code)]
    fn test_env_var_overrides_file_config() {
        let _lock = TEST_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        fs::write(&config_path, "fetch_timeout_secs = 10\n").unwrap();
        let config_path = Utf8PathBuf::try_from(config_path).unwrap();

        // SAFETY: Test environment, mutex serializes env access across tests.
        unsafe {
            std::env::set_var("DRAT_FETCH_TIMEOUT_SECS", "3");
        }

        let (config, _sources) = ConfigLoader::new()
            .with_user_config(false)
            .with_file(&config_path)
            .load()
            .unwrap();

        assert_eq!(config.fetch_timeout_secs, Some(3));

        // SAFETY: Cleanup after test.
        unsafe {
            std::env::remove_var("DRAT_FETCH_TIMEOUT_SECS");
        }
    }
}
