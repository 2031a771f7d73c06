//! Application configuration for guidewatch.
//!
//! User config lives at `~/.guidewatch/guidewatch.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GuidewatchError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "guidewatch.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".guidewatch";

/// Official admissions pages scanned when no `--url` is given.
pub const DEFAULT_URLS: &[&str] = &["https://www.ist.osaka-u.ac.jp/japanese/examinees/admission/"];

/// Default baseline state file, relative to the working directory.
pub const DEFAULT_STATE_PATH: &str = ".guidewatch_state.json";

// ---------------------------------------------------------------------------
// Config structs (matching guidewatch.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Checker settings.
    #[serde(default)]
    pub watch: WatchConfig,

    /// Notifier delivery settings.
    #[serde(default)]
    pub telegram: TelegramConfig,
}

/// `[watch]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Page URLs to scan.
    #[serde(default = "default_urls")]
    pub urls: Vec<String>,

    /// Baseline state file path.
    #[serde(default = "default_state_path")]
    pub state_path: String,

    /// HTTP timeout per page fetch, in seconds.
    #[serde(default = "default_fetch_timeout")]
    pub timeout_secs: f64,

    /// Treat first-run findings as detected.
    #[serde(default)]
    pub alert_on_first_run: bool,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            urls: default_urls(),
            state_path: default_state_path(),
            timeout_secs: default_fetch_timeout(),
            alert_on_first_run: false,
        }
    }
}

fn default_urls() -> Vec<String> {
    DEFAULT_URLS.iter().map(|s| s.to_string()).collect()
}
fn default_state_path() -> String {
    DEFAULT_STATE_PATH.into()
}
fn default_fetch_timeout() -> f64 {
    20.0
}

/// `[telegram]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// HTTP timeout per delivery attempt, in seconds.
    #[serde(default = "default_send_timeout")]
    pub timeout_secs: u64,

    /// Delivery attempts before giving up.
    #[serde(default = "default_retries")]
    pub retries: u32,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_send_timeout(),
            retries: default_retries(),
        }
    }
}

fn default_send_timeout() -> u64 {
    20
}
fn default_retries() -> u32 {
    3
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.guidewatch/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| GuidewatchError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.guidewatch/guidewatch.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| GuidewatchError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        GuidewatchError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

// ---------------------------------------------------------------------------
// Environment helpers
// ---------------------------------------------------------------------------

/// Read a boolean flag from the environment.
///
/// Truthy values are `1`, `true`, `yes`, `on` (case-insensitive, trimmed);
/// anything else is false. An unset variable yields `default`.
pub fn env_flag(name: &str, default: bool) -> bool {
    match std::env::var(name) {
        Ok(raw) => matches!(raw.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        Err(_) => default,
    }
}

/// Read a required, non-empty environment variable.
///
/// Absence is a configuration error, not a crash.
pub fn required_env(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(val) if !val.trim().is_empty() => Ok(val.trim().to_string()),
        _ => Err(GuidewatchError::config(format!(
            "{name} is not set. Set the {name} environment variable."
        ))),
    }
}
