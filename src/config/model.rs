//! Configuration data model.
//!
//! All structs derive `Serialize`/`Deserialize` for TOML persistence.
//! Every field has a sensible default so the application works out of the box.

use crate::store::DEFAULT_STATE;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Work tab store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Save the tab list after every change and restore it on start.
    #[serde(default = "default_true")]
    pub persist: bool,
    /// Snapshot location. Defaults to `<data dir>/autoq/work_tabs.json`.
    #[serde(default)]
    pub state_file: Option<PathBuf>,
    #[serde(default = "default_state")]
    pub default_state: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            persist: true,
            state_file: None,
            default_state: default_state(),
        }
    }
}

impl StoreConfig {
    pub fn state_file_path(&self) -> PathBuf {
        match self.state_file {
            Some(ref path) => expand_home(&path.to_string_lossy()),
            None => super::data_dir().join("work_tabs.json"),
        }
    }
}

/// UI appearance and behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
    /// Activity lines kept before the oldest are dropped.
    #[serde(default = "default_max_activity")]
    pub max_activity: usize,
    #[serde(default = "default_status_timeout")]
    pub status_timeout_secs: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            timestamp_format: default_timestamp_format(),
            max_activity: default_max_activity(),
            status_timeout_secs: default_status_timeout(),
        }
    }
}

/// Diagnostics log settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    /// Filter directive, overridden by `RUST_LOG`.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_dir: default_log_dir(),
            level: default_log_level(),
        }
    }
}

impl LoggingConfig {
    pub fn log_dir_path(&self) -> PathBuf {
        expand_home(&self.log_dir)
    }
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix('~') {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest.trim_start_matches(['/', '\\']));
        }
    }
    PathBuf::from(path)
}

fn default_true() -> bool {
    true
}
fn default_state() -> String {
    DEFAULT_STATE.to_string()
}
fn default_title() -> String {
    "AutoQ".to_string()
}
fn default_timestamp_format() -> String {
    "%H:%M".to_string()
}
fn default_max_activity() -> usize {
    500
}
fn default_status_timeout() -> u64 {
    4
}
fn default_log_dir() -> String {
    "~/.local/share/autoq/logs".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
