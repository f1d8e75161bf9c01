//! Application configuration for Docstitch.
//!
//! User config lives at `~/.docstitch/docstitch.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DocstitchError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "docstitch.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".docstitch";

// ---------------------------------------------------------------------------
// Config structs (matching docstitch.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Docs root directory containing `_sidebar.md`.
    #[serde(default = "default_root")]
    pub root: String,

    /// Homepage file substituted for empty or `/` sidebar targets.
    /// Relative paths resolve against the docs root.
    #[serde(default = "default_homepage")]
    pub homepage: String,

    /// Output path for the merged document.
    #[serde(default = "default_output")]
    pub output: String,

    /// Strategy for headings deeper than the configured levels.
    #[serde(default = "default_unconfigured_strategy")]
    pub unconfigured_strategy: String,

    /// Strategy for headings deeper than level six.
    #[serde(default = "default_overflow_strategy")]
    pub overflow_strategy: String,

    /// Language for user-facing messages ("en" or "zh").
    #[serde(default = "default_language")]
    pub language: String,

    /// Optional path to a JSON file with serial-strip patterns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strip_config: Option<String>,

    /// Optional path to a JSON file with serial level configs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub levels_config: Option<String>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            homepage: default_homepage(),
            output: default_output(),
            unconfigured_strategy: default_unconfigured_strategy(),
            overflow_strategy: default_overflow_strategy(),
            language: default_language(),
            strip_config: None,
            levels_config: None,
        }
    }
}

fn default_root() -> String {
    "./docs".into()
}
fn default_homepage() -> String {
    "./README.md".into()
}
fn default_output() -> String {
    "./merged.md".into()
}
fn default_unconfigured_strategy() -> String {
    "normal".into()
}
fn default_overflow_strategy() -> String {
    "cite".into()
}
fn default_language() -> String {
    "en".into()
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.docstitch/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| DocstitchError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.docstitch/docstitch.toml`).
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
    let content = std::fs::read_to_string(path).map_err(|e| DocstitchError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        DocstitchError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| DocstitchError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| DocstitchError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| DocstitchError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
