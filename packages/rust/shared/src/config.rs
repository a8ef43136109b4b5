//! Application configuration for Minty.
//!
//! User config lives at `~/.minty/minty.toml`.
//! Defaults target a local IPFS daemon; CLI invocations read the file once
//! at startup and never mutate it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{MintyError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "minty.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".minty";

// ---------------------------------------------------------------------------
// Config structs (matching minty.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Content-addressable store settings.
    #[serde(default)]
    pub store: StoreConfig,
}

/// `[store]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// HTTP API endpoint of the store daemon.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Public gateway base used to render browsable links.
    #[serde(default = "default_gateway_url")]
    pub gateway_url: String,

    /// Timeout for store API calls, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            gateway_url: default_gateway_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_api_url() -> String {
    "http://localhost:5001".into()
}
fn default_gateway_url() -> String {
    "http://localhost:8080".into()
}
fn default_timeout_secs() -> u64 {
    30
}

impl StoreConfig {
    /// Parse the configured API endpoint into a [`Url`].
    pub fn api_url(&self) -> Result<Url> {
        Url::parse(&self.api_url)
            .map_err(|e| MintyError::config(format!("invalid store api_url '{}': {e}", self.api_url)))
    }

    /// Parse the configured gateway base into a [`Url`].
    pub fn gateway_url(&self) -> Result<Url> {
        Url::parse(&self.gateway_url).map_err(|e| {
            MintyError::config(format!("invalid store gateway_url '{}': {e}", self.gateway_url))
        })
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.minty/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| MintyError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.minty/minty.toml`).
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
    let content = std::fs::read_to_string(path).map_err(|e| MintyError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| MintyError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| MintyError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| MintyError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| MintyError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("api_url"));
        assert!(toml_str.contains("http://localhost:5001"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.store.timeout_secs, 30);
        assert_eq!(parsed.store.gateway_url, "http://localhost:8080");
    }

    #[test]
    fn config_with_overrides() {
        let toml_str = r#"
[store]
api_url = "http://ipfs.internal:5001"
timeout_secs = 5
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.store.api_url, "http://ipfs.internal:5001");
        assert_eq!(config.store.timeout_secs, 5);
        // Unset fields fall back to defaults
        assert_eq!(config.store.gateway_url, "http://localhost:8080");
    }

    #[test]
    fn api_url_parses_to_url() {
        let config = StoreConfig::default();
        let url = config.api_url().expect("parse api url");
        assert_eq!(url.port(), Some(5001));
    }

    #[test]
    fn malformed_api_url_is_config_error() {
        let config = StoreConfig {
            api_url: "not a url".into(),
            ..StoreConfig::default()
        };
        let err = config.api_url().unwrap_err();
        assert!(matches!(err, MintyError::Config { .. }));
    }
}
