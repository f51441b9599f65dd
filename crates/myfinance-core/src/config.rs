//! Configuration loading
//!
//! Resolution order:
//! 1. An explicit path (`--config`), which must exist
//! 2. `<config dir>/myfinance/config.toml`, if present
//! 3. The embedded default (`config/myfinance.toml`)
//!
//! Environment variables are applied on top of whichever file was used.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

const DEFAULT_CONFIG: &str = include_str!("../../../config/myfinance.toml");

pub const ENV_API_URL: &str = "MYFINANCE_API_URL";
pub const ENV_API_TOKEN: &str = "MYFINANCE_API_TOKEN";
pub const ENV_API_KEYS: &str = "MYFINANCE_API_KEYS";
pub const ENV_ALLOWED_ORIGINS: &str = "MYFINANCE_ALLOWED_ORIGINS";

/// Remote backend connection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            token: None,
            timeout_secs: 30,
        }
    }
}

/// Local API server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Empty disables authentication
    pub api_keys: Vec<String>,
    /// Empty restricts CORS to same-origin
    pub allowed_origins: Vec<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            api_keys: Vec::new(),
            allowed_origins: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend: BackendConfig,
    pub server: ServerSettings,
}

/// User override location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("myfinance").join("config.toml"))
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl Config {
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load from file layers, then apply process environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = Self::load_file(path)?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load from file layers only
    pub fn load_file(path: Option<&Path>) -> Result<Self> {
        let content = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                debug!(path = %path.display(), "Loading config");
                fs::read_to_string(path)?
            }
            None => match default_config_path().filter(|p| p.exists()) {
                Some(default_path) => {
                    debug!(path = %default_path.display(), "Loading user config");
                    fs::read_to_string(&default_path)?
                }
                None => DEFAULT_CONFIG.to_string(),
            },
        };

        Self::parse(&content)
    }

    /// Apply `MYFINANCE_*` overrides using the given lookup
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.is_empty()) {
            self.backend.base_url = url;
        }
        if let Some(token) = lookup(ENV_API_TOKEN).filter(|v| !v.is_empty()) {
            self.backend.token = Some(token);
        }
        if let Some(keys) = lookup(ENV_API_KEYS) {
            self.server.api_keys = split_list(&keys);
        }
        if let Some(origins) = lookup(ENV_ALLOWED_ORIGINS) {
            self.server.allowed_origins = split_list(&origins);
        }
    }
}
