//! Client configuration.
//!
//! Loaded from `<config_dir>/parlo/config.toml` with serde defaults,
//! so a missing file or a partial file both yield a working
//! configuration. `PARLO_GATEWAY_URL` overrides the gateway URL for
//! local development against a non-default replica.

use parlo_core::error::{ParloError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = "parlo";
const CONFIG_FILE: &str = "config.toml";
const GATEWAY_URL_ENV: &str = "PARLO_GATEWAY_URL";

fn default_gateway_url() -> String {
    "http://localhost:4943".to_string()
}

/// Settings for reaching the remote speaking-practice service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Base URL of the gateway
    #[serde(default = "default_gateway_url")]
    pub gateway_url: String,
    /// Bearer token attached to every request, if the caller is
    /// authenticated
    #[serde(default)]
    pub auth_token: Option<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            gateway_url: default_gateway_url(),
            auth_token: None,
        }
    }
}

impl GatewayConfig {
    /// Loads the configuration from the default location.
    ///
    /// A missing file yields the defaults; a malformed file is a
    /// configuration error. The `PARLO_GATEWAY_URL` environment
    /// variable, when set, wins over both.
    pub fn load() -> Result<Self> {
        let config = match Self::default_path() {
            Some(path) if path.exists() => Self::load_from_path(&path)?,
            _ => Self::default(),
        };
        Ok(config.with_env_overrides())
    }

    /// Loads the configuration from an explicit path.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ParloError::config(format!("cannot read {}: {e}", path.display())))?;
        toml::from_str(&raw)
            .map_err(|e| ParloError::config(format!("cannot parse {}: {e}", path.display())))
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(GATEWAY_URL_ENV) {
            if !url.trim().is_empty() {
                self.gateway_url = url;
            }
        }
        self
    }

    fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }
}
