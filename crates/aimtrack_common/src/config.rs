//! Aimtrack Configuration
//!
//! Loaded once at process start and injected into the clients; never mutated
//! afterwards. Credentials are not stored in the file: each section names the
//! environment variable holding its key.
//!
//! Discovery order:
//! 1. $AIMTRACK_CONFIG
//! 2. $XDG_CONFIG_HOME/aimtrack/config.toml
//! 3. ~/.config/aimtrack/config.toml
//!
//! A missing file means defaults.

use crate::llm_client::LlmConfig;
use crate::steam::{SteamConfig, CS2_APP_ID};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Remote report generation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmSettings {
    /// Base URL of an OpenAI-compatible API
    #[serde(default = "default_llm_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_llm_model")]
    pub model: String,

    /// Sampling temperature (valid: 0.0-2.0)
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Response length cap (valid: 1-4096)
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Request timeout in seconds (valid: 1-120)
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,

    /// Environment variable holding the API key
    #[serde(default = "default_llm_key_env")]
    pub api_key_env: String,
}

fn default_llm_endpoint() -> String {
    "https://api.openai.com".to_string()
}

fn default_llm_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_temperature() -> f64 {
    0.7
}

fn default_max_tokens() -> u32 {
    150
}

fn default_llm_timeout() -> u64 {
    15
}

fn default_llm_key_env() -> String {
    "LLM_API_KEY".to_string()
}

impl LlmSettings {
    pub fn effective_temperature(&self) -> f64 {
        self.temperature.clamp(0.0, 2.0)
    }

    pub fn effective_max_tokens(&self) -> u32 {
        self.max_tokens.clamp(1, 4096)
    }

    pub fn effective_timeout(&self) -> u64 {
        self.timeout_secs.clamp(1, 120)
    }

    /// Runtime client config with the key read from the environment
    pub fn client_config(&self) -> LlmConfig {
        LlmConfig {
            endpoint: self.endpoint.clone(),
            model: self.model.clone(),
            api_key: read_secret(&self.api_key_env),
            temperature: self.effective_temperature(),
            max_tokens: self.effective_max_tokens(),
            timeout_secs: self.effective_timeout(),
        }
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            endpoint: default_llm_endpoint(),
            model: default_llm_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_llm_timeout(),
            api_key_env: default_llm_key_env(),
        }
    }
}

/// Steam stats source settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SteamSettings {
    #[serde(default = "default_steam_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_app_id")]
    pub app_id: u32,

    /// Request timeout in seconds (valid: 1-120)
    #[serde(default = "default_steam_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_steam_key_env")]
    pub api_key_env: String,
}

fn default_steam_endpoint() -> String {
    SteamConfig::default().endpoint
}

fn default_app_id() -> u32 {
    CS2_APP_ID
}

fn default_steam_timeout() -> u64 {
    10
}

fn default_steam_key_env() -> String {
    "STEAM_API_KEY".to_string()
}

impl SteamSettings {
    pub fn client_config(&self) -> SteamConfig {
        SteamConfig {
            endpoint: self.endpoint.clone(),
            app_id: self.app_id,
            api_key: read_secret(&self.api_key_env),
            timeout_secs: self.timeout_secs.clamp(1, 120),
        }
    }
}

impl Default for SteamSettings {
    fn default() -> Self {
        Self {
            endpoint: default_steam_endpoint(),
            app_id: default_app_id(),
            timeout_secs: default_steam_timeout(),
            api_key_env: default_steam_key_env(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Complete Aimtrack configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TrackerConfig {
    #[serde(default)]
    pub llm: LlmSettings,

    #[serde(default)]
    pub steam: SteamSettings,

    #[serde(default)]
    pub log: LogConfig,
}

impl TrackerConfig {
    /// Load from the discovered path, defaults if no file exists
    pub fn load() -> Result<Self, ConfigError> {
        match config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load from an explicit path, which must exist
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Discover the config file path
pub fn config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("AIMTRACK_CONFIG") {
        return Some(PathBuf::from(path));
    }

    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg_config).join("aimtrack").join(CONFIG_FILE));
    }

    if let Ok(home) = std::env::var("HOME") {
        return Some(
            PathBuf::from(home)
                .join(".config")
                .join("aimtrack")
                .join(CONFIG_FILE),
        );
    }

    None
}

/// Read a secret from the environment; unset or blank means absent
fn read_secret(var: &str) -> Option<String> {
    std::env::var(var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
