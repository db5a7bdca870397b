//! Configuration management for fact checking.
//!
//! Loads settings from `$FACTCHECK_CONFIG` or `<config dir>/factcheck/config.toml`,
//! falling back to defaults. The API token itself never lives in the file: the
//! file names the environment variable it is read from.

use crate::error::ConfigError;
use crate::interpret::{ExtractionMode, ScorePolicy};
use crate::session::StaleReplyPolicy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "FACTCHECK_CONFIG";

pub const DEFAULT_ENDPOINT: &str = "https://api.perplexity.ai/chat/completions";

pub const DEFAULT_API_KEY_ENV: &str = "PERPLEXITY_API_KEY";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactCheckConfig {
    /// Chat-completion endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Environment variable holding the bearer token
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Request timeout; unset leaves the HTTP client default in place
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    #[serde(default)]
    pub score_policy: ScorePolicy,

    #[serde(default)]
    pub extraction: ExtractionMode,

    #[serde(default)]
    pub stale_reply: StaleReplyPolicy,
}

/// Where the effective config came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// No config location could be determined
    Defaults,
    NotFound(PathBuf),
    File(PathBuf),
    /// The file exists but could not be read or parsed
    Invalid(PathBuf, ConfigError),
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

impl Default for FactCheckConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key_env: default_api_key_env(),
            timeout_secs: None,
            score_policy: ScorePolicy::default(),
            extraction: ExtractionMode::default(),
            stale_reply: StaleReplyPolicy::default(),
        }
    }
}

impl FactCheckConfig {
    /// Config file path: `$FACTCHECK_CONFIG`, else the per-user config dir
    pub fn default_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            if !path.trim().is_empty() {
                return Some(PathBuf::from(path));
            }
        }
        dirs::config_dir().map(|dir| dir.join("factcheck").join("config.toml"))
    }

    /// Load config, using defaults when no file is readable
    pub fn load() -> Self {
        Self::load_with_source(Self::default_path()).0
    }

    /// Load config from `path`, reporting which source was used
    pub fn load_with_source(path: Option<PathBuf>) -> (Self, ConfigSource) {
        let Some(path) = path else {
            warn!("No config directory available, using defaults");
            return (Self::default(), ConfigSource::Defaults);
        };
        if !path.exists() {
            return (Self::default(), ConfigSource::NotFound(path));
        }
        match Self::load_from_path(&path) {
            Ok(config) => (config, ConfigSource::File(path)),
            Err(e) => {
                warn!("Config not usable, using defaults: {}", e);
                (Self::default(), ConfigSource::Invalid(path, e))
            }
        }
    }

    /// Load config from specific path
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config: FactCheckConfig = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Write the default config to path (for `config --init`)
    pub fn save_default(path: &Path) -> Result<(), ConfigError> {
        let write_err = |e: String| ConfigError::Write {
            path: path.display().to_string(),
            reason: e,
        };
        let content =
            toml::to_string_pretty(&Self::default()).map_err(|e| write_err(e.to_string()))?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| write_err(e.to_string()))?;
        }
        fs::write(path, content).map_err(|e| write_err(e.to_string()))?;
        info!("Saved default config to {}", path.display());
        Ok(())
    }

    /// Read the API token from the process environment
    pub fn api_token(&self) -> Result<ApiToken, ConfigError> {
        self.api_token_with(|var| std::env::var(var).ok())
    }

    /// Read the API token through an arbitrary lookup
    pub fn api_token_with<F>(&self, lookup: F) -> Result<ApiToken, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(&self.api_key_env) {
            Some(value) if !value.trim().is_empty() => Ok(ApiToken(value.trim().to_string())),
            _ => Err(ConfigError::MissingToken {
                var: self.api_key_env.clone(),
            }),
        }
    }
}

/// Bearer token for the chat-completion endpoint. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(***)")
    }
}
