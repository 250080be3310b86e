//! Configuration management for the explainer
//!
//! The API key comes from the `GROQ_API_KEY` environment variable, or from a
//! `.env` file in the working directory, and is read once at startup.
//! Variables already in the environment win over the file. Everything else has a default and can be set in
//! `~/.config/code-explainer/config.toml`:
//!
//! ```toml
//! model = "llama-3.1-8b-instant"
//! endpoint = "https://api.groq.com/openai/v1/chat/completions"
//! temperature = 0.2
//! timeout_secs = 60
//! log_level = "debug"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const API_KEY_ENV: &str = "GROQ_API_KEY";
pub const MODEL_ENV: &str = "EXPLAINER_MODEL";
/// Dotenv file looked up in the working directory
pub const ENV_FILE: &str = ".env";

/// Directory name under the platform config/cache dirs
pub const APP_DIR: &str = "code-explainer";

pub const DEFAULT_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";
/// Low temperature biases the model toward deterministic, structured output
pub const DEFAULT_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("GROQ_API_KEY is not set. Export your API key or add it to ./.env before starting:\n    export GROQ_API_KEY=\"your-key-here\"")]
    MissingApiKey,

    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Config file {} is not valid TOML: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("temperature must be between 0 and 2, got {0}")]
    InvalidTemperature(f32),

    #[error("timeout_secs must be greater than zero")]
    InvalidTimeout,
}

/// Optional settings from the config file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub model: Option<String>,
    pub endpoint: Option<String>,
    pub temperature: Option<f32>,
    pub timeout_secs: Option<u64>,
    pub log_level: Option<String>,
}

impl Settings {
    /// Load from `path`; a missing file means defaults
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Command-line overrides, highest precedence
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub model: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// API key that never shows up in `Debug` output or logs
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(****)")
    }
}

/// Variables from a dotenv file, consulted after the process environment
#[derive(Debug, Clone, Default)]
pub struct EnvFile {
    vars: HashMap<String, String>,
}

impl EnvFile {
    /// A missing or unreadable file is treated as empty; malformed lines are skipped
    pub fn load_from(path: &Path) -> Self {
        let vars = match dotenvy::from_path_iter(path) {
            Ok(iter) => iter.filter_map(Result::ok).collect(),
            Err(_) => HashMap::new(),
        };
        Self { vars }
    }

    /// Value defined in the file itself
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Process environment first, then the file
    pub fn var(&self, name: &str) -> Option<String> {
        std::env::var(name)
            .ok()
            .or_else(|| self.get(name).map(str::to_string))
    }
}

/// Resolved configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: ApiKey,
    pub model: String,
    pub endpoint: String,
    pub temperature: f32,
    pub timeout_secs: u64,
    pub log_level: Option<String>,
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join(APP_DIR))
    }

    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("config.toml"))
    }

    /// Load from the environment, `./.env` and the config file
    pub fn load(overrides: &Overrides) -> Result<Self, ConfigError> {
        let settings = match Self::config_path() {
            Some(path) => Settings::load_from(&path)?,
            None => Settings::default(),
        };
        let env_file = EnvFile::load_from(Path::new(ENV_FILE));
        Self::from_parts(
            settings,
            env_file.var(API_KEY_ENV),
            env_file.var(MODEL_ENV),
            overrides,
        )
    }

    /// Merge file settings, environment values and overrides.
    ///
    /// Precedence for the model: overrides, then `EXPLAINER_MODEL`, then the file.
    pub fn from_parts(
        settings: Settings,
        api_key: Option<String>,
        env_model: Option<String>,
        overrides: &Overrides,
    ) -> Result<Self, ConfigError> {
        let api_key = api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let model = overrides
            .model
            .clone()
            .or(non_blank(env_model))
            .or(non_blank(settings.model))
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let temperature = settings.temperature.unwrap_or(DEFAULT_TEMPERATURE);
        if !(0.0..=2.0).contains(&temperature) {
            return Err(ConfigError::InvalidTemperature(temperature));
        }

        let timeout_secs = overrides
            .timeout_secs
            .or(settings.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout);
        }

        Ok(Self {
            api_key: ApiKey(api_key),
            model,
            endpoint: non_blank(settings.endpoint).unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            temperature,
            timeout_secs,
            log_level: non_blank(settings.log_level),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
