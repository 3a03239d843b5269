//! Configuration for the CLI

use anyhow::{Context, Result};
use model::API_KEY_ENV;
use runtime::{DEFAULT_MAX_STEPS, DEFAULT_MODEL, Settings};
use serde::{Deserialize, Serialize};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

/// Settings read from `<config_dir>/tierchat/config.toml`.
///
/// Every field is optional in the file and falls back to its default.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// The Claude model to chat with
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Maximum tokens per reply
    pub max_tokens: usize,

    /// Pause between typed characters, in milliseconds
    pub typing_delay_ms: u64,

    /// Model calls the agent may make for one message
    pub max_steps: usize,

    /// Anthropic API key, used when the environment has none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let settings = Settings::default();
        Self {
            model: DEFAULT_MODEL.to_owned(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
            typing_delay_ms: settings.typing_delay.as_millis() as u64,
            max_steps: DEFAULT_MAX_STEPS,
            key: None,
        }
    }
}

impl Config {
    /// Path of the global config file.
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join("tierchat")
            .join("config.toml")
    }

    /// Load the global config, or the defaults if there is none yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path())
    }

    /// Load the config at `path`, or the defaults if the file is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config from {}", path.display()))?;
        let config: Self = toml::from_str(&text)
            .with_context(|| format!("invalid config at {}", path.display()))?;
        if config.max_steps == 0 {
            anyhow::bail!(
                "invalid config at {}: max_steps must be at least 1",
                path.display()
            );
        }
        Ok(config)
    }

    /// Write the config to the global path.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path();
        self.save_to(&path)?;
        Ok(path)
    }

    /// Write the config to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create config directory {}", parent.display())
            })?;
        }
        std::fs::write(path, toml::to_string(self)?)
            .with_context(|| format!("failed to write config to {}", path.display()))?;
        tracing::info!("configuration saved to {}", path.display());
        Ok(())
    }

    /// Controller settings for this config.
    pub fn settings(&self) -> Settings {
        Settings {
            model: self.model.as_str().into(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            typing_delay: Duration::from_millis(self.typing_delay_ms),
            max_steps: self.max_steps,
        }
    }

    /// The API key: the environment first, then `./.env`, then the config
    /// file.
    pub fn credential(&self) -> wcore::Result<String> {
        let env = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| dotenv_key(Path::new(".env")));
        resolve_key(env, self.key.as_deref())
    }
}

/// Read the API key from a dotenv file without touching the process
/// environment.
pub fn dotenv_key(path: &Path) -> Option<String> {
    let entries = dotenvy::from_path_iter(path).ok()?;
    entries
        .filter_map(|entry| entry.ok())
        .find(|(name, _)| name == API_KEY_ENV)
        .map(|(_, value)| value)
}

/// Pick the first non-blank key.
pub fn resolve_key(env: Option<String>, file: Option<&str>) -> wcore::Result<String> {
    env.filter(|key| !key.trim().is_empty())
        .or_else(|| {
            file.filter(|key| !key.trim().is_empty())
                .map(str::to_owned)
        })
        .ok_or(wcore::Error::MissingCredential(API_KEY_ENV))
}
