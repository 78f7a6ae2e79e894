/*!
 * Application configuration module.
 *
 * This module handles the application configuration including loading,
 * validating and saving configuration settings, and exposes the credential
 * collaborator the translation client reads before every remote call.
 */

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Default difficulty level (1-10) used when the command does not
    /// specify one
    #[serde(default = "default_difficulty")]
    pub difficulty: u8,

    /// Translation settings
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Settings for the remote translation capability
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Target language name or code (e.g. "Spanish", "fr")
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Service URL; empty selects the provider's public endpoint
    #[serde(default = "String::new")]
    pub endpoint: String,

    /// API key
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Max output tokens per request
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_difficulty() -> u8 {
    5
}

fn default_target_language() -> String {
    "English".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            target_language: default_target_language(),
            model: default_model(),
            endpoint: String::new(),
            api_key: String::new(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            difficulty: default_difficulty(),
            translation: TranslationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

/// Log level for the application
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Convert to the log crate's level filter
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Validate the configuration values
    pub fn validate(&self) -> Result<()> {
        if !(1..=10).contains(&self.difficulty) {
            return Err(anyhow!(
                "Difficulty must be between 1 and 10, got {}",
                self.difficulty
            ));
        }
        if self.translation.target_language.trim().is_empty() {
            return Err(anyhow!("Target language must not be empty"));
        }
        if self.translation.model.trim().is_empty() {
            return Err(anyhow!("Model must not be empty"));
        }
        Ok(())
    }
}

/// Configuration collaborator holding the API credential.
///
/// Modeled as an async key-value store with a single recognized key. The
/// client re-reads the credential before each remote call, so an
/// implementation may rotate it mid-session.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Read the stored credential, if any
    async fn get_credential(&self) -> Option<String>;

    /// Replace the stored credential
    async fn set_credential(&self, credential: &str) -> Result<()>;
}

/// Credential store backed by the JSON config file.
///
/// Reads the file on every get rather than caching, tolerating credential
/// rotation by an external editor while a page session is running.
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Create a store backed by the given config file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn get_credential(&self) -> Option<String> {
        let config = Config::from_file(&self.path).ok()?;
        let key = config.translation.api_key;
        if key.is_empty() { None } else { Some(key) }
    }

    async fn set_credential(&self, credential: &str) -> Result<()> {
        let mut config = Config::from_file(&self.path).unwrap_or_default();
        config.translation.api_key = credential.to_string();
        config.save(&self.path)
    }
}

/// In-memory credential store for tests and embedding
#[derive(Default)]
pub struct MemoryCredentialStore {
    credential: parking_lot::RwLock<Option<String>>,
}

impl MemoryCredentialStore {
    /// Create a store that starts with the given credential
    pub fn with_credential(credential: &str) -> Self {
        Self {
            credential: parking_lot::RwLock::new(Some(credential.to_string())),
        }
    }

    /// Create a store with no credential
    pub fn empty() -> Self {
        Self::default()
    }

    /// Drop the stored credential (simulates revocation)
    pub fn clear(&self) {
        *self.credential.write() = None;
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn get_credential(&self) -> Option<String> {
        self.credential.read().clone()
    }

    async fn set_credential(&self, credential: &str) -> Result<()> {
        *self.credential.write() = Some(credential.to_string());
        Ok(())
    }
}
