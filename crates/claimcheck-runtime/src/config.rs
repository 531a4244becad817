//! Runtime configuration.
//!
//! Configuration files may be YAML or JSON. Durations are written in
//! human-readable form (`"500ms"`, `"60s"`). Every field has a default, so an
//! empty file is a valid configuration.
//!
//! ```yaml
//! grounding:
//!   base_url: "https://g.jina.ai/"
//!   timeout: 60s
//! translation:
//!   enabled: true
//!   model: gemini-2.0-flash-lite
//!   target_language: Russian
//! pacing:
//!   interval: 500ms
//! ```
//!
//! Credentials are never part of the configuration file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Errors loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Configuration for the whole verification runtime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub grounding: GroundingConfig,
    pub translation: TranslationConfig,
    pub pacing: PacingConfig,
}

/// Grounding service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundingConfig {
    /// Service root; claims are POSTed here or appended to it as a path segment
    pub base_url: String,

    /// Per-request timeout
    #[serde(with = "humantime_duration")]
    pub timeout: Duration,
}

impl Default for GroundingConfig {
    fn default() -> Self {
        Self {
            base_url: "https://g.jina.ai/".to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

/// Reason translation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    /// Translate reasons when a translation credential is available
    pub enabled: bool,

    /// Generative API root (the model path is appended)
    pub base_url: String,

    pub model: String,

    /// Language reasons are translated into
    pub target_language: String,

    #[serde(with = "humantime_duration")]
    pub timeout: Duration,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.0-flash-lite".to_string(),
            target_language: "Russian".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Request pacing for the grounding service's rate limit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Pause between consecutive claims
    #[serde(with = "humantime_duration")]
    pub interval: Duration,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(500),
        }
    }
}

mod humantime_duration {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&humantime::format_duration(*duration).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        humantime::parse_duration(&text).map_err(serde::de::Error::custom)
    }
}

impl RuntimeConfig {
    /// Parse YAML configuration.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load and validate a configuration file.
    ///
    /// `.yaml` and `.yml` files are read as YAML, anything else as JSON.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&content)?,
            _ => Self::from_json(&content)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Check values that would only fail later, at request time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, url) in [
            ("grounding.base_url", &self.grounding.base_url),
            ("translation.base_url", &self.translation.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::Invalid(format!(
                    "{} must start with http:// or https://",
                    field
                )));
            }
        }

        if self.translation.enabled && self.translation.model.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "translation.model must not be empty".to_string(),
            ));
        }

        if self.grounding.timeout.is_zero() || self.translation.timeout.is_zero() {
            return Err(ConfigError::Invalid("timeouts must be non-zero".to_string()));
        }

        Ok(())
    }
}
