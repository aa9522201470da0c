//! File-based configuration loaded from TOML
//!
//! Everything is optional; a missing section falls back to the built-in
//! defaults.
//!
//! ```toml
//! [llm]
//! model = "gemini-2.5-flash"
//! endpoint = "https://generativelanguage.googleapis.com/v1beta"
//! api_key_env = "GEMINI_API_KEY"
//! timeout_secs = 90
//!
//! [defaults]
//! intensity = "SCORCHED_EARTH"
//! language = "HINDI"
//!
//! [ui]
//! loading_interval_ms = 2000
//! toast_ms = 3000
//! count_up_ms = 1500
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::roast::{Language, RoastIntensity};

/// Root of the TOML configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Model provider settings
    #[serde(default)]
    pub llm: LlmConfig,

    /// Option values used when the CLI does not set them
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Timings of the cosmetic effects
    #[serde(default)]
    pub ui: UiConfig,
}

impl ClientConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: ClientConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.llm.timeout_secs == Some(0) {
            return Err(ConfigError::Validation(
                "llm.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.ui.loading_interval_ms == Some(0) {
            return Err(ConfigError::Validation(
                "ui.loading_interval_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Gemini settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Model name, e.g. "gemini-2.5-flash"
    #[serde(default)]
    pub model: Option<String>,

    /// Custom API endpoint
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Environment variable holding the API key
    #[serde(default)]
    pub api_key_env: Option<String>,

    /// Request timeout; no timeout when absent
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Default roast options
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default)]
    pub intensity: Option<RoastIntensity>,

    #[serde(default)]
    pub language: Option<Language>,
}

/// Timings in milliseconds
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub loading_interval_ms: Option<u64>,

    #[serde(default)]
    pub toast_ms: Option<u64>,

    #[serde(default)]
    pub count_up_ms: Option<u64>,
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CONFIG: &str = r#"
[llm]
model = "gemini-2.5-pro"
api_key_env = "MY_GEMINI_KEY"
timeout_secs = 90

[defaults]
intensity = "SCORCHED_EARTH"
language = "HINDI"

[ui]
toast_ms = 5000
"#;

    #[test]
    fn test_parse_config() {
        let config = ClientConfig::from_str(SAMPLE_CONFIG).unwrap();

        assert_eq!(config.llm.model.as_deref(), Some("gemini-2.5-pro"));
        assert_eq!(config.llm.api_key_env.as_deref(), Some("MY_GEMINI_KEY"));
        assert_eq!(config.llm.timeout_secs, Some(90));
        assert!(config.llm.endpoint.is_none());

        assert_eq!(config.defaults.intensity, Some(RoastIntensity::ScorchedEarth));
        assert_eq!(config.defaults.language, Some(Language::Hindi));

        assert_eq!(config.ui.toast_ms, Some(5000));
        assert!(config.ui.count_up_ms.is_none());
    }

    #[test]
    fn test_empty_config() {
        let config = ClientConfig::from_str("").unwrap();
        assert!(config.llm.model.is_none());
        assert!(config.defaults.intensity.is_none());
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let err = ClientConfig::from_str("[llm]\ntimeout_secs = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_rejects_unknown_intensity() {
        let err = ClientConfig::from_str("[defaults]\nintensity = \"EXTRA_CRISPY\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roast.toml");
        std::fs::write(&path, SAMPLE_CONFIG).unwrap();

        let config = ClientConfig::from_file(&path).unwrap();
        assert_eq!(config.defaults.language, Some(Language::Hindi));

        let missing = ClientConfig::from_file(&dir.path().join("nope.toml"));
        assert!(matches!(missing, Err(ConfigError::Io(_))));
    }
}
