//! Application configuration

pub mod client;
pub mod prompts;

use std::env;
use std::time::Duration;

pub use client::{ClientConfig, ConfigError};

use crate::roast::RoastOptions;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Timings of the cosmetic effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiTimings {
    /// How long each loading message stays up
    pub loading_interval: Duration,
    /// How long a toast stays visible
    pub toast_ttl: Duration,
    /// Total duration of the score count-up
    pub count_up: Duration,
}

impl Default for UiTimings {
    fn default() -> Self {
        Self {
            loading_interval: Duration::from_millis(2000),
            toast_ttl: Duration::from_millis(3000),
            count_up: Duration::from_millis(1500),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: Option<u64>,
    pub defaults: RoastOptions,
    pub timings: UiTimings,
}

impl Config {
    /// Resolve configuration from the process environment, layered on top
    /// of an optional config file
    pub fn from_env(file: Option<ClientConfig>) -> Result<Self, ConfigError> {
        Self::resolve(file.unwrap_or_default(), |key| env::var(key).ok())
    }

    /// Environment values win over file values, file values over defaults
    pub fn resolve<F>(file: ClientConfig, var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let key_env = file
            .llm
            .api_key_env
            .clone()
            .unwrap_or_else(|| DEFAULT_API_KEY_ENV.into());

        let timeout_secs = match var("ROAST_TIMEOUT_SECS") {
            Some(raw) => Some(raw.parse::<u64>().ok().filter(|s| *s > 0).ok_or_else(|| {
                ConfigError::Validation(format!("ROAST_TIMEOUT_SECS must be a positive integer, got '{}'", raw))
            })?),
            None => file.llm.timeout_secs,
        };

        let mut defaults = RoastOptions::default();
        if let Some(intensity) = file.defaults.intensity {
            defaults.set_intensity(intensity);
        }
        if let Some(language) = file.defaults.language {
            defaults.set_language(language);
        }

        let base = UiTimings::default();
        let ms = |value: Option<u64>, fallback: Duration| {
            value.map(Duration::from_millis).unwrap_or(fallback)
        };
        let timings = UiTimings {
            loading_interval: ms(file.ui.loading_interval_ms, base.loading_interval),
            toast_ttl: ms(file.ui.toast_ms, base.toast_ttl),
            count_up: ms(file.ui.count_up_ms, base.count_up),
        };

        Ok(Self {
            gemini_api_key: var(&key_env).filter(|k| !k.trim().is_empty()),
            model: var("GEMINI_MODEL")
                .or(file.llm.model)
                .unwrap_or_else(|| DEFAULT_MODEL.into()),
            base_url: var("GEMINI_BASE_URL")
                .or(file.llm.endpoint)
                .unwrap_or_else(|| DEFAULT_BASE_URL.into()),
            timeout_secs,
            defaults,
            timings,
        })
    }
}
