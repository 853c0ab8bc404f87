//! Engine configuration, loaded from the environment (and `.env` when present).

use crate::error::AppError;
use std::env;
use std::time::Duration;
use url::Url;
use validator::Validate;

pub const DEFAULT_MODEL_ID: &str = "gemini-1.5-flash";
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

const API_KEY_VAR: &str = "GOOGLE_API_KEY";
const MODEL_ID_VAR: &str = "MOOD_MODEL_ID";
const BASE_URL_VAR: &str = "MOOD_API_BASE_URL";
const TEMPERATURE_VAR: &str = "MOOD_TEMPERATURE";
const TIMEOUT_VAR: &str = "MOOD_REQUEST_TIMEOUT_SECS";

/// Settings for the generative model client.
#[derive(Clone, Validate)]
pub struct EngineConfig {
    /// Model identifier, e.g. `gemini-1.5-flash`.
    #[validate(length(min = 1))]
    pub model_id: String,
    #[validate(length(min = 1))]
    pub api_key: String,
    /// Base of the REST API; the client appends `models/{model_id}:generateContent`.
    pub api_base_url: Url,
    /// Sampling temperature. `None` leaves the service default in place.
    #[validate(range(min = 0.0, max = 2.0))]
    pub temperature: Option<f32>,
    #[validate(range(min = 1, max = 300))]
    pub request_timeout_secs: u64,
}

// Keep the key out of logs.
impl std::fmt::Debug for EngineConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineConfig")
            .field("model_id", &self.model_id)
            .field("api_key", &"<redacted>")
            .field("api_base_url", &self.api_base_url.as_str())
            .field("temperature", &self.temperature)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl EngineConfig {
    /// Builds a config with defaults for everything but the key.
    pub fn new(api_key: impl Into<String>) -> Result<Self, AppError> {
        let config = Self {
            model_id: DEFAULT_MODEL_ID.to_string(),
            api_key: api_key.into(),
            api_base_url: Url::parse(DEFAULT_API_BASE_URL)?,
            temperature: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reads the configuration from environment variables.
    ///
    /// `GOOGLE_API_KEY` is required. `MOOD_MODEL_ID`, `MOOD_API_BASE_URL`,
    /// `MOOD_TEMPERATURE` and `MOOD_REQUEST_TIMEOUT_SECS` are optional.
    pub fn from_env() -> Result<Self, AppError> {
        // A missing .env file is normal outside local development.
        let _ = dotenv::dotenv();

        let api_key = non_empty_var(API_KEY_VAR)
            .ok_or_else(|| AppError::Config(format!("{} is not set", API_KEY_VAR)))?;

        let model_id = non_empty_var(MODEL_ID_VAR).unwrap_or_else(|| DEFAULT_MODEL_ID.to_string());

        let api_base_url = Url::parse(
            &non_empty_var(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
        )?;

        let temperature = match non_empty_var(TEMPERATURE_VAR) {
            Some(raw) => Some(raw.trim().parse::<f32>().map_err(|e| {
                AppError::Config(format!("{} must be a number: {}", TEMPERATURE_VAR, e))
            })?),
            None => None,
        };

        let request_timeout_secs = match non_empty_var(TIMEOUT_VAR) {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                AppError::Config(format!("{} must be a whole number of seconds: {}", TIMEOUT_VAR, e))
            })?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        let config = Self {
            model_id,
            api_key,
            api_base_url,
            temperature,
            request_timeout_secs,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, AppError> {
        self.api_base_url = Url::parse(base_url)?;
        Ok(self)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_VARS: [&str; 5] = [API_KEY_VAR, MODEL_ID_VAR, BASE_URL_VAR, TEMPERATURE_VAR, TIMEOUT_VAR];

    fn with_env<F: FnOnce()>(values: &[(&str, &str)], f: F) {
        let vars: Vec<(&str, Option<&str>)> = ALL_VARS
            .iter()
            .map(|name| {
                let value = values.iter().find(|(k, _)| k == name).map(|(_, v)| *v);
                (*name, value)
            })
            .collect();
        temp_env::with_vars(vars, f);
    }

    #[test]
    fn test_from_env_defaults() {
        with_env(&[(API_KEY_VAR, "test-key")], || {
            let config = EngineConfig::from_env().unwrap();
            assert_eq!(config.model_id, DEFAULT_MODEL_ID);
            assert_eq!(config.api_key, "test-key");
            assert_eq!(config.api_base_url.as_str(), "https://generativelanguage.googleapis.com/v1beta");
            assert_eq!(config.temperature, None);
            assert_eq!(config.request_timeout(), Duration::from_secs(60));
        });
    }

    #[test]
    fn test_from_env_overrides() {
        with_env(
            &[
                (API_KEY_VAR, "k"),
                (MODEL_ID_VAR, "gemini-2.0-flash"),
                (BASE_URL_VAR, "http://localhost:9000/v1"),
                (TEMPERATURE_VAR, "0.4"),
                (TIMEOUT_VAR, "15"),
            ],
            || {
                let config = EngineConfig::from_env().unwrap();
                assert_eq!(config.model_id, "gemini-2.0-flash");
                assert_eq!(config.api_base_url.as_str(), "http://localhost:9000/v1");
                assert_eq!(config.temperature, Some(0.4));
                assert_eq!(config.request_timeout_secs, 15);
            },
        );
    }

    #[test]
    fn test_missing_api_key() {
        with_env(&[], || {
            let err = EngineConfig::from_env().unwrap_err();
            assert!(matches!(err, AppError::Config(msg) if msg.contains("GOOGLE_API_KEY")));
        });
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        with_env(&[(API_KEY_VAR, "k"), (TEMPERATURE_VAR, "3.5")], || {
            assert!(matches!(EngineConfig::from_env(), Err(AppError::Validation(_))));
        });
        with_env(&[(API_KEY_VAR, "k"), (TIMEOUT_VAR, "0")], || {
            assert!(matches!(EngineConfig::from_env(), Err(AppError::Validation(_))));
        });
        with_env(&[(API_KEY_VAR, "k"), (TIMEOUT_VAR, "soon")], || {
            assert!(matches!(EngineConfig::from_env(), Err(AppError::Config(_))));
        });
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = EngineConfig::new("super-secret").unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
