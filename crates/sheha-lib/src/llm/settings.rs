use std::time::Duration;

use super::error::ConfigError;
use crate::config::{DEFAULT_GEMINI_ENDPOINT, DEFAULT_GEMINI_MODEL, DEFAULT_GEMINI_TIMEOUT_SECS};

pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const MODEL_VAR: &str = "GEMINI_MODEL";
pub const ENDPOINT_VAR: &str = "GEMINI_ENDPOINT";
pub const TIMEOUT_VAR: &str = "GEMINI_TIMEOUT_SECS";

/// Connection settings for the Gemini API.
///
/// The API key stays optional here so commands that never call the model
/// (`model download`) start without it. [`GeminiSettings::api_key`] enforces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub timeout: Duration,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            endpoint: DEFAULT_GEMINI_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_GEMINI_TIMEOUT_SECS),
        }
    }
}

impl GeminiSettings {
    /// Read settings through `lookup`, which returns a variable's value if set.
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let timeout = match get(TIMEOUT_VAR) {
            Some(raw) => Duration::from_secs(raw.trim().parse::<u64>().map_err(|_| {
                ConfigError::InvalidNumber {
                    var: TIMEOUT_VAR,
                    reason: "expected whole seconds",
                }
            })?),
            None => defaults.timeout,
        };

        Ok(Self {
            api_key: get(API_KEY_VAR),
            model: get(MODEL_VAR).unwrap_or(defaults.model),
            endpoint: get(ENDPOINT_VAR).unwrap_or(defaults.endpoint),
            timeout,
        })
    }

    /// The API key, or [`ConfigError::MissingVar`] when it was never provided.
    pub fn api_key(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .ok_or(ConfigError::MissingVar(API_KEY_VAR))
    }

    /// The endpoint without trailing slashes, checked for an http(s) scheme.
    pub fn base_url(&self) -> Result<&str, ConfigError> {
        let endpoint = self.endpoint.trim().trim_end_matches('/');
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            Ok(endpoint)
        } else {
            Err(ConfigError::InvalidEndpoint {
                var: ENDPOINT_VAR,
                value: self.endpoint.clone(),
            })
        }
    }
}
