use std::path::PathBuf;

use crate::config::DEFAULT_DATASET;
use crate::llm::error::ConfigError;
use crate::llm::settings::GeminiSettings;

pub const DATASET_VAR: &str = "SHEHA_DATASET";
pub const MODEL_DIR_VAR: &str = "SHEHA_MODEL_DIR";

/// Process-wide settings, resolved once at startup and passed to every command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Runtime {
    /// CSV file with `question` and `answer` columns.
    pub dataset_path: PathBuf,
    /// Parent directory of the embedding model files.
    pub model_cache_dir: PathBuf,
    pub gemini: GeminiSettings,
}

impl Runtime {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve settings through `lookup`. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let dataset_path = get(DATASET_VAR).map_or_else(|| PathBuf::from(DEFAULT_DATASET), PathBuf::from);
        let model_cache_dir = get(MODEL_DIR_VAR).map_or_else(default_model_cache_dir, PathBuf::from);

        Ok(Self {
            dataset_path,
            model_cache_dir,
            gemini: GeminiSettings::from_lookup(&lookup)?,
        })
    }

    /// Replace the dataset path, e.g. from a command-line flag.
    #[must_use]
    pub fn with_dataset(mut self, dataset_path: Option<PathBuf>) -> Self {
        if let Some(path) = dataset_path {
            self.dataset_path = path;
        }
        self
    }
}

/// `~/.sheha/models`, or `.sheha/models` relative to the working directory
/// when no home directory is known.
fn default_model_cache_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_default()
        .join(".sheha")
        .join("models")
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn defaults_when_environment_is_empty() {
        let runtime = Runtime::from_lookup(|_| None).unwrap();
        assert_eq!(runtime.dataset_path, Path::new("Amrutha_data.csv"));
        assert!(runtime.model_cache_dir.ends_with(".sheha/models"));
        assert_eq!(runtime.gemini, GeminiSettings::default());
    }

    #[test]
    fn paths_come_from_environment() {
        let runtime = Runtime::from_lookup(|name| match name {
            DATASET_VAR => Some("/data/qa.csv".to_string()),
            MODEL_DIR_VAR => Some("/models".to_string()),
            "GEMINI_API_KEY" => Some("key".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(runtime.dataset_path, Path::new("/data/qa.csv"));
        assert_eq!(runtime.model_cache_dir, Path::new("/models"));
        assert_eq!(runtime.gemini.api_key().unwrap(), "key");
    }

    #[test]
    fn gemini_errors_surface() {
        let err = Runtime::from_lookup(|name| {
            (name == "GEMINI_TIMEOUT_SECS").then(|| "-1".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { .. }));
    }

    #[test]
    fn dataset_override_wins() {
        let runtime = Runtime::from_lookup(|_| None)
            .unwrap()
            .with_dataset(Some(PathBuf::from("other.csv")));
        assert_eq!(runtime.dataset_path, Path::new("other.csv"));

        let unchanged = runtime.clone().with_dataset(None);
        assert_eq!(unchanged, runtime);
    }
}
