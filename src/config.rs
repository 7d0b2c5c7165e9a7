//! Bot configuration.
//!
//! Loads settings from config.json next to the executable (or an explicit
//! path). Command-line flags override individual values afterwards.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::ocr::{EnhanceSettings, DEFAULT_PSM};
use crate::search::google::DEFAULT_ENDPOINT;

/// Complete bot configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Google Custom Search API key
    pub api_key: String,
    /// Google Custom Search engine ID (`cx`)
    pub search_engine_id: String,
    /// Custom Search endpoint
    pub search_endpoint: String,
    /// Folder watched for new screenshots
    pub watch_dir: PathBuf,
    /// Sub-folder of `watch_dir` receiving processed screenshots
    pub processed_subdir: String,
    /// Delay between polls when no screenshot is waiting (milliseconds)
    pub poll_interval_ms: u64,
    /// Number assigned to the first processed question
    pub first_question_number: u32,
    /// Extra attempts after a failed search request
    pub search_retries: u32,
    /// Delay before the first retry, doubled on each further retry (milliseconds)
    pub retry_backoff_ms: u64,
    /// HTTP timeout for one search request (seconds)
    pub request_timeout_secs: u64,
    /// Optional stop-word list replacing the built-in English list
    pub stop_words_file: Option<PathBuf>,
    /// Explicit Tesseract executable; discovered when unset
    pub tesseract_path: Option<PathBuf>,
    /// Tesseract page segmentation mode
    pub tesseract_psm: u8,
    /// Image enhancement factors applied before OCR
    pub enhance: EnhanceSettings,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            search_engine_id: String::new(),
            search_endpoint: DEFAULT_ENDPOINT.to_string(),
            watch_dir: default_watch_dir(),
            processed_subdir: "hq".to_string(),
            poll_interval_ms: 500,
            first_question_number: 1,
            search_retries: 0,
            retry_backoff_ms: 1000,
            request_timeout_secs: 10,
            stop_words_file: None,
            tesseract_path: None,
            tesseract_psm: DEFAULT_PSM,
            enhance: EnhanceSettings::default(),
        }
    }
}

/// Screenshots land on the desktop by default.
fn default_watch_dir() -> PathBuf {
    dirs::desktop_dir().unwrap_or_else(|| PathBuf::from("."))
}

impl BotConfig {
    /// Folder that processed screenshots and reports are moved into.
    pub fn processed_dir(&self) -> PathBuf {
        self.watch_dir.join(&self.processed_subdir)
    }

    /// Checks the values the pipeline cannot start without.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(anyhow!(
                "No search API key. Pass --api-key, set HQ_BOT_API_KEY or add api_key to config.json"
            ));
        }
        if self.search_engine_id.trim().is_empty() {
            return Err(anyhow!(
                "No search engine ID. Pass --search-id, set HQ_BOT_SEARCH_ID or add search_engine_id to config.json"
            ));
        }
        if self.processed_subdir.trim().is_empty() {
            return Err(anyhow!("processed_subdir must not be empty"));
        }
        Ok(())
    }
}

/// Default config location: config.json next to the executable.
pub fn default_config_path() -> PathBuf {
    crate::paths::get_exe_dir().join("config.json")
}

/// Loads configuration from `path` or returns defaults.
///
/// A missing or unparsable file is logged and replaced by defaults so the
/// bot can still run from command-line flags alone.
pub fn load_config(path: &Path) -> BotConfig {
    crate::log(&format!("Looking for config at: {}", path.display()));

    if !path.exists() {
        crate::log("config.json not found. Using default config.");
        return BotConfig::default();
    }

    match fs::read_to_string(path) {
        Ok(contents) => match serde_json::from_str(&contents) {
            Ok(config) => {
                crate::log("Config loaded from config.json");
                config
            }
            Err(e) => {
                crate::log(&format!(
                    "Failed to parse config.json: {}. Using defaults.",
                    e
                ));
                BotConfig::default()
            }
        },
        Err(e) => {
            crate::log(&format!(
                "Failed to read config.json: {}. Using defaults.",
                e
            ));
            BotConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = load_config(Path::new("/nonexistent/config.json"));
        assert_eq!(config.processed_subdir, "hq");
        assert_eq!(config.search_retries, 0);
        assert_eq!(config.tesseract_psm, 3);
        assert_eq!(config.enhance, EnhanceSettings::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"api_key": "k", "search_engine_id": "cx", "search_retries": 2, "enhance": {"contrast": 2.5}}"#,
        )
        .unwrap();

        let config = load_config(&path);
        assert_eq!(config.api_key, "k");
        assert_eq!(config.search_retries, 2);
        assert_eq!(config.poll_interval_ms, 500);
        assert_eq!(config.enhance.contrast, 2.5);
        assert_eq!(config.enhance.sharpness, 4.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{not json").unwrap();

        let config = load_config(&path);
        assert!(config.api_key.is_empty());
    }

    #[test]
    fn test_validate_requires_credentials() {
        let mut config = BotConfig::default();
        assert!(config.validate().is_err());

        config.api_key = "k".into();
        assert!(config.validate().is_err());

        config.search_engine_id = "cx".into();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_processed_dir() {
        let config = BotConfig {
            watch_dir: PathBuf::from("/home/me/Desktop"),
            ..BotConfig::default()
        };
        assert_eq!(config.processed_dir(), PathBuf::from("/home/me/Desktop/hq"));
    }
}
