//! Application configuration
//!
//! Loaded from `{config-dir}/vocabgram/config.toml`; every field is optional.
//!
//! ```toml
//! data_dir = "/home/me/.vocab"
//! fallback_encoding = "big5"
//! list_limit = 150
//!
//! [speech]
//! command = "espeak-ng"
//! language = "en-US"
//! rate = 0.9
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::corpus::search::DEFAULT_LIST_LIMIT;
use crate::corpus::ImportOptions;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Override for the data directory
    pub data_dir: Option<PathBuf>,
    /// Encoding label used when a file is not valid UTF-8
    pub fallback_encoding: String,
    /// Maximum rows shown by the review list
    pub list_limit: usize,
    pub speech: SpeechConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            fallback_encoding: "gbk".to_string(),
            list_limit: DEFAULT_LIST_LIMIT,
            speech: SpeechConfig::default(),
        }
    }
}

/// Text-to-speech settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// External command that speaks its arguments; disabled when unset
    pub command: Option<String>,
    pub language: String,
    pub rate: f32,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            command: None,
            language: "en-US".to_string(),
            rate: 0.9,
        }
    }
}

impl AppConfig {
    /// Default location of the config file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("vocabgram").join("config.toml"))
    }

    /// Load from a file; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("No config at {:?}, using defaults", path);
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn import_options(&self) -> ImportOptions {
        ImportOptions::with_fallback_label(&self.fallback_encoding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = AppConfig::load(&temp.path().join("config.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.list_limit, 150);
        assert_eq!(config.import_options().fallback_encoding.name(), "GBK");
    }

    #[test]
    fn test_partial_config() {
        let config = AppConfig::from_toml(
            r#"
            fallback_encoding = "big5"

            [speech]
            command = "say"
            "#,
        )
        .unwrap();

        assert_eq!(config.fallback_encoding, "big5");
        assert_eq!(config.list_limit, 150);
        assert_eq!(config.speech.command.as_deref(), Some("say"));
        assert_eq!(config.speech.language, "en-US");
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            AppConfig::from_toml("list_limit = \"many\""),
            Err(ConfigError::Parse(_))
        ));
    }
}
