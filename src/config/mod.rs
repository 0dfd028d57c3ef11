use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::OutputFormat;
use crate::extractors::DEFAULT_LANGUAGE;
use crate::providers::Backend;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Transcript provider settings
    pub provider: ProviderConfig,

    /// Application settings
    pub app: AppConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Which provider fetches the captions
    pub backend: Backend,

    /// Caption language requested from the provider
    pub language: String,

    /// yt-dlp executable used by the yt-dlp backend
    pub yt_dlp_path: String,

    /// Abort a fetch after this many seconds (waits indefinitely if unset)
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default output format
    pub default_output_format: OutputFormat,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Youtube,
            language: DEFAULT_LANGUAGE.to_string(),
            yt_dlp_path: "yt-dlp".to_string(),
            timeout_secs: None,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_output_format: OutputFormat::Text,
        }
    }
}

impl Config {
    /// Load configuration from file or create default
    ///
    /// An explicitly given path must exist. Otherwise `./config.yaml` is preferred,
    /// then the user config directory, where a default file is written on first use.
    pub async fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save(&config_path).await?;
            Ok(config)
        }
    }

    /// Read and validate a configuration file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs_err::read_to_string(path).context("Failed to read config file")?;

        let config: Config = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub async fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs_err::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;

        fs_err::write(path, content).context("Failed to write config file")?;

        tracing::debug!("Wrote default configuration to {}", path.display());
        Ok(())
    }

    /// Get configuration file path
    pub fn config_path() -> Result<PathBuf> {
        // First try current directory for easy testing
        let local_config = PathBuf::from("config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        let config_dir = dirs::config_dir().context("Could not determine config directory")?;

        Ok(config_dir.join("transcript-extractor").join("config.yaml"))
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        if self.provider.language.trim().is_empty() {
            anyhow::bail!("Caption language must not be empty");
        }

        if self.provider.yt_dlp_path.trim().is_empty() {
            anyhow::bail!("yt-dlp path must not be empty");
        }

        if self.provider.timeout_secs == Some(0) {
            anyhow::bail!("Fetch timeout must be at least one second");
        }

        Ok(())
    }

    /// Fetch timeout, if one is configured
    pub fn timeout(&self) -> Option<Duration> {
        self.provider.timeout_secs.map(Duration::from_secs)
    }

    /// Display current configuration
    pub fn display(&self) {
        println!("Current Configuration:");
        println!("  Backend: {}", self.provider.backend);
        println!("  Language: {}", self.provider.language);
        println!("  yt-dlp Path: {}", self.provider.yt_dlp_path);
        match self.provider.timeout_secs {
            Some(secs) => println!("  Fetch Timeout: {}", crate::utils::format_duration(secs as f64)),
            None => println!("  Fetch Timeout: none"),
        }
        println!("  Default Format: {}", self.app.default_output_format);
    }

    /// Print where the configuration file lives
    pub fn print_location(explicit: Option<&Path>) -> Result<()> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => Self::config_path()?,
        };

        println!("Edit the config file to change settings:");
        println!("  {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let file = tempfile::NamedTempFile::new().unwrap();
        fs_err::write(file.path(), content).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.provider.backend, Backend::Youtube);
        assert_eq!(config.provider.language, "en");
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let file = write_config("provider:\n  backend: yt-dlp\n  timeout_secs: 30\n");
        let config = Config::load_from(file.path()).unwrap();

        assert_eq!(config.provider.backend, Backend::YtDlp);
        assert_eq!(config.provider.language, "en");
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
        assert!(matches!(config.app.default_output_format, OutputFormat::Text));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let file = write_config("provider:\n  language: \"\"\n");
        assert!(Config::load_from(file.path()).is_err());

        let file = write_config("provider:\n  timeout_secs: 0\n");
        assert!(Config::load_from(file.path()).is_err());

        let file = write_config("provider:\n  backend: vimeo\n");
        assert!(Config::load_from(file.path()).is_err());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let mut config = Config::default();
        config.provider.language = "fr".to_string();
        config.app.default_output_format = OutputFormat::Json;
        config.save(&path).await.unwrap();

        let loaded = Config::load(Some(path.as_path())).await.unwrap();
        assert_eq!(loaded.provider.language, "fr");
        assert!(matches!(loaded.app.default_output_format, OutputFormat::Json));
    }

    #[tokio::test]
    async fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");
        assert!(Config::load(Some(path.as_path())).await.is_err());
    }
}
