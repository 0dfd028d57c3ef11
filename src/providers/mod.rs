use async_trait::async_trait;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod youtube;
pub mod ytdlp;

use crate::config::ProviderConfig;
use crate::extractors::VideoId;
use crate::Result;

/// One timed unit of caption text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionSegment {
    /// Caption text
    pub text: String,

    /// Start offset in seconds
    pub start: f64,

    /// Display duration in seconds
    pub duration: f64,
}

impl CaptionSegment {
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
        }
    }

    /// End offset in seconds
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// Available transcript providers
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Backend {
    /// YouTube's caption tracks through the yt-transcript-rs client
    Youtube,
    /// Subtitles downloaded by the yt-dlp executable
    #[value(name = "yt-dlp")]
    YtDlp,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Youtube => "youtube",
            Backend::YtDlp => "yt-dlp",
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source of caption segments for a video
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranscriptProvider: Send + Sync {
    /// Fetch the caption segments of one language track, in playback order
    async fn fetch(&self, video_id: &VideoId, language: &str) -> Result<Vec<CaptionSegment>>;

    /// Which backend this provider is
    fn backend(&self) -> Backend;
}

/// Build the provider selected by the configuration
pub fn create_provider(config: &ProviderConfig) -> Result<Box<dyn TranscriptProvider>> {
    tracing::debug!("Using transcript backend: {}", config.backend);

    match config.backend {
        Backend::Youtube => Ok(Box::new(youtube::YoutubeTranscriptProvider::new()?)),
        Backend::YtDlp => Ok(Box::new(ytdlp::YtDlpProvider::new(&config.yt_dlp_path))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_names() {
        assert_eq!(Backend::Youtube.to_string(), "youtube");
        assert_eq!(Backend::YtDlp.to_string(), "yt-dlp");
        assert_eq!(serde_yaml::to_string(&Backend::YtDlp).unwrap().trim(), "yt-dlp");
        assert_eq!(Backend::from_str("yt-dlp", true).unwrap(), Backend::YtDlp);
    }

    #[test]
    fn test_segment_end() {
        let segment = CaptionSegment::new("hello", 1.5, 2.25);
        assert_eq!(segment.end(), 3.75);
    }

    #[test]
    fn test_create_ytdlp_provider() {
        let config = ProviderConfig {
            backend: Backend::YtDlp,
            ..ProviderConfig::default()
        };
        let provider = create_provider(&config).unwrap();
        assert_eq!(provider.backend(), Backend::YtDlp);
    }
}
