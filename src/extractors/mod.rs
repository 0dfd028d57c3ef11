use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

pub mod video_id;

pub use video_id::VideoId;

use crate::providers::{Backend, CaptionSegment, TranscriptProvider};
use crate::{ExtractionError, Result};

/// Language requested when nothing else is configured
pub const DEFAULT_LANGUAGE: &str = "en";

/// All caption text of a video joined into one string
///
/// Starts with a single space and every segment is followed by one space, so three
/// segments `a`, `b`, `c` read `" a b c "` and an empty track is exactly `" "`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranscriptText(String);

impl TranscriptText {
    pub fn from_segments(segments: &[CaptionSegment]) -> Self {
        let mut text = String::from(" ");
        for segment in segments {
            text.push_str(&segment.text);
            text.push(' ');
        }
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for TranscriptText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of one transcript fetch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    /// Video the captions belong to
    pub video_id: VideoId,

    /// Language track that was requested
    pub language: String,

    /// Provider that served the captions
    pub backend: Backend,

    /// Caption segments in playback order
    pub segments: Vec<CaptionSegment>,

    /// When the captions were fetched
    pub fetched_at: DateTime<Utc>,
}

impl Transcript {
    /// Joined caption text
    pub fn text(&self) -> TranscriptText {
        TranscriptText::from_segments(&self.segments)
    }

    /// Playback length covered by the captions, in seconds
    pub fn covered_duration(&self) -> f64 {
        self.segments
            .iter()
            .map(CaptionSegment::end)
            .fold(0.0, f64::max)
    }
}

/// Turns video URLs into transcripts using a provider
pub struct TranscriptExtractor {
    provider: Box<dyn TranscriptProvider>,
    language: String,
    timeout: Option<Duration>,
}

impl TranscriptExtractor {
    pub fn new(provider: Box<dyn TranscriptProvider>) -> Self {
        Self {
            provider,
            language: DEFAULT_LANGUAGE.to_string(),
            timeout: None,
        }
    }

    /// Request this caption language instead of the default
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Give up on the provider after `timeout`
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Fetch the transcript of `url` and join it into a single text
    pub async fn extract(&self, url: &str) -> Result<TranscriptText> {
        Ok(self.fetch(url).await?.text())
    }

    /// Fetch the caption segments of `url`
    ///
    /// The URL is parsed before anything is sent to the provider, so malformed input
    /// never reaches the network.
    pub async fn fetch(&self, url: &str) -> Result<Transcript> {
        let video_id = VideoId::parse(url)?;
        tracing::debug!("Derived video id {} from {}", video_id, url);

        let request = self.provider.fetch(&video_id, &self.language);
        let segments = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, request)
                .await
                .map_err(|_| ExtractionError::Timeout { after: limit })??,
            None => request.await?,
        };

        tracing::info!(
            "Fetched {} caption segments for {} via {}",
            segments.len(),
            video_id,
            self.provider.backend()
        );

        Ok(Transcript {
            video_id,
            language: self.language.clone(),
            backend: self.provider.backend(),
            segments,
            fetched_at: Utc::now(),
        })
    }
}
