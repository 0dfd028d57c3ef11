use async_trait::async_trait;
use yt_transcript_rs::api::YouTubeTranscriptApi;
use yt_transcript_rs::errors::{CouldNotRetrieveTranscript, CouldNotRetrieveTranscriptReason};

use super::{Backend, CaptionSegment, TranscriptProvider};
use crate::extractors::VideoId;
use crate::{ExtractionError, Result};

/// Caption tracks fetched straight from YouTube
pub struct YoutubeTranscriptProvider {
    api: YouTubeTranscriptApi,
}

impl YoutubeTranscriptProvider {
    pub fn new() -> Result<Self> {
        let api = YouTubeTranscriptApi::new(None, None, None)
            .map_err(|e| ExtractionError::Provider(format!("failed to build YouTube client: {e}")))?;

        Ok(Self { api })
    }
}

/// Translate a library failure into our error model
///
/// A video without the requested track, or with captions turned off, has no
/// transcript. Everything else is a provider fault.
fn map_error(video_id: &VideoId, err: CouldNotRetrieveTranscript) -> ExtractionError {
    match err.reason {
        Some(CouldNotRetrieveTranscriptReason::NoTranscriptFound { .. })
        | Some(CouldNotRetrieveTranscriptReason::TranscriptsDisabled) => ExtractionError::NoTranscript {
            video_id: video_id.to_string(),
        },
        _ => ExtractionError::Provider(err.to_string()),
    }
}

#[async_trait]
impl TranscriptProvider for YoutubeTranscriptProvider {
    async fn fetch(&self, video_id: &VideoId, language: &str) -> Result<Vec<CaptionSegment>> {
        tracing::debug!("Requesting '{}' captions for {} from YouTube", language, video_id);

        let transcript = self
            .api
            .fetch_transcript(video_id.as_str(), &[language], false)
            .await
            .map_err(|e| map_error(video_id, e))?;

        tracing::debug!(
            "YouTube returned {} ({}) track, auto-generated: {}",
            transcript.language,
            transcript.language_code,
            transcript.is_generated
        );

        Ok(transcript
            .snippets
            .into_iter()
            .map(|snippet| CaptionSegment::new(snippet.text, snippet.start, snippet.duration))
            .collect())
    }

    fn backend(&self) -> Backend {
        Backend::Youtube
    }
}
