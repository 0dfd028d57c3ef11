use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

use super::{Backend, CaptionSegment, TranscriptProvider};
use crate::extractors::VideoId;
use crate::{ExtractionError, Result};

/// Subtitle extension requested from yt-dlp
const SUBTITLE_FORMAT: &str = "json3";

/// Caption tracks downloaded with yt-dlp
pub struct YtDlpProvider {
    yt_dlp_path: String,
}

/// YouTube's `json3` timed-text document
#[derive(Debug, Deserialize)]
struct TimedText {
    #[serde(default)]
    events: Vec<TimedTextEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimedTextEvent {
    #[serde(default)]
    t_start_ms: u64,
    d_duration_ms: Option<u64>,
    segs: Option<Vec<TimedTextSeg>>,
}

#[derive(Debug, Deserialize)]
struct TimedTextSeg {
    #[serde(default)]
    utf8: String,
}

impl YtDlpProvider {
    pub fn new(yt_dlp_path: impl Into<String>) -> Self {
        Self {
            yt_dlp_path: yt_dlp_path.into(),
        }
    }

    /// Check if yt-dlp is available
    pub async fn check_availability(&self) -> bool {
        Command::new(&self.yt_dlp_path)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|status| status.success())
            .unwrap_or(false)
    }

    /// Run yt-dlp to write the subtitle track into `dir`
    async fn download_subtitles(&self, video_id: &VideoId, language: &str, dir: &Path) -> Result<()> {
        let template = dir.join("%(id)s.%(ext)s").to_string_lossy().into_owned();
        let url = video_id.watch_url();

        let output = Command::new(&self.yt_dlp_path)
            .args([
                "--skip-download",
                "--write-subs",
                "--write-auto-subs",
                "--sub-langs", language,
                "--sub-format", SUBTITLE_FORMAT,
                "--output", template.as_str(),
                "--no-playlist",
                "--no-warnings",
                url.as_str(),
            ])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| ExtractionError::Provider(format!("failed to run {}: {e}", self.yt_dlp_path)))?;

        if !output.status.success() {
            let error = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractionError::Provider(format!("yt-dlp failed: {}", error.trim())));
        }

        Ok(())
    }
}

/// First subtitle file yt-dlp left in `dir`
fn find_subtitle_file(dir: &Path) -> Option<PathBuf> {
    std::fs::read_dir(dir)
        .ok()?
        .flatten()
        .map(|entry| entry.path())
        .find(|path| path.extension().and_then(|ext| ext.to_str()) == Some(SUBTITLE_FORMAT))
}

/// Convert a `json3` document into caption segments
///
/// Each event carrying text becomes one segment. Line breaks inside an event are
/// flattened to spaces and events that are blank after trimming are dropped.
fn parse_timed_text(content: &str) -> Result<Vec<CaptionSegment>> {
    let document: TimedText = serde_json::from_str(content)
        .map_err(|e| ExtractionError::InvalidResponse(format!("malformed json3 subtitles: {e}")))?;

    let segments = document
        .events
        .into_iter()
        .filter_map(|event| {
            let text: String = event.segs?.iter().map(|seg| seg.utf8.as_str()).collect();
            let text = text.replace('\n', " ").trim().to_string();
            if text.is_empty() {
                return None;
            }

            Some(CaptionSegment::new(
                text,
                event.t_start_ms as f64 / 1000.0,
                event.d_duration_ms.unwrap_or(0) as f64 / 1000.0,
            ))
        })
        .collect();

    Ok(segments)
}

#[async_trait]
impl TranscriptProvider for YtDlpProvider {
    async fn fetch(&self, video_id: &VideoId, language: &str) -> Result<Vec<CaptionSegment>> {
        tracing::debug!("Downloading '{}' subtitles for {} with yt-dlp", language, video_id);

        let temp_dir = tempfile::tempdir()
            .map_err(|e| ExtractionError::Provider(format!("failed to create temporary directory: {e}")))?;

        self.download_subtitles(video_id, language, temp_dir.path()).await?;

        let path = find_subtitle_file(temp_dir.path()).ok_or_else(|| ExtractionError::NoTranscript {
            video_id: video_id.to_string(),
        })?;

        let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
            ExtractionError::Provider(format!("failed to read {}: {e}", path.display()))
        })?;

        parse_timed_text(&content)
    }

    fn backend(&self) -> Backend {
        Backend::YtDlp
    }
}
