use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::extractors::{Transcript, TranscriptText};
use crate::providers::CaptionSegment;

/// JSON shape of a fetched transcript
#[derive(Serialize)]
struct TranscriptDocument<'a> {
    video_id: &'a str,
    language: &'a str,
    backend: &'a str,
    text: TranscriptText,
    duration: f64,
    segments: &'a [CaptionSegment],
    fetched_at: chrono::DateTime<chrono::Utc>,
}

/// Render a transcript in the requested format
pub fn render(transcript: &Transcript, format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(transcript.text().into_string()),
        OutputFormat::Json => format_as_json(transcript),
    }
}

/// Pretty-printed JSON including every segment
pub fn format_as_json(transcript: &Transcript) -> Result<String> {
    let document = TranscriptDocument {
        video_id: transcript.video_id.as_str(),
        language: &transcript.language,
        backend: transcript.backend.as_str(),
        text: transcript.text(),
        duration: transcript.covered_duration(),
        segments: &transcript.segments,
        fetched_at: transcript.fetched_at,
    };

    serde_json::to_string_pretty(&document).context("Failed to serialize transcript")
}

/// Print transcript to console
pub fn print_to_console(transcript: &Transcript, format: &OutputFormat) -> Result<()> {
    let content = render(transcript, format)?;
    println!("{}", content);
    Ok(())
}
