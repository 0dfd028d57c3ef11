//! Transcript Extractor - A Rust CLI tool for pulling YouTube transcripts
//!
//! This library derives a video identifier from a YouTube URL, fetches the video's
//! caption segments from a transcript provider and joins them into a single text.

pub mod cli;
pub mod config;
pub mod extractors;
pub mod output;
pub mod providers;
pub mod utils;

pub use cli::{Cli, Commands, OutputFormat};
pub use config::Config;
pub use extractors::{Transcript, TranscriptExtractor, TranscriptText, VideoId};
pub use providers::{Backend, CaptionSegment, TranscriptProvider};

/// Result type used throughout the library
pub type Result<T, E = ExtractionError> = std::result::Result<T, E>;

/// Everything that can go wrong between a URL and its transcript
#[derive(thiserror::Error, Debug)]
pub enum ExtractionError {
    #[error("Malformed video URL '{url}': {reason}")]
    MalformedUrl { url: String, reason: &'static str },

    #[error("No transcript found for video {video_id}")]
    NoTranscript { video_id: String },

    #[error("Transcript provider failed: {0}")]
    Provider(String),

    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),

    #[error("Transcript fetch timed out after {after:?}")]
    Timeout { after: std::time::Duration },
}
