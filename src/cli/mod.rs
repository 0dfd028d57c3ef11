use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::providers::Backend;

#[derive(Parser)]
#[command(
    name = "transcriptor",
    about = "Transcript Extractor - Pull the caption transcript of a YouTube video",
    version,
    long_about = "A small CLI tool that derives the video id from a YouTube URL (youtu.be or watch?v=), fetches the video's caption track and prints it as a single line of text or as JSON."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Configuration file to use instead of the default location
    #[arg(short, long, global = true, value_name = "FILE", env = "TRANSCRIPTOR_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch and print the transcript of a video
    Extract {
        /// Video URL (https://youtu.be/<id> or https://www.youtube.com/watch?v=<id>)
        #[arg(value_name = "URL")]
        url: String,

        /// Output format (defaults to the configured format)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Transcript provider (defaults to the configured backend)
        #[arg(short, long, value_enum)]
        backend: Option<Backend>,

        /// Caption language to request (defaults to the configured language)
        #[arg(short, long, value_name = "LANG")]
        language: Option<String>,
    },

    /// Print the video id derived from a URL without fetching anything
    VideoId {
        #[arg(value_name = "URL")]
        url: String,
    },

    /// Show or edit configuration
    Config {
        /// Show current configuration
        #[arg(short, long)]
        show: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Joined transcript text
    Text,
    /// JSON with video id, segments and timestamps
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_extract_overrides() {
        let cli = Cli::try_parse_from([
            "transcriptor",
            "--quiet",
            "extract",
            "https://youtu.be/abc",
            "--format",
            "json",
            "--backend",
            "yt-dlp",
            "-l",
            "de",
        ])
        .unwrap();

        assert!(cli.quiet);
        match cli.command {
            Commands::Extract {
                url,
                format,
                backend,
                language,
            } => {
                assert_eq!(url, "https://youtu.be/abc");
                assert!(matches!(format, Some(OutputFormat::Json)));
                assert_eq!(backend, Some(Backend::YtDlp));
                assert_eq!(language.as_deref(), Some("de"));
            }
            _ => panic!("expected extract command"),
        }
    }

    #[test]
    fn test_extract_requires_url() {
        assert!(Cli::try_parse_from(["transcriptor", "extract"]).is_err());
    }
}
