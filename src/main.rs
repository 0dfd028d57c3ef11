use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use transcript_extractor::cli::{Cli, Commands};
use transcript_extractor::config::Config;
use transcript_extractor::extractors::{Transcript, TranscriptExtractor, VideoId};
use transcript_extractor::{output, providers, utils};

fn init_tracing(verbose: bool, json: bool) {
    let default_filter = if verbose {
        "transcriptor=debug,transcript_extractor=debug"
    } else {
        "transcriptor=info,transcript_extractor=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(json.then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();
}

fn spinner(quiet: bool, message: String) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let progress = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}") {
        progress.set_style(style);
    }
    progress.set_message(message);
    progress.enable_steady_tick(Duration::from_millis(120));
    progress
}

/// Build the configured provider and fetch the transcript of `url`
async fn fetch_transcript(config: &Config, url: &str) -> transcript_extractor::Result<Transcript> {
    let provider = providers::create_provider(&config.provider)?;

    TranscriptExtractor::new(provider)
        .with_language(config.provider.language.clone())
        .with_timeout(config.timeout())
        .fetch(url)
        .await
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    let mut config = Config::load(cli.config.as_deref()).await?;

    match cli.command {
        Commands::Extract {
            url,
            format,
            backend,
            language,
        } => {
            if let Some(backend) = backend {
                config.provider.backend = backend;
            }
            if let Some(language) = language {
                config.provider.language = language;
            }
            let format = format.unwrap_or(config.app.default_output_format);

            // Check for required external dependencies (non-fatal)
            let missing_deps = utils::check_dependencies(&config.provider).await;
            if !missing_deps.is_empty() {
                eprintln!("⚠️  Dependency check warnings:");
                for dep in missing_deps {
                    eprintln!("   • {}", dep);
                }
                eprintln!("   (Continuing anyway - tools may be available)");
            }

            tracing::info!("Extracting transcript for URL: {}", url);

            let progress = spinner(cli.quiet, format!("Fetching transcript via {}...", config.provider.backend));
            let result = fetch_transcript(&config, &url).await;
            progress.finish_and_clear();

            match result {
                Ok(transcript) => output::print_to_console(&transcript, &format)?,
                Err(e) => {
                    tracing::error!("Transcript extraction failed for {}: {}", url, e);
                    eprintln!(
                        "{} {}",
                        console::style("Failed to extract transcript:").red().bold(),
                        e
                    );
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Commands::VideoId { url } => {
            let video_id = VideoId::parse(&url)?;
            println!("{}", video_id);
        }
        Commands::Config { show } => {
            if show {
                config.display();
            } else {
                Config::print_location(cli.config.as_deref())?;
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
