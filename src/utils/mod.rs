use crate::config::ProviderConfig;
use crate::providers::ytdlp::YtDlpProvider;
use crate::providers::Backend;

/// Format duration in human-readable format
pub fn format_duration(seconds: f64) -> String {
    let total_seconds = seconds as u64;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

/// Check if the selected backend has the external tools it needs
pub async fn check_dependencies(config: &ProviderConfig) -> Vec<String> {
    let mut missing = Vec::new();

    if config.backend == Backend::YtDlp
        && !YtDlpProvider::new(&config.yt_dlp_path).check_availability().await
    {
        missing.push(format!(
            "{} - required by the yt-dlp backend (https://github.com/yt-dlp/yt-dlp)",
            config.yt_dlp_path
        ));
    }

    missing
}
