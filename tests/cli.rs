use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn config_file(content: &str) -> NamedTempFile {
    let file = NamedTempFile::new().unwrap();
    std::fs::write(file.path(), content).unwrap();
    file
}

fn transcriptor(config: &NamedTempFile) -> Command {
    let mut cmd = Command::cargo_bin("transcriptor").unwrap();
    cmd.env_remove("RUST_LOG").arg("--config").arg(config.path());
    cmd
}

#[test]
fn video_id_from_short_url() {
    let config = config_file("{}");

    transcriptor(&config)
        .args(["video-id", "https://youtu.be/HFfXvfFe9F8?si=ASYYUR5y_ZQsuSe1"])
        .assert()
        .success()
        .stdout("HFfXvfFe9F8\n");
}

#[test]
fn video_id_from_watch_url() {
    let config = config_file("{}");

    transcriptor(&config)
        .args(["video-id", "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s"])
        .assert()
        .success()
        .stdout("dQw4w9WgXcQ\n");
}

#[test]
fn video_id_rejects_url_without_id() {
    let config = config_file("{}");

    transcriptor(&config)
        .args(["video-id", "https://example.com/about"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed video URL"));
}

#[test]
fn extract_malformed_url_fails_before_fetching() {
    let config = config_file("provider:\n  backend: yt-dlp\n  yt_dlp_path: definitely-not-yt-dlp-on-path\n");

    transcriptor(&config)
        .args(["--quiet", "extract", "https://example.com/about"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Failed to extract transcript:"))
        .stderr(predicate::str::contains("Malformed video URL"))
        .stderr(predicate::str::contains("Error:").not());
}

#[test]
fn extract_reports_missing_yt_dlp() {
    let config = config_file("provider:\n  backend: yt-dlp\n  yt_dlp_path: definitely-not-yt-dlp-on-path\n");

    transcriptor(&config)
        .args(["--quiet", "extract", "https://youtu.be/dQw4w9WgXcQ"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Dependency check warnings"))
        .stderr(predicate::str::contains("Failed to extract transcript:"));
}

#[test]
fn config_show_prints_loaded_values() {
    let config = config_file("provider:\n  language: de\n  timeout_secs: 90\napp:\n  default_output_format: json\n");

    transcriptor(&config)
        .args(["config", "--show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Backend: youtube"))
        .stdout(predicate::str::contains("Language: de"))
        .stdout(predicate::str::contains("Fetch Timeout: 1m 30s"))
        .stdout(predicate::str::contains("Default Format: json"));
}

#[test]
fn config_without_show_prints_location() {
    let config = config_file("{}");

    transcriptor(&config)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Edit the config file to change settings:"))
        .stdout(predicate::str::contains(config.path().to_string_lossy().into_owned()))
        .stdout(predicate::str::contains("coming soon").not());
}

#[test]
fn invalid_config_is_rejected() {
    let config = config_file("provider:\n  language: \"\"\n");

    transcriptor(&config)
        .args(["config", "--show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Caption language must not be empty"));
}

#[test]
fn unknown_backend_is_rejected_by_cli() {
    let config = config_file("{}");

    transcriptor(&config)
        .args(["extract", "https://youtu.be/abc", "--backend", "vimeo"])
        .assert()
        .failure();
}
