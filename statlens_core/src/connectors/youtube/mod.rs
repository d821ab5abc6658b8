// src/connectors/youtube/mod.rs
//
// Metadata extraction through the yt-dlp binary. The normalizer only sees the
// `MetadataExtractor` trait, so the binary can be swapped for any other
// implementation (or a fake in tests).

use async_trait::async_trait;
use serde_json::Value;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::config::AnalyzerConfig;
use crate::error::AnalysisError;

mod types;
pub use types::{CollectionRecord, ExtractedInfo, Thumbnail, VideoRecord};

#[async_trait]
pub trait MetadataExtractor: Send + Sync {
    /// Name of the extractor (for logging)
    fn name(&self) -> &'static str;

    /// Extract metadata for a URL or search pseudo-URL.
    ///
    /// With `flat` set, collection entries are listed but not deep-fetched.
    async fn extract(&self, target: &str, flat: bool) -> Result<Value, AnalysisError>;
}

/// Runs `yt-dlp --dump-single-json` as a child process.
pub struct YtDlpExtractor {
    ytdlp_path: String,
    timeout: Duration,
    playlist_end: u32,
}

impl YtDlpExtractor {
    pub fn new(config: &AnalyzerConfig) -> Self {
        Self {
            ytdlp_path: config.ytdlp_path.clone(),
            timeout: config.extractor_timeout(),
            playlist_end: config.playlist_end,
        }
    }

    fn build_args(&self, target: &str, flat: bool) -> Vec<String> {
        let mut args = vec![
            "--dump-single-json".to_string(),
            "--skip-download".to_string(),
            "--no-warnings".to_string(),
            "--quiet".to_string(),
            "--socket-timeout".to_string(),
            self.timeout.as_secs().to_string(),
        ];

        if flat {
            args.push("--flat-playlist".to_string());
            args.push("--playlist-end".to_string());
            args.push(self.playlist_end.to_string());
        }

        // Terminate option parsing so a target can never be read as a flag
        args.push("--".to_string());
        args.push(target.to_string());
        args
    }

    fn parse_stdout(stdout: &[u8]) -> Result<Value, AnalysisError> {
        let text = String::from_utf8_lossy(stdout);
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(trimmed)?)
    }
}

#[async_trait]
impl MetadataExtractor for YtDlpExtractor {
    fn name(&self) -> &'static str {
        "yt-dlp"
    }

    async fn extract(&self, target: &str, flat: bool) -> Result<Value, AnalysisError> {
        let args = self.build_args(target, flat);
        debug!(binary = %self.ytdlp_path, ?args, "running extractor");

        let child = Command::new(&self.ytdlp_path)
            .args(&args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        let output = tokio::time::timeout(self.timeout, child)
            .await
            .map_err(|_| {
                AnalysisError::Timeout(format!(
                    "{} did not finish within {}s",
                    self.ytdlp_path,
                    self.timeout.as_secs()
                ))
            })??;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!(status = %output.status, %stderr, "extractor exited with failure");
            return Err(AnalysisError::Extraction(if stderr.is_empty() {
                format!("{} exited with {}", self.ytdlp_path, output.status)
            } else {
                stderr
            }));
        }

        Self::parse_stdout(&output.stdout)
    }
}
