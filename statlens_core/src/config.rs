use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::AnalysisError;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Settings shared by the platform clients.
///
/// Every field has a default, so a TOML file only needs the keys it changes:
///
/// ```toml
/// request_timeout_secs = 5
/// ytdlp_path = "/opt/homebrew/bin/yt-dlp"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Per-call timeout for Bilibili API requests
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub referer: String,
    pub bilibili_api_base: String,
    /// yt-dlp binary name or absolute path
    pub ytdlp_path: String,
    pub extractor_timeout_secs: u64,
    /// Only the first page of a channel/playlist is read
    pub playlist_end: u32,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            referer: "https://www.bilibili.com".to_string(),
            bilibili_api_base: "https://api.bilibili.com".to_string(),
            ytdlp_path: "yt-dlp".to_string(),
            extractor_timeout_secs: 60,
            playlist_end: 10,
        }
    }
}

impl AnalyzerConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, AnalysisError> {
        let config: Self =
            toml::from_str(raw).map_err(|e| AnalysisError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, AnalysisError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AnalysisError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn with_request_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = seconds;
        self
    }

    pub fn with_ytdlp_path(mut self, path: impl Into<String>) -> Self {
        self.ytdlp_path = path.into();
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn extractor_timeout(&self) -> Duration {
        Duration::from_secs(self.extractor_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.request_timeout_secs == 0 || self.extractor_timeout_secs == 0 {
            return Err(AnalysisError::Config(
                "timeouts must be at least one second".to_string(),
            ));
        }
        if self.playlist_end == 0 {
            return Err(AnalysisError::Config(
                "playlist_end must be at least 1".to_string(),
            ));
        }
        url::Url::parse(&self.bilibili_api_base).map_err(|e| {
            AnalysisError::Config(format!("invalid bilibili_api_base: {}", e))
        })?;
        Ok(())
    }
}
