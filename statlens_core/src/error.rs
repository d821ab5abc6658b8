// src/error.rs

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Unsupported platform")]
    UnsupportedPlatform,

    #[error("Malformed target: {0}")]
    MalformedTarget(String),

    #[error("Bilibili API Error ({endpoint}, code {code}): {message}")]
    Upstream {
        endpoint: &'static str,
        code: i64,
        message: String,
    },

    #[error("Missing data in response from {0}")]
    MissingData(&'static str),

    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),

    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Extraction failed: {0}")]
    Extraction(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AnalysisError {
    pub fn code_str(&self) -> &'static str {
        match self {
            AnalysisError::UnsupportedPlatform => "unsupported_platform",
            AnalysisError::MalformedTarget(_) => "malformed_target",
            AnalysisError::Upstream { .. } => "upstream_rejected",
            AnalysisError::MissingData(_) => "upstream_error",
            AnalysisError::HttpRequest(_) => "upstream_error",
            AnalysisError::Timeout(_) => "timeout",
            AnalysisError::Extraction(_) => "extraction_failed",
            AnalysisError::Config(_) => "config_error",
            _ => "internal_error",
        }
    }

    /// Only an unresolvable input is the caller's fault; everything else is an
    /// internal failure at the HTTP edge.
    pub fn is_client_error(&self) -> bool {
        matches!(self, AnalysisError::UnsupportedPlatform)
    }

    /// True when the upstream answered, but with an error envelope or no data.
    pub fn is_upstream_rejection(&self) -> bool {
        matches!(
            self,
            AnalysisError::Upstream { .. } | AnalysisError::MissingData(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
