pub mod analyze;
pub mod classify;
pub mod serve;

use statlens_core::{AnalysisError, AnalyzerConfig};
use thiserror::Error;

use crate::cli::Cli;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("{0}")]
    Analysis(#[from] AnalysisError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CommandError>;

/// Defaults, then the config file, then command-line flags.
pub fn load_config(cli: &Cli) -> Result<AnalyzerConfig> {
    let mut config = match &cli.config {
        Some(path) => AnalyzerConfig::from_toml_file(path)
            .map_err(|e| CommandError::InvalidConfig(e.to_string()))?,
        None => AnalyzerConfig::default(),
    };

    if let Some(seconds) = cli.timeout {
        config = config.with_request_timeout(seconds);
    }
    if let Some(path) = &cli.ytdlp_path {
        config = config.with_ytdlp_path(path.clone());
    }

    config
        .validate()
        .map_err(|e| CommandError::InvalidConfig(e.to_string()))?;
    Ok(config)
}
