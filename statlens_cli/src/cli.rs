use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

pub const DEFAULT_LOG_FILTER: &str = "statlens_cli=info,statlens_core=info";

#[derive(Parser)]
#[command(name = "statlens")]
#[command(about = "Statlens - creator statistics for Bilibili and YouTube")]
#[command(version)]
#[command(after_help = "\x1b[1;36mQuick Start:\x1b[0m
  statlens serve                              Start the HTTP service on 0.0.0.0:8000
  statlens analyze 946974                     Analyze a Bilibili creator by id
  statlens analyze @mkbhd --output json       Analyze a YouTube handle, raw JSON
  statlens classify \"joma tech\"               Show how an input is interpreted
  statlens classify                           List the input rules

\x1b[1;36mConfiguration:\x1b[0m
  --config statlens.toml                      Load settings from a TOML file
  RUST_LOG / --log-filter                     Adjust log verbosity")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Pretty)]
    pub output: OutputFormat,

    /// TOML configuration file
    #[arg(long, global = true, env = "STATLENS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Per-request timeout for Bilibili API calls, in seconds
    #[arg(long, global = true, env = "STATLENS_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Path to the yt-dlp binary
    #[arg(long, global = true, env = "STATLENS_YTDLP")]
    pub ytdlp_path: Option<String>,

    /// Log filter directives (takes precedence over RUST_LOG)
    #[arg(long, global = true)]
    pub log_filter: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP service
    ///
    /// Exposes `POST /analyze` and `GET /health` with permissive CORS.
    #[command(after_help = "\x1b[1;33mExamples:\x1b[0m
  statlens serve
  statlens serve --port 9000
  STATLENS_HOST=127.0.0.1 statlens serve")]
    Serve {
        /// Address to bind
        #[arg(long, env = "STATLENS_HOST", default_value = "0.0.0.0")]
        host: String,
        /// Port to bind
        #[arg(short, long, env = "STATLENS_PORT", default_value_t = 8000)]
        port: u16,
    },

    /// Analyze one creator and print the result
    #[command(after_help = "\x1b[1;33mExamples:\x1b[0m
  statlens analyze https://www.bilibili.com/video/BV1GJ411x7h7
  statlens analyze https://space.bilibili.com/946974
  statlens analyze fireship
  statlens analyze \"joma tech\" --output json")]
    Analyze {
        /// URL, creator id, @handle or search text
        input: String,
    },

    /// Show how an input would be classified, without any network access
    ///
    /// Without an input, lists the classification rules in the order they are checked.
    Classify {
        /// URL, creator id, @handle or search text
        input: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored, human-readable summary
    Pretty,
    /// Pretty-printed JSON
    Json,
    /// Plain tab-separated text
    Text,
}
