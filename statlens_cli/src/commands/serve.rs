use statlens_core::CreatorAnalyzer;

use crate::cli::Cli;
use crate::commands::{load_config, Result};
use crate::server;

pub async fn run(cli: &Cli, host: &str, port: u16) -> Result<()> {
    let config = load_config(cli)?;
    let analyzer = CreatorAnalyzer::new(&config)?;
    server::run(analyzer, host, port).await?;
    Ok(())
}
