use indicatif::{ProgressBar, ProgressStyle};
use statlens_core::CreatorAnalyzer;

use crate::cli::{Cli, OutputFormat};
use crate::commands::{load_config, Result};
use crate::output::print_analysis;

pub async fn run(cli: &Cli, input: &str) -> Result<()> {
    let config = load_config(cli)?;
    let analyzer = CreatorAnalyzer::new(&config)?;

    let spinner = (cli.output == OutputFormat::Pretty).then(|| {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(format!("Analyzing {}...", input));
        spinner.enable_steady_tick(std::time::Duration::from_millis(100));
        spinner
    });

    let result = analyzer.analyze(input).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    print_analysis(&result?, cli.output)
}
