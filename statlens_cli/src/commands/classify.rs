use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Table};
use owo_colors::OwoColorize;
use statlens_core::Classifier;

use crate::cli::{Cli, OutputFormat};
use crate::commands::Result;

pub fn run(cli: &Cli, input: Option<&str>) -> Result<()> {
    let classifier = Classifier::new();

    let Some(input) = input else {
        return list_rules(cli, &classifier);
    };

    let resolved = classifier.classify(input)?;
    match cli.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&resolved)?),
        OutputFormat::Text => println!(
            "{}\t{:?}\t{}\t{}",
            resolved.platform, resolved.kind, resolved.target, resolved.rule
        ),
        OutputFormat::Pretty => {
            println!("{} {}", "Platform:".bold(), resolved.platform.cyan());
            println!("{} {:?}", "Kind:".bold(), resolved.kind);
            println!("{} {}", "Target:".bold(), resolved.target.green());
            println!("{} {}", "Rule:".bold(), resolved.rule.dimmed());
        }
    }
    Ok(())
}

fn list_rules(cli: &Cli, classifier: &Classifier) -> Result<()> {
    let rules = classifier.list_rules();
    match cli.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rules)?),
        OutputFormat::Text => {
            for rule in &rules {
                println!(
                    "{}\t{}\t{}\t{}",
                    rule.id, rule.platform, rule.example, rule.description
                );
            }
        }
        OutputFormat::Pretty => {
            println!("{}", "Input Rules (checked top to bottom)".cyan().bold());
            println!();
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .apply_modifier(UTF8_ROUND_CORNERS)
                .set_header(vec!["Rule", "Platform", "Example", "Description"]);
            for rule in rules {
                table.add_row(vec![
                    rule.id,
                    rule.platform.to_string(),
                    rule.example,
                    rule.description,
                ]);
            }
            println!("{table}");
        }
    }
    Ok(())
}
