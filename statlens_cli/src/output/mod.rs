use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Table};
use owo_colors::OwoColorize;
use statlens_core::AnalysisResult;

use crate::cli::OutputFormat;
use crate::commands::Result;

pub fn print_analysis(result: &AnalysisResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result)?),
        OutputFormat::Text => print_text(result),
        OutputFormat::Pretty => print_pretty(result),
    }
    Ok(())
}

fn print_text(result: &AnalysisResult) {
    let target = &result.target_uploader;
    println!("platform\t{}", result.platform);
    println!("name\t{}", target.info.name);
    println!("fans\t{}", target.info.fans);
    println!("archive_view\t{}", target.stats.archive_view);
    println!("likes\t{}", target.stats.likes);
    println!("video\t{}", target.current_video.title);
    println!("video_view\t{}", target.current_video.stat.view);
    for competitor in &result.competitors {
        println!(
            "competitor\t{}\t{}\t{}",
            competitor.mid, competitor.name, competitor.fans
        );
    }
}

fn print_pretty(result: &AnalysisResult) {
    let target = &result.target_uploader;
    let info = &target.info;
    let video = &target.current_video;

    println!(
        "{}  {}",
        info.name.bold().cyan(),
        format!("({})", result.platform).dimmed()
    );
    if !info.link.is_empty() {
        println!("{}", info.link.dimmed());
    }
    if !info.sign.is_empty() {
        println!("{}", info.sign);
    }
    println!();
    println!("{} {}", "Fans:".bold(), group_digits(info.fans));
    println!(
        "{} {}",
        "Total views:".bold(),
        group_digits(target.stats.archive_view)
    );
    println!("{} {}", "Total likes:".bold(), group_digits(target.stats.likes));
    println!();
    println!("{} {}", "Current video:".bold(), video.title.green());
    println!(
        "  views {}  likes {}  replies {}  favorites {}  danmaku {}",
        group_digits(video.stat.view),
        group_digits(video.stat.like),
        group_digits(video.stat.reply),
        group_digits(video.stat.favorite),
        group_digits(video.stat.danmaku),
    );

    if result.competitors.is_empty() {
        println!();
        println!("{}", "No competitors found".dimmed());
        return;
    }

    println!();
    println!("{}", "Competitors".cyan().bold());
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec!["Name", "Fans", "Video", "Views"]);
    for competitor in &result.competitors {
        table.add_row(vec![
            competitor.name.clone(),
            group_digits(competitor.fans),
            competitor.video_title.clone(),
            group_digits(competitor.video_view),
        ]);
    }
    println!("{table}");
}

/// 1234567 -> "1,234,567"
fn group_digits(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
