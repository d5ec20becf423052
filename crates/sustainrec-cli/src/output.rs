//! Output formatting utilities

use colored::Colorize;
use serde::Serialize;
use sustainrec::data::MaterialRecord;
use sustainrec::recommend::ScoredRecord;

use crate::error::{CliError, Result};

/// Print a section header
pub(crate) fn section(title: &str) {
    println!("\n{}", format!("=== {title} ===").cyan().bold());
}

/// Print a key-value pair
pub(crate) fn kv(key: &str, value: impl std::fmt::Display) {
    println!("  {}: {}", key.white().bold(), value);
}

/// Print a warning message
pub(crate) fn warning(msg: &str) {
    println!("{} {}", "[WARN]".yellow().bold(), msg);
}

/// Print `value` as pretty JSON on stdout
pub(crate) fn json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::Recommender(format!("JSON encoding failed: {e}")))?;
    println!("{rendered}");
    Ok(())
}

fn yes_no(flag: bool) -> colored::ColoredString {
    if flag {
        "yes".green()
    } else {
        "no".dimmed()
    }
}

/// One line per record
pub(crate) fn record_line(rank: usize, record: &MaterialRecord) {
    let category = if record.category.is_empty() {
        String::new()
    } else {
        format!(" [{}]", record.category)
    };
    println!(
        "  {:>2}. {}{}  recyclable={} compostable={} co2={:.2} water={:.1} cost={:.2}",
        rank,
        record.material.bold(),
        category.dimmed(),
        yes_no(record.recyclable),
        yes_no(record.compostable),
        record.carbon_footprint,
        record.water_usage,
        record.cost,
    );
}

/// One line per scored record
pub(crate) fn scored_line(rank: usize, scored: &ScoredRecord) {
    record_line(rank, &scored.record);
    println!("      {}", format!("similarity {:.4}", scored.similarity).cyan());
}
