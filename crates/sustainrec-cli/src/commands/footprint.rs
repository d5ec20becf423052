//! `footprint` command: personal carbon footprint

use colored::Colorize;
use sustainrec::footprint::{calculate, FoodProfile, FootprintInput};

use crate::error::Result;
use crate::output;

/// Estimate and print the footprint
pub(crate) fn run(distance: f64, electricity: f64, food: &str, json: bool) -> Result<()> {
    let food: FoodProfile = food.parse()?;
    let input = FootprintInput::new(distance, electricity, food);
    let report = calculate(&input)?;

    if json {
        return output::json(&report);
    }

    output::section("Carbon Footprint");
    output::kv("Distance", format!("{distance} km"));
    output::kv("Electricity", format!("{electricity} kWh"));
    output::kv("Diet", food);
    println!();
    output::kv("Total", format!("{:.2} kg CO2", report.total_co2).bold());
    output::kv("Suggestion", report.recommendation.green());
    Ok(())
}
