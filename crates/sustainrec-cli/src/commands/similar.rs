//! `similar` command: feature-vector ranking

use std::path::Path;

use sustainrec::data::parse_flag;
use sustainrec::recommend::FeatureVector;

use super::load_recommender;
use super::serve::FeatureRecommendationResponse;
use crate::error::{CliError, Result};
use crate::output;

/// Rank the dataset against the given feature vector
pub(crate) fn run(
    dataset: &Path,
    material: &str,
    carbon_footprint: f64,
    recyclable: &str,
    water_usage: f64,
    cost: f64,
    json: bool,
) -> Result<()> {
    if material.trim().is_empty() {
        return Err(CliError::ValidationFailed("material: required".to_string()));
    }
    let recyclable = parse_flag(recyclable).ok_or_else(|| {
        CliError::ValidationFailed(format!(
            "recyclable: expected true/false/1/0/yes/no, got '{recyclable}'"
        ))
    })?;
    let query = FeatureVector::new(carbon_footprint, recyclable, water_usage, cost);
    query.validate()?;

    let recommender = load_recommender(dataset)?;
    let ranked = recommender.similar_by_features(&query)?;

    if json {
        return output::json(&FeatureRecommendationResponse {
            query: material.to_string(),
            recommendations: ranked,
        });
    }

    output::section("Similar Materials");
    output::kv("Query", material);
    output::kv(
        "Features",
        format!(
            "co2={carbon_footprint} recyclable={recyclable} water={water_usage} cost={cost}"
        ),
    );
    println!();
    if ranked.is_empty() {
        output::warning("Dataset is empty");
    }
    for (i, scored) in ranked.iter().enumerate() {
        output::scored_line(i + 1, scored);
    }
    Ok(())
}
