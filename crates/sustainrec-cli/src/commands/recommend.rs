//! `recommend` and `alternatives` commands

use std::path::Path;

use serde::Serialize;
use sustainrec::data::MaterialRecord;
use sustainrec::recommend::{AttributeQuery, Recommendation};

use super::load_recommender;
use crate::error::Result;
use crate::output;

#[derive(Debug, Serialize)]
struct RecommendReport<'a> {
    stage: &'static str,
    recommendations: &'a [MaterialRecord],
}

/// Run the attribute query with text-similarity fallback
pub(crate) fn run(
    dataset: &Path,
    material: Option<&str>,
    recyclable: Option<&str>,
    compostable: Option<&str>,
    json: bool,
) -> Result<()> {
    let query = AttributeQuery::from_params(material, recyclable, compostable)?;
    let recommender = load_recommender(dataset)?;
    let outcome = recommender.recommend(&query);
    tracing::info!(stage = outcome.stage(), count = outcome.records().len(), "recommend");

    if json {
        return output::json(&RecommendReport {
            stage: outcome.stage(),
            recommendations: outcome.records(),
        });
    }

    output::section("Recommendations");
    output::kv("Dataset", dataset.display());
    output::kv("Records", recommender.table().len());
    if let Some(key) = query.material() {
        output::kv("Material", key);
    }
    if let Some(flag) = query.recyclable {
        output::kv("Recyclable", flag);
    }
    if let Some(flag) = query.compostable {
        output::kv("Compostable", flag);
    }
    output::kv("Stage", outcome.stage());
    println!();

    match &outcome {
        Recommendation::NoMatch => output::warning("No matching materials"),
        Recommendation::Matched(records) | Recommendation::Similar(records) => {
            for (i, record) in records.iter().enumerate() {
                output::record_line(i + 1, record);
            }
        }
    }
    Ok(())
}

/// List same-category alternatives for a material
pub(crate) fn run_alternatives(dataset: &Path, material: &str, json: bool) -> Result<()> {
    let recommender = load_recommender(dataset)?;
    let alternatives = recommender.alternatives(material);

    if json {
        return output::json(&alternatives);
    }

    output::section("Alternatives");
    output::kv("Material", material);
    println!();
    if alternatives.is_empty() {
        output::warning("No alternatives in the same category");
    }
    for (i, record) in alternatives.iter().enumerate() {
        output::record_line(i + 1, record);
    }
    Ok(())
}
