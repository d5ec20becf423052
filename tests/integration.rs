//! Integration tests for the sustainrec library.
//!
//! These tests drive the full path: CSV file on disk, loader, index build,
//! then each recommendation mode.

use std::io::Write;

use sustainrec::prelude::*;
use tempfile::NamedTempFile;

const CATALOGUE: &str = "\
Material Type,Category,Description,Recyclable,Compostable,Carbon Footprint,Water Usage,Cost
Recycled PET,plastic,recycled plastic drinks bottle,true,false,1.5,20,1.1
Polystyrene Foam,plastic,expanded plastic foam packaging,false,false,3.4,12,0.6
Glass Jar,container,reusable glass jar,true,false,0.85,5,1.4
Molded Pulp,paper,compostable molded fibre packaging,true,true,0.4,30,0.9
Bioplastic Film,plastic,compostable plastic film packaging,false,true,1.2,40,1.8
Aluminium Can,metal,recyclable aluminium drinks can,yes,no,8.1,15,1.3
";

fn write_csv(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write csv");
    file
}

fn load(contents: &str) -> Recommender {
    let file = write_csv(contents);
    let table = CsvLoader::new().load(file.path()).expect("valid dataset");
    Recommender::new(table)
}

fn names(records: &[MaterialRecord]) -> Vec<&str> {
    records.iter().map(|r| r.material.as_str()).collect()
}

#[test]
fn test_recyclable_filter_keeps_file_order() {
    let recommender = load(CATALOGUE);
    let outcome = recommender.recommend(&AttributeQuery::new().with_recyclable(true));

    assert!(matches!(outcome, Recommendation::Matched(_)));
    assert_eq!(
        names(outcome.records()),
        vec!["Recycled PET", "Glass Jar", "Molded Pulp", "Aluminium Can"]
    );
}

#[test]
fn test_all_constraints_combine() {
    let recommender = load(CATALOGUE);
    let query = AttributeQuery::from_params(Some("pulp"), Some("true"), Some("1"))
        .expect("valid params");

    let outcome = recommender.recommend(&query);
    assert_eq!(names(outcome.records()), vec!["Molded Pulp"]);
}

#[test]
fn test_unknown_material_falls_back_to_text() {
    let recommender = load(CATALOGUE);
    let outcome = recommender.recommend(&AttributeQuery::new().with_material("foam"));
    assert_eq!(outcome.stage(), "filter");

    let outcome = recommender.recommend(&AttributeQuery::new().with_material("styrofoam"));
    assert_eq!(outcome.stage(), "none");
    assert!(outcome.is_empty());
}

#[test]
fn test_fallback_excludes_the_located_row() {
    let recommender = load(CATALOGUE);
    let query = AttributeQuery::new()
        .with_material("Glass Jar")
        .with_compostable(true);

    // Glass Jar is not compostable, so the filter is empty and the text
    // fallback ranks everything else against it
    let outcome = recommender.recommend(&query);
    assert_eq!(outcome.stage(), "text_similarity");
    let found = names(outcome.records());
    assert!(!found.contains(&"Glass Jar"));
    assert!(!found.is_empty() && found.len() <= 3);
}

#[test]
fn test_text_similarity_prefers_shared_terms() {
    let recommender = load(CATALOGUE);
    let scored = recommender.similar_by_text_scored("Bioplastic Film");

    assert!(!scored.is_empty());
    assert!(scored
        .windows(2)
        .all(|w| w[0].similarity >= w[1].similarity));
    // plastic + packaging + compostable overlap
    let top = scored[0].record.material.as_str();
    assert!(
        top == "Polystyrene Foam" || top == "Molded Pulp" || top == "Recycled PET",
        "unexpected top match {top}"
    );
}

#[test]
fn test_feature_ranking_matches_exact_row() {
    let recommender = load(CATALOGUE);
    let query = FeatureVector::new(8.1, true, 15.0, 1.3);

    let ranked = recommender.similar_by_features(&query).expect("finite query");
    assert_eq!(ranked.len(), 3);
    assert_eq!(ranked[0].record.material, "Aluminium Can");
    assert!((ranked[0].similarity - 1.0).abs() < 1e-9);
}

#[test]
fn test_feature_ranking_rejects_nan() {
    let recommender = load(CATALOGUE);
    let query = FeatureVector::new(f64::NAN, false, 1.0, 1.0);
    assert!(recommender.similar_by_features(&query).is_err());
}

#[test]
fn test_alternatives_share_category() {
    let recommender = load(CATALOGUE);
    let alternatives = recommender.alternatives("recycled pet");
    assert_eq!(
        names(&alternatives),
        vec!["Polystyrene Foam", "Bioplastic Film"]
    );
}

#[test]
fn test_malformed_rows_are_skipped() {
    let csv = "\
Material Type,Recyclable,Carbon Footprint
Paper,true,0.9
Broken,perhaps,1.0
,true,2.0
Steel,false,abc
Glass,yes,0.85
";
    let recommender = load(csv);
    assert_eq!(names(recommender.table().records()), vec!["Paper", "Glass"]);
}

#[test]
fn test_missing_material_column_is_an_error() {
    let file = write_csv("Name,Recyclable\nPaper,true\n");
    let err = CsvLoader::new()
        .load(file.path())
        .expect_err("material column is required");
    assert!(matches!(err, SustainError::MissingColumn { .. }));
}

#[test]
fn test_lenient_load_degrades_to_empty() {
    let file = write_csv("Name,Recyclable\nPaper,true\n");
    let recommender = Recommender::from_csv_or_empty(file.path(), RecommenderConfig::default());
    assert!(recommender.table().is_empty());
    assert!(recommender.index().is_none());

    let outcome = recommender.recommend(&AttributeQuery::new().with_material("paper"));
    assert!(outcome.is_empty());
    assert!(recommender
        .similar_by_features(&FeatureVector::new(1.0, true, 1.0, 1.0))
        .expect("finite query")
        .is_empty());
}

#[test]
fn test_semicolon_delimited_dataset() {
    let file = write_csv("material;recyclable\nPaper;1\nFoam;0\n");
    let table = CsvLoader::new()
        .with_delimiter(b';')
        .load(file.path())
        .expect("valid dataset");
    let recommender = Recommender::new(table);

    let outcome = recommender.recommend(&AttributeQuery::new().with_recyclable(false));
    assert_eq!(names(outcome.records()), vec!["Foam"]);
}

#[test]
fn test_footprint_workflow() {
    let food: FoodProfile = "vegan".parse().expect("known profile");
    let report = sustainrec::footprint::calculate(&FootprintInput::new(10.0, 5.0, food))
        .expect("valid input");

    // 10 * 0.25 + 5 * 0.6 + 2
    assert!((report.total_co2 - 7.5).abs() < 1e-9);
    assert!(!report.recommendation.is_empty());
}
