//! Numeric feature-vector similarity.

use serde::{Deserialize, Serialize};

use crate::data::{MaterialRecord, MaterialTable};
use crate::error::{Result, SustainError};
use crate::primitives::Vector;
use crate::text::similarity::top_k_similar;

/// Numeric profile of a material: `[carbon_footprint, recyclable (0/1), water_usage, cost]`.
///
/// # Examples
///
/// ```
/// use sustainrec::recommend::FeatureVector;
///
/// let v = FeatureVector::new(2.5, true, 120.0, 0.8).to_vector();
/// assert_eq!(v.as_slice(), &[2.5, 1.0, 120.0, 0.8]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// kg CO2e per kg
    pub carbon_footprint: f64,
    /// Recyclable flag, encoded as 1.0 / 0.0
    pub recyclable: bool,
    /// Litres per kg
    pub water_usage: f64,
    /// Relative cost
    pub cost: f64,
}

impl FeatureVector {
    /// Build a feature vector.
    #[must_use]
    pub fn new(carbon_footprint: f64, recyclable: bool, water_usage: f64, cost: f64) -> Self {
        Self {
            carbon_footprint,
            recyclable,
            water_usage,
            cost,
        }
    }

    /// Features of a dataset row.
    #[must_use]
    pub fn from_record(record: &MaterialRecord) -> Self {
        Self::new(
            record.carbon_footprint,
            record.recyclable,
            record.water_usage,
            record.cost,
        )
    }

    /// Dense form used for cosine similarity.
    #[must_use]
    pub fn to_vector(&self) -> Vector<f64> {
        Vector::from_vec(vec![
            self.carbon_footprint,
            if self.recyclable { 1.0 } else { 0.0 },
            self.water_usage,
            self.cost,
        ])
    }

    /// Reject NaN and infinite components.
    ///
    /// # Errors
    ///
    /// Returns [`SustainError::Validation`] naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("carbon_footprint", self.carbon_footprint),
            ("water_usage", self.water_usage),
            ("cost", self.cost),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(SustainError::validation(field, "must be a finite number"));
            }
        }
        Ok(())
    }
}

/// A record paired with its similarity to the query.
///
/// Serializes flat: the record's fields plus `similarity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecord {
    /// The recommended record
    #[serde(flatten)]
    pub record: MaterialRecord,
    /// Cosine similarity to the query
    pub similarity: f64,
}

/// Rank every row of `table` against `query`, keeping the best `k`.
///
/// No filter stage runs first. Rows with an all-zero feature vector score 0.0.
///
/// # Errors
///
/// Returns a validation error when `query` has a non-finite component.
///
/// # Examples
///
/// ```
/// use sustainrec::data::{MaterialRecord, MaterialTable};
/// use sustainrec::recommend::{rank_by_features, FeatureVector};
///
/// let table = MaterialTable::new(vec![
///     MaterialRecord::new("Aluminium").with_recyclable(true).with_features(8.0, 20.0, 2.0),
///     MaterialRecord::new("Bamboo").with_recyclable(true).with_features(0.5, 100.0, 1.0),
/// ]);
/// let query = FeatureVector::new(0.5, true, 100.0, 1.0);
/// let ranked = rank_by_features(&table, &query, 3).expect("finite query");
/// assert_eq!(ranked[0].record.material, "Bamboo");
/// assert!((ranked[0].similarity - 1.0).abs() < 1e-12);
/// ```
pub fn rank_by_features(
    table: &MaterialTable,
    query: &FeatureVector,
    k: usize,
) -> Result<Vec<ScoredRecord>> {
    query.validate()?;
    let query = query.to_vector();
    let rows: Vec<Vector<f64>> = table
        .iter()
        .map(|record| FeatureVector::from_record(record).to_vector())
        .collect();

    Ok(top_k_similar(&query, &rows, k)?
        .into_iter()
        .filter_map(|(idx, similarity)| {
            table.get(idx).map(|record| ScoredRecord {
                record: record.clone(),
                similarity,
            })
        })
        .collect())
}
