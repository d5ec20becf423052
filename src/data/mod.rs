//! The material dataset: records, the immutable table, and CSV loading.
//!
//! A [`MaterialTable`] is built once at startup and never written to again.
//! Loading is strict through [`CsvLoader`] and lenient through
//! [`MaterialTable::load_or_empty`], which substitutes an empty table when the
//! file is missing or its header lacks the required `material` column.

mod loader;

pub use loader::{parse_flag, parse_number, Column, CsvLoader};

use serde::{Deserialize, Serialize};
use std::path::Path;

/// One row of the sustainability dataset.
///
/// # Examples
///
/// ```
/// use sustainrec::data::MaterialRecord;
///
/// let glass = MaterialRecord::new("Glass")
///     .with_category("container")
///     .with_recyclable(true)
///     .with_features(0.85, 1.2, 0.6);
/// assert_eq!(glass.material, "Glass");
/// assert!(glass.recyclable);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRecord {
    /// Material name, e.g. "Recycled PET"
    pub material: String,
    /// Grouping used for like-for-like alternatives
    #[serde(default)]
    pub category: String,
    /// Free-text description indexed for content similarity
    #[serde(default)]
    pub description: String,
    /// Whether the material can be recycled
    #[serde(default)]
    pub recyclable: bool,
    /// Whether the material can be composted
    #[serde(default)]
    pub compostable: bool,
    /// kg CO2e per kg of material
    #[serde(default)]
    pub carbon_footprint: f64,
    /// Litres of water per kg of material
    #[serde(default)]
    pub water_usage: f64,
    /// Relative cost per kg
    #[serde(default)]
    pub cost: f64,
}

impl MaterialRecord {
    /// Record with only a name; every other attribute takes its default.
    #[must_use]
    pub fn new(material: impl Into<String>) -> Self {
        Self {
            material: material.into(),
            category: String::new(),
            description: String::new(),
            recyclable: false,
            compostable: false,
            carbon_footprint: 0.0,
            water_usage: 0.0,
            cost: 0.0,
        }
    }

    /// Set the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the recyclable flag.
    #[must_use]
    pub fn with_recyclable(mut self, recyclable: bool) -> Self {
        self.recyclable = recyclable;
        self
    }

    /// Set the compostable flag.
    #[must_use]
    pub fn with_compostable(mut self, compostable: bool) -> Self {
        self.compostable = compostable;
        self
    }

    /// Set carbon footprint, water usage and cost in one call.
    #[must_use]
    pub fn with_features(mut self, carbon_footprint: f64, water_usage: f64, cost: f64) -> Self {
        self.carbon_footprint = carbon_footprint;
        self.water_usage = water_usage;
        self.cost = cost;
        self
    }
}

/// Ordered, read-only collection of [`MaterialRecord`]s.
///
/// Row position is the only identity a record has.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialTable {
    records: Vec<MaterialRecord>,
}

impl MaterialTable {
    /// Wrap records in table order.
    #[must_use]
    pub fn new(records: Vec<MaterialRecord>) -> Self {
        Self { records }
    }

    /// Table with no rows.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load `path`, falling back to an empty table on any failure.
    ///
    /// The failure is logged at `warn`; the process keeps running and every
    /// query answers with an empty result.
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match CsvLoader::new().load(path) {
            Ok(table) => {
                tracing::info!(path = %path.display(), rows = table.len(), "dataset loaded");
                table
            }
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "dataset unavailable, serving an empty table"
                );
                Self::empty()
            }
        }
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Row at `idx`.
    #[must_use]
    pub fn get(&self, idx: usize) -> Option<&MaterialRecord> {
        self.records.get(idx)
    }

    /// All rows in table order.
    #[must_use]
    pub fn records(&self) -> &[MaterialRecord] {
        &self.records
    }

    /// Iterate rows in table order.
    pub fn iter(&self) -> std::slice::Iter<'_, MaterialRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a MaterialTable {
    type Item = &'a MaterialRecord;
    type IntoIter = std::slice::Iter<'a, MaterialRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl FromIterator<MaterialRecord> for MaterialTable {
    fn from_iter<I: IntoIterator<Item = MaterialRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
