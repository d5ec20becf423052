//! Attribute filter: the first stage of a recommendation.

use serde::{Deserialize, Serialize};

use crate::data::{parse_flag, MaterialRecord, MaterialTable};
use crate::error::{Result, SustainError};

/// Constraints for the attribute filter. Every unset field is a no-op.
///
/// # Examples
///
/// ```
/// use sustainrec::recommend::AttributeQuery;
///
/// let query = AttributeQuery::new().with_material("paper").with_compostable(true);
/// assert_eq!(query.material(), Some("paper"));
/// assert_eq!(query.recyclable, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeQuery {
    material: Option<String>,
    /// Required recyclable flag
    pub recyclable: Option<bool>,
    /// Required compostable flag
    pub compostable: Option<bool>,
}

impl AttributeQuery {
    /// Query with no constraints.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text key. Blank keys count as absent.
    #[must_use]
    pub fn with_material(mut self, key: impl AsRef<str>) -> Self {
        let key = key.as_ref().trim();
        self.material = (!key.is_empty()).then(|| key.to_string());
        self
    }

    /// Require the recyclable flag.
    #[must_use]
    pub fn with_recyclable(mut self, recyclable: bool) -> Self {
        self.recyclable = Some(recyclable);
        self
    }

    /// Require the compostable flag.
    #[must_use]
    pub fn with_compostable(mut self, compostable: bool) -> Self {
        self.compostable = Some(compostable);
        self
    }

    /// Build a query from raw string parameters (HTTP query string, CLI args).
    ///
    /// # Errors
    ///
    /// Returns [`SustainError::Validation`] when a boolean parameter is not one
    /// of `true/false/1/0/yes/no`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sustainrec::recommend::AttributeQuery;
    ///
    /// let query = AttributeQuery::from_params(Some("glass"), Some("yes"), None).expect("valid");
    /// assert_eq!(query.recyclable, Some(true));
    ///
    /// assert!(AttributeQuery::from_params(None, Some("sometimes"), None).is_err());
    /// ```
    pub fn from_params(
        material: Option<&str>,
        recyclable: Option<&str>,
        compostable: Option<&str>,
    ) -> Result<Self> {
        let mut query = Self::new();
        if let Some(key) = material {
            query = query.with_material(key);
        }
        query.recyclable = recyclable.map(|v| flag_param("recyclable", v)).transpose()?;
        query.compostable = compostable.map(|v| flag_param("compostable", v)).transpose()?;
        Ok(query)
    }

    /// Text key, if one was supplied.
    #[must_use]
    pub fn material(&self) -> Option<&str> {
        self.material.as_deref()
    }

    /// Whether no constraint is set.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.material.is_none() && self.recyclable.is_none() && self.compostable.is_none()
    }

    /// Whether `record` satisfies every supplied constraint.
    ///
    /// The text key matches when it is a case-insensitive substring of the
    /// record's material name.
    #[must_use]
    pub fn matches(&self, record: &MaterialRecord) -> bool {
        let key_ok = self
            .material
            .as_deref()
            .map_or(true, |key| contains_ignore_case(&record.material, key));
        let recyclable_ok = self.recyclable.map_or(true, |want| record.recyclable == want);
        let compostable_ok = self
            .compostable
            .map_or(true, |want| record.compostable == want);

        key_ok && recyclable_ok && compostable_ok
    }
}

fn flag_param(field: &str, raw: &str) -> Result<bool> {
    parse_flag(raw).ok_or_else(|| {
        SustainError::validation(field, format!("expected true/false/1/0/yes/no, got '{raw}'"))
    })
}

/// Case-insensitive substring test.
pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Records satisfying every constraint in `query`, in table order.
///
/// An empty result is an ordinary answer. The table is never modified.
///
/// # Examples
///
/// ```
/// use sustainrec::data::{MaterialRecord, MaterialTable};
/// use sustainrec::recommend::{filter_records, AttributeQuery};
///
/// let table = MaterialTable::new(vec![
///     MaterialRecord::new("Recycled Paper").with_compostable(true),
///     MaterialRecord::new("Paper Cup"),
/// ]);
/// let hits = filter_records(&table, &AttributeQuery::new().with_material("PAPER"));
/// assert_eq!(hits.len(), 2);
/// ```
#[must_use]
pub fn filter_records(table: &MaterialTable, query: &AttributeQuery) -> Vec<MaterialRecord> {
    table
        .iter()
        .filter(|record| query.matches(record))
        .cloned()
        .collect()
}
