//! Recommendation engine.
//!
//! A query runs through two explicit stages:
//!
//! 1. **Attribute filter**: substring match on the material name plus
//!    boolean equality on `recyclable` / `compostable`.
//! 2. **Text similarity fallback**: only when the filter found nothing and a
//!    text key was given. The key is located in the table and the rows whose
//!    TF-IDF vectors are closest to it are returned instead.
//!
//! Feature-vector queries skip the filter and rank the whole table by cosine
//! similarity over `[carbon_footprint, recyclable, water_usage, cost]`.
//!
//! # Quick Start
//!
//! ```
//! use sustainrec::data::{MaterialRecord, MaterialTable};
//! use sustainrec::recommend::{AttributeQuery, Recommendation, Recommender};
//!
//! let table = MaterialTable::new(vec![
//!     MaterialRecord::new("Recycled PET").with_description("recycled plastic bottle"),
//!     MaterialRecord::new("Polystyrene").with_description("plastic foam tray"),
//!     MaterialRecord::new("Glass").with_description("glass bottle"),
//! ]);
//! let recommender = Recommender::new(table);
//!
//! // Nothing is called "bottle", so the text ranker takes over.
//! let outcome = recommender.recommend(&AttributeQuery::new().with_material("bottle"));
//! assert!(matches!(outcome, Recommendation::Similar(_)));
//! assert!(outcome.records().iter().all(|r| r.material != "Recycled PET"));
//! ```

mod alternatives;
mod content_based;
mod features;
mod filter;

pub use alternatives::alternatives;
pub use content_based::{indexed_text, TextIndex};
pub use features::{rank_by_features, FeatureVector, ScoredRecord};
pub use filter::{filter_records, AttributeQuery};

use std::path::Path;

use crate::data::{MaterialRecord, MaterialTable};
use crate::error::Result;

/// Tuning knobs for a [`Recommender`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommenderConfig {
    /// Maximum results from either similarity ranker
    pub top_k: usize,
    /// Drop English stop words before indexing
    pub stop_words: bool,
    /// Shortest token kept by the indexer
    pub min_token_len: usize,
}

impl RecommenderConfig {
    /// Defaults: top 3, stop words removed, tokens of two or more characters.
    #[must_use]
    pub fn new() -> Self {
        Self {
            top_k: 3,
            stop_words: true,
            min_token_len: 2,
        }
    }

    /// Set the result limit.
    #[must_use]
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Toggle stop-word removal.
    #[must_use]
    pub fn with_stop_words(mut self, enabled: bool) -> Self {
        self.stop_words = enabled;
        self
    }

    /// Set the minimum token length.
    #[must_use]
    pub fn with_min_token_len(mut self, min_token_len: usize) -> Self {
        self.min_token_len = min_token_len;
        self
    }
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of an attribute query.
#[derive(Debug, Clone, PartialEq)]
pub enum Recommendation {
    /// Rows that passed the attribute filter, in table order
    Matched(Vec<MaterialRecord>),
    /// Rows ranked by text similarity after the filter came up empty
    Similar(Vec<MaterialRecord>),
    /// Neither stage produced anything
    NoMatch,
}

impl Recommendation {
    /// Records carried by the outcome; empty for [`Recommendation::NoMatch`].
    #[must_use]
    pub fn records(&self) -> &[MaterialRecord] {
        match self {
            Self::Matched(records) | Self::Similar(records) => records,
            Self::NoMatch => &[],
        }
    }

    /// Take the records.
    #[must_use]
    pub fn into_records(self) -> Vec<MaterialRecord> {
        match self {
            Self::Matched(records) | Self::Similar(records) => records,
            Self::NoMatch => Vec::new(),
        }
    }

    /// Whether no records came back.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }

    /// Stage that produced the outcome.
    #[must_use]
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Matched(_) => "filter",
            Self::Similar(_) => "text_similarity",
            Self::NoMatch => "none",
        }
    }
}

/// What to do after the attribute filter has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackDecision<'q> {
    /// The filter found rows; return them
    Accept,
    /// The filter found nothing; rank by similarity to this key
    RankByText(&'q str),
    /// The filter found nothing and there is no key to fall back on
    Exhausted,
}

impl<'q> FallbackDecision<'q> {
    /// Decide from the filter output and the query that produced it.
    ///
    /// # Examples
    ///
    /// ```
    /// use sustainrec::recommend::{AttributeQuery, FallbackDecision};
    ///
    /// let query = AttributeQuery::new().with_material("hemp");
    /// assert_eq!(FallbackDecision::decide(&[], &query), FallbackDecision::RankByText("hemp"));
    /// assert_eq!(
    ///     FallbackDecision::decide(&[], &AttributeQuery::new()),
    ///     FallbackDecision::Exhausted
    /// );
    /// ```
    #[must_use]
    pub fn decide(matched: &[MaterialRecord], query: &'q AttributeQuery) -> Self {
        if !matched.is_empty() {
            return Self::Accept;
        }
        match query.material() {
            Some(key) => Self::RankByText(key),
            None => Self::Exhausted,
        }
    }
}

/// The dataset, its text index and the ranking configuration.
///
/// Built once at startup and shared read-only afterwards.
#[derive(Debug, Clone)]
pub struct Recommender {
    table: MaterialTable,
    index: Option<TextIndex>,
    config: RecommenderConfig,
}

impl Recommender {
    /// Index `table` with the default configuration.
    #[must_use]
    pub fn new(table: MaterialTable) -> Self {
        Self::with_config(table, RecommenderConfig::default())
    }

    /// Index `table` with `config`.
    #[must_use]
    pub fn with_config(table: MaterialTable, config: RecommenderConfig) -> Self {
        let index = TextIndex::build(&table, &config);
        Self {
            table,
            index,
            config,
        }
    }

    /// Load `path` leniently (see [`MaterialTable::load_or_empty`]) and index it.
    pub fn from_csv_or_empty<P: AsRef<Path>>(path: P, config: RecommenderConfig) -> Self {
        Self::with_config(MaterialTable::load_or_empty(path), config)
    }

    /// The dataset.
    #[must_use]
    pub fn table(&self) -> &MaterialTable {
        &self.table
    }

    /// The text index; `None` when the table is empty.
    #[must_use]
    pub fn index(&self) -> Option<&TextIndex> {
        self.index.as_ref()
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    /// Run the filter, falling back to text similarity when it finds nothing.
    ///
    /// The fallback ranks by the text key alone; boolean constraints do not
    /// apply to it.
    #[must_use]
    pub fn recommend(&self, query: &AttributeQuery) -> Recommendation {
        let matched = filter_records(&self.table, query);
        match FallbackDecision::decide(&matched, query) {
            FallbackDecision::Accept => {
                tracing::debug!(count = matched.len(), "attribute filter matched");
                Recommendation::Matched(matched)
            }
            FallbackDecision::RankByText(key) => {
                let similar = self.similar_by_text(key);
                tracing::debug!(key, count = similar.len(), "falling back to text similarity");
                if similar.is_empty() {
                    Recommendation::NoMatch
                } else {
                    Recommendation::Similar(similar)
                }
            }
            FallbackDecision::Exhausted => Recommendation::NoMatch,
        }
    }

    /// Rows most similar in text to the row `key` refers to, excluding that row.
    #[must_use]
    pub fn similar_by_text(&self, key: &str) -> Vec<MaterialRecord> {
        self.similar_by_text_scored(key)
            .into_iter()
            .map(|scored| scored.record)
            .collect()
    }

    /// Like [`Recommender::similar_by_text`], keeping the scores.
    #[must_use]
    pub fn similar_by_text_scored(&self, key: &str) -> Vec<ScoredRecord> {
        let Some(index) = &self.index else {
            return Vec::new();
        };

        index
            .rank_by_text(&self.table, key, self.config.top_k)
            .into_iter()
            .filter_map(|(idx, similarity)| {
                self.table.get(idx).map(|record| ScoredRecord {
                    record: record.clone(),
                    similarity,
                })
            })
            .collect()
    }

    /// Rank the whole table against a feature vector.
    ///
    /// # Errors
    ///
    /// Returns a validation error for non-finite features.
    pub fn similar_by_features(&self, query: &FeatureVector) -> Result<Vec<ScoredRecord>> {
        rank_by_features(&self.table, query, self.config.top_k)
    }

    /// Other materials in the same category as `name`.
    #[must_use]
    pub fn alternatives(&self, name: &str) -> Vec<MaterialRecord> {
        alternatives(&self.table, name)
    }
}

#[cfg(test)]
#[path = "recommend_tests.rs"]
mod tests;
