//! Content-based similarity over each record's text.
//!
//! Every row gets one TF-IDF vector built from its description (or its
//! material name when the description is blank) followed by its category.
//! Vectors are unit length, so cosine similarity between two rows reduces to
//! a sparse dot product.

use crate::data::{MaterialRecord, MaterialTable};
use crate::primitives::SparseVector;
use crate::text::similarity::{sparse_cosine_similarity, top_k};
use crate::text::tokenize::WordTokenizer;
use crate::text::vectorize::TfidfVectorizer;

use super::filter::contains_ignore_case;
use super::RecommenderConfig;

/// Text each record contributes to the index.
///
/// # Examples
///
/// ```
/// use sustainrec::data::MaterialRecord;
/// use sustainrec::recommend::indexed_text;
///
/// let jar = MaterialRecord::new("Glass").with_category("container");
/// assert_eq!(indexed_text(&jar), "Glass container");
///
/// let cup = MaterialRecord::new("Paper Cup").with_description("waxed paper cup");
/// assert_eq!(indexed_text(&cup), "waxed paper cup");
/// ```
#[must_use]
pub fn indexed_text(record: &MaterialRecord) -> String {
    let base = if record.description.trim().is_empty() {
        record.material.trim()
    } else {
        record.description.trim()
    };
    let category = record.category.trim();
    if category.is_empty() {
        base.to_string()
    } else {
        format!("{base} {category}")
    }
}

/// TF-IDF vectors for every table row, aligned by position.
///
/// Built once after the table loads and never mutated.
#[derive(Debug, Clone)]
pub struct TextIndex {
    texts: Vec<String>,
    vectors: Vec<SparseVector>,
    vocabulary_size: usize,
}

impl TextIndex {
    /// Index `table`. Returns `None` for an empty table.
    ///
    /// When no row contributes a single indexable term every vector is zero
    /// and all similarities are 0.0.
    #[must_use]
    pub fn build(table: &MaterialTable, config: &RecommenderConfig) -> Option<Self> {
        if table.is_empty() {
            return None;
        }

        let texts: Vec<String> = table.iter().map(indexed_text).collect();

        let tokenizer = WordTokenizer::new().with_min_len(config.min_token_len);
        let mut vectorizer = TfidfVectorizer::new().with_tokenizer(Box::new(tokenizer));
        if config.stop_words {
            vectorizer = vectorizer.with_stop_words_english();
        }

        let (vectors, vocabulary_size) = match vectorizer.fit_transform(&texts) {
            Ok(vectors) => (vectors, vectorizer.vocabulary_size()),
            Err(err) => {
                tracing::warn!(error = %err, "no indexable terms, text similarity disabled");
                (vec![SparseVector::default(); texts.len()], 0)
            }
        };

        tracing::debug!(rows = texts.len(), vocabulary_size, "text index built");
        Some(Self {
            texts,
            vectors,
            vocabulary_size,
        })
    }

    /// Number of indexed rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Whether the index holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Distinct terms across all rows.
    #[must_use]
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary_size
    }

    /// Vector for row `idx`.
    #[must_use]
    pub fn vector(&self, idx: usize) -> Option<&SparseVector> {
        self.vectors.get(idx)
    }

    /// Position of the row a text key refers to.
    ///
    /// An exact (case-insensitive) material name wins; otherwise the first row
    /// whose name or indexed text contains the key.
    #[must_use]
    pub fn locate(&self, table: &MaterialTable, key: &str) -> Option<usize> {
        let key = key.trim();
        if key.is_empty() {
            return None;
        }

        let key_lower = key.to_lowercase();
        table
            .iter()
            .position(|r| r.material.trim().to_lowercase() == key_lower)
            .or_else(|| {
                table.iter().zip(&self.texts).position(|(r, text)| {
                    contains_ignore_case(&r.material, key) || contains_ignore_case(text, key)
                })
            })
    }

    /// Rank every other row against row `query_idx`, best first.
    ///
    /// The query row itself is never part of the result.
    #[must_use]
    pub fn rank_against(&self, query_idx: usize, k: usize) -> Vec<(usize, f64)> {
        let Some(query) = self.vectors.get(query_idx) else {
            return Vec::new();
        };

        let scores = self
            .vectors
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != query_idx)
            .map(|(idx, doc)| (idx, sparse_cosine_similarity(query, doc)));
        top_k(scores, k)
    }

    /// Locate `key` and rank the other rows against it.
    ///
    /// Empty when nothing matches the key.
    #[must_use]
    pub fn rank_by_text(&self, table: &MaterialTable, key: &str, k: usize) -> Vec<(usize, f64)> {
        match self.locate(table, key) {
            Some(idx) => self.rank_against(idx, k),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
#[path = "content_based_tests.rs"]
mod tests;
