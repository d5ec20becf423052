//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use sustainrec::prelude::*;
//! ```

pub use crate::data::{CsvLoader, MaterialRecord, MaterialTable};
pub use crate::error::{Result, SustainError};
pub use crate::footprint::{FoodProfile, FootprintInput, FootprintReport};
pub use crate::primitives::{SparseVector, Vector};
pub use crate::recommend::{
    filter_records, AttributeQuery, FeatureVector, Recommendation, Recommender, RecommenderConfig,
    ScoredRecord,
};
pub use crate::text::similarity::cosine_similarity;
