//! sustainrec: material sustainability recommendations in pure Rust.
//!
//! Loads a small tabular dataset of materials once, indexes each row's text
//! with TF-IDF, and answers two kinds of query: filter-by-attributes (with a
//! content-similarity fallback when nothing matches) and rank-by-feature-vector.
//!
//! # Quick Start
//!
//! ```
//! use sustainrec::prelude::*;
//!
//! let table = MaterialTable::new(vec![
//!     MaterialRecord::new("Plastic").with_recyclable(true),
//!     MaterialRecord::new("Glass").with_recyclable(true),
//!     MaterialRecord::new("Foam"),
//! ]);
//! let recommender = Recommender::new(table);
//!
//! let outcome = recommender.recommend(&AttributeQuery::new().with_recyclable(true));
//! let names: Vec<&str> = outcome.records().iter().map(|r| r.material.as_str()).collect();
//! assert_eq!(names, vec!["Plastic", "Glass"]);
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Dense and sparse vectors
//! - [`text`]: Tokenization, stop words, TF-IDF and cosine similarity
//! - [`data`]: Material records, the dataset table and CSV loading
//! - [`recommend`]: Attribute filter, similarity rankers and the recommender
//! - [`footprint`]: Personal carbon footprint calculator

pub mod data;
pub mod error;
pub mod footprint;
pub mod prelude;
pub mod primitives;
pub mod recommend;
pub mod text;

pub use error::{Result, SustainError};
pub use primitives::{SparseVector, Vector};
