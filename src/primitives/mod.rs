//! Core numeric primitives (dense and sparse vectors).
//!
//! Feature vectors for numeric ranking use [`Vector`]; TF-IDF term weights
//! use [`SparseVector`].

mod sparse;
mod vector;

pub use sparse::SparseVector;
pub use vector::Vector;
