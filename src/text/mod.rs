//! Text processing for content-based similarity.
//!
//! The pipeline is: [`tokenize`] raw text into words, drop
//! [`stopwords`], weight the surviving terms with
//! [`vectorize::TfidfVectorizer`], then compare documents with the
//! measures in [`similarity`].
//!
//! # Quick Start
//!
//! ```
//! use sustainrec::text::vectorize::TfidfVectorizer;
//! use sustainrec::text::similarity::sparse_cosine_similarity;
//!
//! let docs = ["recycled glass bottle", "glass jar", "compostable paper bag"];
//! let mut vectorizer = TfidfVectorizer::new().with_stop_words_english();
//! let vectors = vectorizer.fit_transform(&docs).expect("vocabulary is not empty");
//!
//! let glass = sparse_cosine_similarity(&vectors[0], &vectors[1]);
//! let paper = sparse_cosine_similarity(&vectors[0], &vectors[2]);
//! assert!(glass > paper);
//! ```

use crate::Result;

pub mod similarity;
pub mod stopwords;
pub mod tokenize;
pub mod vectorize;

/// Splits text into tokens.
///
/// Implementations must be deterministic: the same input always yields the
/// same tokens in the same order.
pub trait Tokenizer {
    /// Tokenize `text`.
    ///
    /// # Errors
    ///
    /// Implementations may reject input they cannot handle.
    fn tokenize(&self, text: &str) -> Result<Vec<String>>;
}
