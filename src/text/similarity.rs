//! Similarity measures and top-k ranking.
//!
//! - [`cosine_similarity`] for dense numeric feature vectors
//! - [`sparse_cosine_similarity`] for TF-IDF term vectors
//! - [`top_k`] for stable descending ranking of scored candidates
//!
//! Cosine similarity is defined as 0.0 whenever either vector has zero
//! magnitude or a non-finite component, so callers never see NaN. Dense
//! vectors are rescaled before the norms are taken, so finite inputs near
//! `f64::MAX` still score correctly.
//!
//! # Quick Start
//!
//! ```
//! use sustainrec::text::similarity::cosine_similarity;
//! use sustainrec::primitives::Vector;
//!
//! let v1 = Vector::from_slice(&[1.0, 2.0, 3.0]);
//! let v2 = Vector::from_slice(&[2.0, 3.0, 4.0]);
//!
//! let similarity = cosine_similarity(&v1, &v2).expect("same length");
//! assert!(similarity > 0.9);
//! ```

use crate::error::{Result, SustainError};
use crate::primitives::{SparseVector, Vector};

/// Cosine of the angle between two dense vectors.
///
/// ```text
/// cosine_sim(A, B) = (A · B) / (||A|| * ||B||)
/// ```
///
/// # Errors
///
/// Returns [`SustainError::DimensionMismatch`] when the lengths differ and
/// [`SustainError::EmptyInput`] when both are empty.
///
/// # Examples
///
/// ```
/// use sustainrec::text::similarity::cosine_similarity;
/// use sustainrec::primitives::Vector;
///
/// let zero = Vector::from_slice(&[0.0, 0.0]);
/// let v = Vector::from_slice(&[1.0, 2.0]);
/// assert_eq!(cosine_similarity(&zero, &v).expect("same length"), 0.0);
/// ```
pub fn cosine_similarity(a: &Vector<f64>, b: &Vector<f64>) -> Result<f64> {
    if a.len() != b.len() {
        return Err(SustainError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    if a.is_empty() {
        return Err(SustainError::EmptyInput("cosine of empty vectors".to_string()));
    }

    // Dividing by the largest magnitude keeps the squared norms finite for
    // components near f64::MAX.
    let (Some(a), Some(b)) = (rescale(a), rescale(b)) else {
        return Ok(0.0);
    };
    Ok(unit_or_zero(a.dot(&b) / (a.norm() * b.norm())))
}

// `v / max|v_i|`, or `None` for a zero or non-finite vector.
fn rescale(v: &Vector<f64>) -> Option<Vector<f64>> {
    let scale = v.as_slice().iter().fold(0.0_f64, |m, x| m.max(x.abs()));
    if scale == 0.0 || !scale.is_finite() {
        return None;
    }
    Some(Vector::from_vec(
        v.as_slice().iter().map(|x| x / scale).collect(),
    ))
}

/// Cosine of the angle between two sparse vectors. Zero vectors score 0.0.
#[must_use]
pub fn sparse_cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let norm_a = a.norm();
    let norm_b = b.norm();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    unit_or_zero(a.dot(b) / (norm_a * norm_b))
}

// Rounding can push |cos| a hair past 1; anything non-finite scores 0.
fn unit_or_zero(x: f64) -> f64 {
    if x.is_finite() {
        x.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Keep the `k` highest-scoring `(index, score)` pairs, best first.
///
/// The sort is stable: equal scores keep their input order, so the earlier
/// table row wins a tie.
///
/// # Examples
///
/// ```
/// use sustainrec::text::similarity::top_k;
///
/// let ranked = top_k(vec![(0, 0.2), (1, 0.9), (2, 0.9), (3, 0.5)], 3);
/// assert_eq!(ranked, vec![(1, 0.9), (2, 0.9), (3, 0.5)]);
/// ```
#[must_use]
pub fn top_k<I>(scores: I, k: usize) -> Vec<(usize, f64)>
where
    I: IntoIterator<Item = (usize, f64)>,
{
    let mut ranked: Vec<(usize, f64)> = scores.into_iter().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(k);
    ranked
}

/// Rank `documents` against `query` by cosine similarity and keep the top `k`.
///
/// # Errors
///
/// Fails if any document has a different length from `query`.
pub fn top_k_similar(
    query: &Vector<f64>,
    documents: &[Vector<f64>],
    k: usize,
) -> Result<Vec<(usize, f64)>> {
    let scores = documents
        .iter()
        .enumerate()
        .map(|(idx, doc)| cosine_similarity(query, doc).map(|sim| (idx, sim)))
        .collect::<Result<Vec<_>>>()?;
    Ok(top_k(scores, k))
}

#[cfg(test)]
#[path = "similarity_tests.rs"]
mod tests;
