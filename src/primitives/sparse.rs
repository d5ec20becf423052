//! Sparse vector type for term-weight data.

use serde::{Deserialize, Serialize};

/// A sparse vector stored as `(index, value)` pairs sorted by index.
///
/// Zero entries are never stored, so [`SparseVector::nnz`] is the number of
/// distinct terms with non-zero weight.
///
/// # Examples
///
/// ```
/// use sustainrec::primitives::SparseVector;
///
/// let a = SparseVector::from_pairs(vec![(0, 1.0), (3, 2.0)]);
/// let b = SparseVector::from_pairs(vec![(3, 4.0), (5, 1.0)]);
/// assert_eq!(a.dot(&b), 8.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Build from unordered pairs. Zeros are dropped and duplicate indices summed.
    #[must_use]
    pub fn from_pairs(mut pairs: Vec<(usize, f64)>) -> Self {
        pairs.sort_by_key(|&(idx, _)| idx);
        let mut entries: Vec<(usize, f64)> = Vec::with_capacity(pairs.len());
        for (idx, value) in pairs {
            match entries.last_mut() {
                Some(last) if last.0 == idx => last.1 += value,
                _ => entries.push((idx, value)),
            }
        }
        entries.retain(|&(_, v)| v != 0.0);
        Self { entries }
    }

    /// Number of stored (non-zero) entries.
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Whether every component is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    /// Value at `idx`, zero when absent.
    #[must_use]
    pub fn get(&self, idx: usize) -> f64 {
        self.entries
            .binary_search_by_key(&idx, |&(i, _)| i)
            .map_or(0.0, |pos| self.entries[pos].1)
    }

    /// Stored entries in index order.
    #[must_use]
    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// Dot product via merge join over both index lists.
    #[must_use]
    pub fn dot(&self, other: &Self) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a_idx, a_val) = self.entries[i];
            let (b_idx, b_val) = other.entries[j];
            match a_idx.cmp(&b_idx) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a_val * b_val;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    /// Euclidean (L2) norm.
    #[must_use]
    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt()
    }

    /// Scale to unit length. A zero vector stays zero.
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, v) in &mut self.entries {
                *v /= norm;
            }
        }
    }
}
