use super::*;

#[test]
fn test_cosine_similarity_identical() {
    let v = Vector::from_slice(&[2.5, 1.0, 120.0, 0.8]);
    let sim = cosine_similarity(&v, &v).expect("should succeed");
    assert!((sim - 1.0).abs() < 1e-12);
}

#[test]
fn test_cosine_similarity_orthogonal() {
    let v1 = Vector::from_slice(&[1.0, 0.0, 0.0]);
    let v2 = Vector::from_slice(&[0.0, 1.0, 0.0]);
    let sim = cosine_similarity(&v1, &v2).expect("should succeed");
    assert!(sim.abs() < 1e-12);
}

#[test]
fn test_cosine_similarity_opposite() {
    let v1 = Vector::from_slice(&[1.0, 2.0]);
    let v2 = Vector::from_slice(&[-1.0, -2.0]);
    let sim = cosine_similarity(&v1, &v2).expect("should succeed");
    assert!((sim + 1.0).abs() < 1e-12);
}

#[test]
fn test_cosine_similarity_symmetric() {
    let a = Vector::from_slice(&[3.2, 0.0, 45.0, 1.1]);
    let b = Vector::from_slice(&[1.0, 1.0, 10.0, 4.0]);
    let ab = cosine_similarity(&a, &b).expect("should succeed");
    let ba = cosine_similarity(&b, &a).expect("should succeed");
    assert_eq!(ab, ba);
}

#[test]
fn test_cosine_similarity_zero_vector_is_zero() {
    let zero = Vector::from_slice(&[0.0, 0.0, 0.0, 0.0]);
    let v = Vector::from_slice(&[1.0, 2.0, 3.0, 4.0]);
    assert_eq!(cosine_similarity(&zero, &v).expect("should succeed"), 0.0);
    assert_eq!(cosine_similarity(&v, &zero).expect("should succeed"), 0.0);
    assert_eq!(cosine_similarity(&zero, &zero).expect("should succeed"), 0.0);
}

#[test]
fn test_cosine_similarity_huge_components_stay_finite() {
    let huge = Vector::from_slice(&[1e200, 1.0, 1e200, 1e200]);
    let small = Vector::from_slice(&[1.0, 1.0, 1.0, 1.0]);

    let same = cosine_similarity(&huge, &huge).expect("should succeed");
    assert!((same - 1.0).abs() < 1e-12);

    // (1, ~0, 1, 1) against (1, 1, 1, 1): 3 / (sqrt(3) * 2)
    let cross = cosine_similarity(&huge, &small).expect("should succeed");
    assert!((cross - 3.0 / (3.0_f64.sqrt() * 2.0)).abs() < 1e-12);
}

#[test]
fn test_cosine_similarity_near_max_is_bounded() {
    let a = Vector::from_slice(&[f64::MAX, -f64::MAX]);
    let b = Vector::from_slice(&[f64::MAX, f64::MAX / 2.0]);
    let sim = cosine_similarity(&a, &b).expect("should succeed");
    assert!(sim.is_finite());
    assert!((-1.0..=1.0).contains(&sim));
}

#[test]
fn test_cosine_similarity_non_finite_component_is_zero() {
    let inf = Vector::from_slice(&[f64::INFINITY, 1.0]);
    let nan = Vector::from_slice(&[f64::NAN, 1.0]);
    let v = Vector::from_slice(&[1.0, 1.0]);
    assert_eq!(cosine_similarity(&inf, &v).expect("should succeed"), 0.0);
    assert_eq!(cosine_similarity(&v, &nan).expect("should succeed"), 0.0);
}

#[test]
fn test_cosine_similarity_different_lengths() {
    let v1 = Vector::from_slice(&[1.0, 2.0]);
    let v2 = Vector::from_slice(&[1.0, 2.0, 3.0]);
    let err = cosine_similarity(&v1, &v2).expect_err("lengths differ");
    assert!(matches!(
        err,
        SustainError::DimensionMismatch {
            expected: 2,
            actual: 3
        }
    ));
}

#[test]
fn test_cosine_similarity_empty() {
    let v = Vector::from_slice(&[]);
    assert!(cosine_similarity(&v, &v).is_err());
}

#[test]
fn test_sparse_cosine_matches_dense() {
    let a = SparseVector::from_pairs(vec![(0, 1.0), (2, 3.0)]);
    let b = SparseVector::from_pairs(vec![(0, 2.0), (1, 1.0), (2, 1.0)]);
    let dense_a = Vector::from_slice(&[1.0, 0.0, 3.0]);
    let dense_b = Vector::from_slice(&[2.0, 1.0, 1.0]);

    let sparse = sparse_cosine_similarity(&a, &b);
    let dense = cosine_similarity(&dense_a, &dense_b).expect("should succeed");
    assert!((sparse - dense).abs() < 1e-12);
}

#[test]
fn test_sparse_cosine_zero_vector() {
    let zero = SparseVector::default();
    let v = SparseVector::from_pairs(vec![(4, 1.0)]);
    assert_eq!(sparse_cosine_similarity(&zero, &v), 0.0);
}

#[test]
fn test_top_k_is_stable_on_ties() {
    let ranked = top_k(vec![(0, 0.5), (1, 0.5), (2, 0.5), (3, 0.5)], 2);
    assert_eq!(ranked, vec![(0, 0.5), (1, 0.5)]);
}

#[test]
fn test_top_k_fewer_than_k() {
    let ranked = top_k(vec![(7, 0.1)], 3);
    assert_eq!(ranked, vec![(7, 0.1)]);
    assert!(top_k(Vec::new(), 3).is_empty());
}

#[test]
fn test_top_k_similar_orders_descending() {
    let query = Vector::from_slice(&[1.0, 2.0, 3.0]);
    let docs = vec![
        Vector::from_slice(&[2.0, 3.0, 4.0]),
        Vector::from_slice(&[0.0, 0.0, 1.0]),
        Vector::from_slice(&[1.0, 2.0, 2.9]),
    ];

    let top = top_k_similar(&query, &docs, 2).expect("should succeed");
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].0, 2);
    assert!(top[0].1 >= top[1].1);
}

#[test]
fn test_top_k_similar_propagates_dimension_mismatch() {
    let query = Vector::from_slice(&[1.0, 2.0]);
    let docs = vec![Vector::from_slice(&[1.0, 2.0, 3.0])];
    assert!(top_k_similar(&query, &docs, 1).is_err());
}
