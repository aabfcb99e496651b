#![allow(dead_code)]

use crate::math::matrix::Matrix;

/// Asserts that every entry of **a** and **b** differs by at most **max_dist**.
///
/// # Panics
///
/// Panics if the lengths differ or any pair is further apart than `max_dist`.
pub(crate) fn assert_approx_equal_distance(a: &[f64], b: &[f64], max_dist: f64) {
    assert_eq!(a.len(), b.len());

    a.iter().zip(b).for_each(|(x, y)| {
        assert!((x - y).abs() <= max_dist, "{} and {} differ by more than {}", x, y, max_dist);
    });
}

/// Runs **assert_approx_equal_distance** row by row over two matrices.
///
/// # Panics
///
/// Panics if the shapes differ or any entry is further apart than `max_dist`.
pub(crate) fn assert_approx_equal_matrix(a: &Matrix, b: &Matrix, max_dist: f64) {
    assert_eq!(a.shape(), b.shape());
    for (row_a, row_b) in a.data.iter().zip(b.data.iter()) {
        assert_approx_equal_distance(row_a, row_b, max_dist);
    }
}
