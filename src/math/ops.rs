use crate::math::matrix::Matrix;

/// Weighted input of a layer: `z = W·x + b`.
///
/// `weights` is (n_out × n_in), `input` is (n_in × 1) and `bias` is
/// (n_out × 1). Any weight matrix of that shape is accepted, including the
/// masked lookahead weights built during backpropagation.
pub fn weighted_input(weights: &Matrix, input: &Matrix, bias: &Matrix) -> Matrix {
    (weights * input) + bias.clone()
}

/// Element-wise (Hadamard) product of two same-shape matrices.
pub fn hadamard(a: &Matrix, b: &Matrix) -> Matrix {
    a.zip_map(b, |x, y| x * y)
}

/// Outer product `u ⊗ vᵗ` of two column vectors.
pub fn outer(u: &Matrix, v: &Matrix) -> Matrix {
    assert_eq!(u.cols, 1, "outer product expects column vectors");
    assert_eq!(v.cols, 1, "outer product expects column vectors");
    u * &v.transpose()
}
