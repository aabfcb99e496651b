use crate::math::matrix::Matrix;

/// Binary cross-entropy summed over the output neurons; pair with a sigmoid output.
pub struct CrossEntropyCost;

/// Replaces NaN and ±inf with 0 so a saturated output cannot poison training.
fn nan_to_zero(x: f64) -> f64 {
    if x.is_finite() { x } else { 0.0 }
}

impl CrossEntropyCost {
    /// Scalar cost:
    ///   C = Σ nan_to_zero(-y·ln(a) - (1 - y)·ln(1 - a))
    ///
    /// Each term is normalized on its own, so `a = 0, y = 1` or `a = 1, y = 0`
    /// contribute 0 instead of infinity.
    pub fn cost(predicted: &[f64], expected: &[f64]) -> f64 {
        predicted.iter().zip(expected.iter())
            .map(|(a, y)| nan_to_zero(-y * a.ln() - (1.0 - y) * (1.0 - a).ln()))
            .sum()
    }

    /// Output gradient used by backpropagation: predicted - expected
    pub fn derivative(predicted: &Matrix, expected: &Matrix) -> Matrix {
        predicted.zip_map(expected, |a, y| a - y)
    }
}
