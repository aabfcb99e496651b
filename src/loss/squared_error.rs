use crate::math::matrix::Matrix;

pub struct SquaredErrorCost;

impl SquaredErrorCost {
    /// Scalar cost: 0.5 · ‖predicted - expected‖²
    pub fn cost(predicted: &[f64], expected: &[f64]) -> f64 {
        0.5 * predicted.iter().zip(expected.iter())
            .map(|(a, y)| (a - y).powi(2))
            .sum::<f64>()
    }

    /// Per-output gradient: predicted - expected
    pub fn derivative(predicted: &Matrix, expected: &Matrix) -> Matrix {
        predicted.zip_map(expected, |a, y| a - y)
    }
}
