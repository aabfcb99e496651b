use serde::{Serialize, Deserialize};
use std::f64::consts::E;

use crate::math::matrix::Matrix;

/// Element-wise activation strategy: `function(z)` and its derivative `derivative(z)`.
///
/// Implementations are stateless; a network holds one and only reads it.
pub trait Activation {
    fn function(&self, z: f64) -> f64;

    fn derivative(&self, z: f64) -> f64;

    /// Applies `function` to every entry, leaving `z` untouched.
    fn apply(&self, z: &Matrix) -> Matrix {
        z.map(|x| self.function(x))
    }

    /// Applies `derivative` to every entry, leaving `z` untouched.
    fn apply_derivative(&self, z: &Matrix) -> Matrix {
        z.map(|x| self.derivative(x))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ActivationFunction {
    /// Linear activation, for regression outputs.
    Identity,
    Sigmoid,
    Tanh,
    ReLU,
    /// Rectifier with a fixed slope `alpha` for negative inputs.
    LeakyReLU { alpha: f64 },
}

impl Activation for ActivationFunction {
    fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Identity => x,
            ActivationFunction::Sigmoid => 1.0 / (1.0 + E.powf(-x)),
            ActivationFunction::Tanh => x.tanh(),
            ActivationFunction::ReLU => if x > 0.0 { x } else { 0.0 },
            ActivationFunction::LeakyReLU { alpha } => if x > 0.0 { x } else { alpha * x },
        }
    }

    fn derivative(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Identity => 1.0,
            ActivationFunction::Sigmoid => {
                let fx = self.function(x);
                fx * (1.0 - fx)
            },
            ActivationFunction::Tanh => {
                let t = x.tanh();
                1.0 - t * t
            }
            ActivationFunction::ReLU => if x > 0.0 { 1.0 } else { 0.0 },
            ActivationFunction::LeakyReLU { alpha } => if x > 0.0 { 1.0 } else { *alpha },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::approx_eq::assert_approx_equal_distance;

    #[test]
    fn sigmoid_is_centered_at_half() {
        assert_eq!(ActivationFunction::Sigmoid.function(0.0), 0.5);
        assert_eq!(ActivationFunction::Sigmoid.derivative(0.0), 0.25);
    }

    #[test]
    fn derivatives_match_finite_differences() {
        let h = 1e-6;
        let activations = [
            ActivationFunction::Identity,
            ActivationFunction::Sigmoid,
            ActivationFunction::Tanh,
            ActivationFunction::ReLU,
            ActivationFunction::LeakyReLU { alpha: 0.01 },
        ];
        for activation in activations {
            for &z in &[-2.0, -0.3, 0.7, 1.9] {
                let numeric = (activation.function(z + h) - activation.function(z - h)) / (2.0 * h);
                assert_approx_equal_distance(&[activation.derivative(z)], &[numeric], 1e-5);
            }
        }
    }

    #[test]
    fn relu_derivative_is_zero_for_negative_inputs() {
        assert_eq!(ActivationFunction::ReLU.derivative(-3.0), 0.0);
        assert_eq!(ActivationFunction::ReLU.function(-3.0), 0.0);
    }

    #[test]
    fn apply_broadcasts_over_vectors() {
        let z = Matrix::column(&[-1.0, 0.0, 2.0]);
        let a = ActivationFunction::ReLU.apply(&z);
        assert_eq!(a.into_column_vec(), vec![0.0, 0.0, 2.0]);
        assert_eq!(z.into_column_vec(), vec![-1.0, 0.0, 2.0]);
    }
}
