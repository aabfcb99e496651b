use serde::{Serialize, Deserialize};

use crate::loss::cross_entropy::CrossEntropyCost;
use crate::loss::squared_error::SquaredErrorCost;
use crate::math::matrix::Matrix;

/// Cost strategy: a scalar cost of an output against its target, and the
/// gradient of that cost with respect to the output.
///
/// Both vectors are column matrices of the output-layer size.
pub trait Cost {
    fn function(&self, predicted: &Matrix, expected: &Matrix) -> f64;

    fn derivative(&self, predicted: &Matrix, expected: &Matrix) -> Matrix;
}

/// Selects which cost function a network is trained against.
///
/// - `SquaredError`: 0.5·‖a - y‖²; pair with Identity or Sigmoid output.
/// - `CrossEntropy`: binary cross-entropy; pair with Sigmoid output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostFunction {
    SquaredError,
    CrossEntropy,
}

impl Cost for CostFunction {
    fn function(&self, predicted: &Matrix, expected: &Matrix) -> f64 {
        let (a, y) = (predicted.clone().into_column_vec(), expected.clone().into_column_vec());
        match self {
            CostFunction::SquaredError => SquaredErrorCost::cost(&a, &y),
            CostFunction::CrossEntropy => CrossEntropyCost::cost(&a, &y),
        }
    }

    fn derivative(&self, predicted: &Matrix, expected: &Matrix) -> Matrix {
        match self {
            CostFunction::SquaredError => SquaredErrorCost::derivative(predicted, expected),
            CostFunction::CrossEntropy => CrossEntropyCost::derivative(predicted, expected),
        }
    }
}
