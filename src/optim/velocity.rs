use crate::activation::activation::Activation;
use crate::error::{Result, TrainError};
use crate::loss::loss_type::Cost;
use crate::math::matrix::Matrix;
use crate::network::network::Network;

/// The previous update step, shaped like the network's weights and biases.
///
/// `weights` carries the momentum term and feeds the lookahead in
/// backpropagation. `biases` only records the last bias step, since biases
/// are updated without momentum.
#[derive(Debug, Clone, PartialEq)]
pub struct Velocity {
    pub weights: Vec<Matrix>,
    pub biases: Vec<Matrix>,
}

impl Velocity {
    /// The velocity a training run starts from.
    pub fn zeros_like<A: Activation, C: Cost>(network: &Network<A, C>) -> Velocity {
        Velocity {
            weights: network.weights.iter().map(|w| Matrix::zeros(w.rows, w.cols)).collect(),
            biases: network.biases.iter().map(|b| Matrix::zeros(b.rows, b.cols)).collect(),
        }
    }

    pub fn check_against<A: Activation, C: Cost>(&self, network: &Network<A, C>) -> Result<()> {
        if !same_shapes(&self.weights, &network.weights) || !same_shapes(&self.biases, &network.biases) {
            return Err(TrainError::ShapeMismatch(
                "velocity is not shaped like the network's weights and biases".to_string(),
            ));
        }
        Ok(())
    }
}

fn same_shapes(ours: &[Matrix], theirs: &[Matrix]) -> bool {
    ours.len() == theirs.len() && ours.iter().zip(theirs.iter()).all(|(a, b)| a.shape() == b.shape())
}
