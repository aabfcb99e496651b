use crate::activation::activation::Activation;
use crate::loss::loss_type::Cost;
use crate::math::matrix::Matrix;
use crate::network::network::Network;
use crate::train::dropout::DropoutMask;

/// Per-layer cost gradients, shaped exactly like a network's weights and biases.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradients {
    pub weights: Vec<Matrix>,
    pub biases: Vec<Matrix>,
}

impl Gradients {
    /// Zero accumulators matching `network`.
    pub fn zeros_like<A: Activation, C: Cost>(network: &Network<A, C>) -> Gradients {
        Gradients {
            weights: network.weights.iter().map(|w| Matrix::zeros(w.rows, w.cols)).collect(),
            biases: network.biases.iter().map(|b| Matrix::zeros(b.rows, b.cols)).collect(),
        }
    }

    /// Adds one example's gradients. Each weight-gradient row is scaled by
    /// the keep flag of the neuron it feeds; bias gradients are added as is.
    pub fn accumulate(&mut self, example: Gradients, mask: &DropoutMask) {
        for (l, (w, b)) in example.weights.into_iter().zip(example.biases).enumerate() {
            let acc_w = std::mem::take(&mut self.weights[l]);
            self.weights[l] = acc_w + w.mask_rows(mask.layer(l + 1));
            let acc_b = std::mem::take(&mut self.biases[l]);
            self.biases[l] = acc_b + b;
        }
    }
}
