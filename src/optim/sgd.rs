use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::activation::activation::Activation;
use crate::error::{Result, TrainError};
use crate::loss::loss_type::Cost;
use crate::network::network::Network;
use crate::optim::velocity::Velocity;
use crate::train::backprop::backprop;
use crate::train::dropout::{validate_keep_prob, DropoutMask};
use crate::train::example::Example;
use crate::train::gradients::Gradients;

/// Mini-batch gradient descent with momentum lookahead, L2 weight decay and dropout.
///
/// - `learning_rate`: step size `alpha`
/// - `weight_decay`: L2 coefficient `lmbda`, applied to weights only
/// - `momentum`: momentum coefficient `mu`, applied to weights only
/// - `keep_prob`: probability `p` that a non-output neuron is kept
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sgd {
    pub learning_rate: f64,
    #[serde(default)]
    pub weight_decay: f64,
    #[serde(default)]
    pub momentum: f64,
    #[serde(default = "default_keep_prob")]
    pub keep_prob: f64,
}

fn default_keep_prob() -> f64 {
    1.0
}

impl Sgd {
    /// Plain SGD: no weight decay, no momentum, no dropout.
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd {
            learning_rate,
            weight_decay: 0.0,
            momentum: 0.0,
            keep_prob: default_keep_prob(),
        }
    }

    pub fn weight_decay(mut self, lmbda: f64) -> Sgd {
        self.weight_decay = lmbda;
        self
    }

    pub fn momentum(mut self, mu: f64) -> Sgd {
        self.momentum = mu;
        self
    }

    pub fn keep_prob(mut self, p: f64) -> Sgd {
        self.keep_prob = p;
        self
    }

    /// Runs one mini-batch update and returns the new velocity.
    ///
    /// Every example draws its own dropout mask from `rng` and is
    /// backpropagated against the incoming `velocity`. Then
    ///
    ///   v' = mu·v + alpha·(ΣnablaW / m + lmbda·W),   W <- W - v'
    ///   b  <- b - alpha·(Σnablab / m)
    ///
    /// where `m` is the batch size. All arguments are validated before the
    /// network is touched; on error it is left exactly as it was.
    pub fn step<A, C, R>(
        &self,
        network: &mut Network<A, C>,
        batch: &[Example],
        velocity: &Velocity,
        rng: &mut R,
    ) -> Result<Velocity>
    where
        A: Activation,
        C: Cost,
        R: Rng + ?Sized,
    {
        if batch.is_empty() {
            return Err(TrainError::InvalidArgument("mini-batch must not be empty".to_string()));
        }
        validate_keep_prob(self.keep_prob)?;
        network.check_shapes()?;
        velocity.check_against(network)?;
        for example in batch {
            network.check_example(example)?;
        }

        let mut acc = Gradients::zeros_like(network);
        for example in batch {
            let mask = DropoutMask::sample(&network.sizes, self.keep_prob, &mut *rng)?;
            let grads = backprop(network, &example.input, &example.target, self.momentum, velocity, &mask)?;
            acc.accumulate(grads, &mask);
        }

        let inv_batch = 1.0 / batch.len() as f64;
        let mut next = Velocity {
            weights: Vec::with_capacity(acc.weights.len()),
            biases: Vec::with_capacity(acc.biases.len()),
        };
        for (l, (w_acc, b_acc)) in acc.weights.into_iter().zip(acc.biases).enumerate() {
            let decay = network.weights[l].scale(self.weight_decay);
            let v_w = velocity.weights[l].scale(self.momentum)
                + (w_acc.scale(inv_batch) + decay).scale(self.learning_rate);
            let v_b = b_acc.scale(inv_batch * self.learning_rate);

            let w = std::mem::take(&mut network.weights[l]);
            network.weights[l] = w - v_w.clone();
            let b = std::mem::take(&mut network.biases[l]);
            network.biases[l] = b - v_b.clone();

            next.weights.push(v_w);
            next.biases.push(v_b);
        }

        Ok(next)
    }
}
