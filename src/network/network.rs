use rand::Rng;

use crate::activation::activation::{Activation, ActivationFunction};
use crate::error::{Result, TrainError};
use crate::loss::loss_type::{Cost, CostFunction};
use crate::math::matrix::Matrix;
use crate::math::ops::weighted_input;
use crate::train::example::Example;

/// A fully-connected feed-forward network.
///
/// `weights[l]` connects layer `l` to layer `l + 1` and has shape
/// `(sizes[l + 1] × sizes[l])`; `biases[l]` is a `(sizes[l + 1] × 1)` column.
/// Training mutates the entries in place but never the shapes.
#[derive(Debug, Clone)]
pub struct Network<A: Activation = ActivationFunction, C: Cost = CostFunction> {
    pub sizes: Vec<usize>,
    pub weights: Vec<Matrix>,
    pub biases: Vec<Matrix>,
    pub activation: A,
    pub cost: C,
}

impl<A: Activation, C: Cost> Network<A, C> {
    /// Builds a network for the given layer sizes.
    ///
    /// Weights are drawn from N(0, 1/fan_in) and biases from N(0, 1) using `rng`.
    pub fn new<R: Rng + ?Sized>(sizes: &[usize], activation: A, cost: C, rng: &mut R) -> Result<Self> {
        validate_sizes(sizes)?;
        let weights = sizes.windows(2)
            .map(|pair| Matrix::xavier(pair[1], pair[0], &mut *rng))
            .collect();
        let biases = sizes[1..].iter()
            .map(|&size| Matrix::gaussian(size, 1, 1.0, &mut *rng))
            .collect();
        Ok(Network { sizes: sizes.to_vec(), weights, biases, activation, cost })
    }

    /// Adopts caller-supplied parameters after checking them against `sizes`.
    pub fn from_parts(
        sizes: &[usize],
        weights: Vec<Matrix>,
        biases: Vec<Matrix>,
        activation: A,
        cost: C,
    ) -> Result<Self> {
        validate_sizes(sizes)?;
        let network = Network { sizes: sizes.to_vec(), weights, biases, activation, cost };
        network.check_shapes()?;
        Ok(network)
    }

    pub fn input_size(&self) -> usize {
        self.sizes[0]
    }

    pub fn output_size(&self) -> usize {
        self.sizes[self.sizes.len() - 1]
    }

    /// Verifies that every weight and bias has the shape implied by `sizes`.
    pub fn check_shapes(&self) -> Result<()> {
        let transitions = self.sizes.len().saturating_sub(1);
        if self.weights.len() != transitions || self.biases.len() != transitions {
            return Err(TrainError::ShapeMismatch(format!(
                "expected {} weight matrices and bias vectors, got {} and {}",
                transitions,
                self.weights.len(),
                self.biases.len()
            )));
        }
        for (l, (w, b)) in self.weights.iter().zip(self.biases.iter()).enumerate() {
            let expected = (self.sizes[l + 1], self.sizes[l]);
            if w.shape() != expected {
                return Err(TrainError::ShapeMismatch(format!(
                    "weights[{}] is {:?}, expected {:?}", l, w.shape(), expected
                )));
            }
            if b.shape() != (self.sizes[l + 1], 1) {
                return Err(TrainError::ShapeMismatch(format!(
                    "biases[{}] is {:?}, expected {:?}", l, b.shape(), (self.sizes[l + 1], 1)
                )));
            }
        }
        Ok(())
    }

    /// Checks that an example's input and target lengths fit this network.
    pub fn check_example(&self, example: &Example) -> Result<()> {
        self.check_pair(&example.input, &example.target)
    }

    /// Same as `check_example` for a bare input/target pair.
    pub fn check_pair(&self, input: &[f64], target: &[f64]) -> Result<()> {
        if input.len() != self.input_size() {
            return Err(TrainError::ShapeMismatch(format!(
                "input has {} values, network expects {}", input.len(), self.input_size()
            )));
        }
        if target.len() != self.output_size() {
            return Err(TrainError::ShapeMismatch(format!(
                "target has {} values, network produces {}", target.len(), self.output_size()
            )));
        }
        Ok(())
    }

    /// Inference pass with the raw weights: no dropout, no momentum lookahead.
    pub fn feedforward(&self, input: &[f64]) -> Result<Vec<f64>> {
        if input.len() != self.input_size() {
            return Err(TrainError::ShapeMismatch(format!(
                "input has {} values, network expects {}", input.len(), self.input_size()
            )));
        }
        let mut a = Matrix::column(input);
        for (w, b) in self.weights.iter().zip(self.biases.iter()) {
            a = self.activation.apply(&weighted_input(w, &a, b));
        }
        Ok(a.into_column_vec())
    }

    /// Mean cost over `data`, plus the L2 term `(weight_decay / 2n)·Σ‖W‖²`.
    pub fn total_cost(&self, data: &[Example], weight_decay: f64) -> Result<f64> {
        if data.is_empty() {
            return Err(TrainError::InvalidArgument("cannot evaluate an empty data set".to_string()));
        }
        let n = data.len() as f64;
        let mut total = 0.0;
        for example in data {
            self.check_example(example)?;
            let output = Matrix::column(&self.feedforward(&example.input)?);
            total += self.cost.function(&output, &Matrix::column(&example.target));
        }
        let penalty: f64 = self.weights.iter().map(Matrix::sum_of_squares).sum();
        Ok(total / n + 0.5 * (weight_decay / n) * penalty)
    }
}

/// A network needs an input and an output layer, none of them empty.
fn validate_sizes(sizes: &[usize]) -> Result<()> {
    if sizes.len() < 2 {
        return Err(TrainError::InvalidArgument(format!(
            "a network needs at least 2 layers, got {}", sizes.len()
        )));
    }
    if let Some(l) = sizes.iter().position(|&size| size == 0) {
        return Err(TrainError::InvalidArgument(format!("layer {} has no neurons", l)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn network(sizes: &[usize]) -> Network {
        let mut rng = StdRng::seed_from_u64(11);
        Network::new(sizes, ActivationFunction::Sigmoid, CostFunction::SquaredError, &mut rng).unwrap()
    }

    #[test]
    fn shapes_follow_layer_sizes() {
        for sizes in [vec![2, 1], vec![2, 3, 1], vec![784, 30, 10], vec![1, 5, 5, 4, 2]] {
            let net = network(&sizes);
            assert_eq!(net.weights.len(), sizes.len() - 1);
            for l in 0..sizes.len() - 1 {
                assert_eq!(net.weights[l].shape(), (sizes[l + 1], sizes[l]));
                assert_eq!(net.biases[l].shape(), (sizes[l + 1], 1));
            }
            assert!(net.check_shapes().is_ok());
        }
    }

    #[test]
    fn rejects_degenerate_layouts() {
        let mut rng = StdRng::seed_from_u64(0);
        for sizes in [vec![], vec![3], vec![2, 0, 1]] {
            let res: Result<Network> =
                Network::new(&sizes, ActivationFunction::Sigmoid, CostFunction::SquaredError, &mut rng);
            assert!(matches!(res, Err(TrainError::InvalidArgument(_))));
        }
    }

    #[test]
    fn from_parts_rejects_wrong_shapes() {
        let res: Result<Network> = Network::from_parts(
            &[2, 1],
            vec![Matrix::zeros(2, 1)],
            vec![Matrix::zeros(1, 1)],
            ActivationFunction::Sigmoid,
            CostFunction::SquaredError,
        );
        assert!(matches!(res, Err(TrainError::ShapeMismatch(_))));
    }

    #[test]
    fn feedforward_uses_weights_and_biases() {
        let net: Network = Network::from_parts(
            &[2, 1],
            vec![Matrix::from_data(vec![vec![1.0, -1.0]])],
            vec![Matrix::column(&[0.5])],
            ActivationFunction::Identity,
            CostFunction::SquaredError,
        ).unwrap();
        assert_eq!(net.feedforward(&[3.0, 1.0]).unwrap(), vec![2.5]);
        assert!(matches!(net.feedforward(&[1.0]), Err(TrainError::ShapeMismatch(_))));
    }

    #[test]
    fn total_cost_adds_weight_penalty() {
        let net: Network = Network::from_parts(
            &[1, 1],
            vec![Matrix::from_data(vec![vec![2.0]])],
            vec![Matrix::column(&[0.0])],
            ActivationFunction::Identity,
            CostFunction::SquaredError,
        ).unwrap();
        let data = vec![Example::new(vec![1.0], vec![1.0])];
        assert_eq!(net.total_cost(&data, 0.0).unwrap(), 0.5);
        assert_eq!(net.total_cost(&data, 1.0).unwrap(), 0.5 + 2.0);
    }
}
