use crate::activation::activation::Activation;
use crate::error::Result;
use crate::loss::loss_type::Cost;
use crate::math::matrix::Matrix;
use crate::math::ops::{hadamard, outer, weighted_input};
use crate::network::network::Network;
use crate::optim::velocity::Velocity;
use crate::train::dropout::DropoutMask;
use crate::train::gradients::Gradients;

/// Gradient of the cost for a single example `(x, y)`.
///
/// The forward pass runs on lookahead weights `mask(l) ⊙ (W(l) + mu·v(l))`:
/// momentum is added first, then the rows feeding each dropped neuron are
/// zeroed. The input itself is masked by the input-layer mask. The backward
/// pass propagates the error through the transpose of those same masked
/// matrices, so a dropped neuron passes no error to the layer below. A
/// dropped hidden neuron still outputs `f(b_i)`, and its bias still receives
/// a gradient.
///
/// The returned gradients are unmasked; the batch step applies the row mask
/// to the weight gradients when it accumulates them.
///
/// # Errors
/// `ShapeMismatch` if the network, `x`, `y`, `velocity` or `mask` disagree
/// with `network.sizes`.
pub fn backprop<A: Activation, C: Cost>(
    network: &Network<A, C>,
    x: &[f64],
    y: &[f64],
    momentum: f64,
    velocity: &Velocity,
    mask: &DropoutMask,
) -> Result<Gradients> {
    network.check_shapes()?;
    network.check_pair(x, y)?;
    velocity.check_against(network)?;
    mask.check_against(&network.sizes)?;

    let transitions = network.weights.len();

    // Forward pass: keep every weighted input and activation.
    let mut activation = hadamard(&Matrix::column(x), mask.layer(0));
    let mut activations = vec![activation.clone()];
    let mut zs = Vec::with_capacity(transitions);
    let mut lookahead = Vec::with_capacity(transitions);

    for l in 0..transitions {
        let shifted = network.weights[l].clone() + velocity.weights[l].scale(momentum);
        let weights = shifted.mask_rows(mask.layer(l + 1));
        let z = weighted_input(&weights, &activation, &network.biases[l]);
        activation = network.activation.apply(&z);
        zs.push(z);
        activations.push(activation.clone());
        lookahead.push(weights);
    }

    let mut nabla_w = vec![Matrix::default(); transitions];
    let mut nabla_b = vec![Matrix::default(); transitions];

    // Output layer.
    let cost_gradient = network.cost.derivative(&activations[transitions], &Matrix::column(y));
    let mut delta = hadamard(
        &cost_gradient,
        &network.activation.apply_derivative(&zs[transitions - 1]),
    );
    nabla_w[transitions - 1] = outer(&delta, &activations[transitions - 1]);
    nabla_b[transitions - 1] = delta.clone();

    // Hidden layers, back to front. `zs[l]` and `lookahead[l + 1]` belong to
    // the layer fed by `weights[l]`.
    for l in (0..transitions - 1).rev() {
        let propagated = &lookahead[l + 1].transpose() * &delta;
        delta = hadamard(&propagated, &network.activation.apply_derivative(&zs[l]));
        nabla_w[l] = outer(&delta, &activations[l]);
        nabla_b[l] = delta.clone();
    }

    Ok(Gradients { weights: nabla_w, biases: nabla_b })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::activation::ActivationFunction;
    use crate::error::TrainError;
    use crate::loss::loss_type::CostFunction;
    use crate::utils::approx_eq::{assert_approx_equal_distance, assert_approx_equal_matrix};
    use rand::{rngs::StdRng, SeedableRng};

    fn network(sizes: &[usize], cost: CostFunction, seed: u64) -> Network {
        let mut rng = StdRng::seed_from_u64(seed);
        Network::new(sizes, ActivationFunction::Sigmoid, cost, &mut rng).unwrap()
    }

    fn example_for(sizes: &[usize]) -> (Vec<f64>, Vec<f64>) {
        let x = (0..sizes[0]).map(|i| 0.1 + 0.2 * i as f64).collect();
        let y = (0..sizes[sizes.len() - 1]).map(|i| (i % 2) as f64).collect();
        (x, y)
    }

    #[test]
    fn gradient_shapes_match_parameters() {
        let mut rng = StdRng::seed_from_u64(21);
        for sizes in [vec![2, 1], vec![3, 4, 2], vec![5, 7, 6, 3], vec![1, 1, 1, 1, 1]] {
            let net = network(&sizes, CostFunction::SquaredError, 1);
            let (x, y) = example_for(&sizes);
            let mask = DropoutMask::sample(&sizes, 0.5, &mut rng).unwrap();
            let grads = backprop(&net, &x, &y, 0.9, &Velocity::zeros_like(&net), &mask).unwrap();
            assert_eq!(grads.weights.len(), net.weights.len());
            for l in 0..net.weights.len() {
                assert_eq!(grads.weights[l].shape(), net.weights[l].shape());
                assert_eq!(grads.biases[l].shape(), net.biases[l].shape());
            }
        }
    }

    #[test]
    fn matches_finite_differences_without_dropout() {
        let sizes = [3, 4, 2];
        let net = network(&sizes, CostFunction::SquaredError, 7);
        let (x, y) = example_for(&sizes);
        let grads = backprop(&net, &x, &y, 0.0, &Velocity::zeros_like(&net), &DropoutMask::full(&sizes)).unwrap();

        let cost_at = |net: &Network| {
            let out = Matrix::column(&net.feedforward(&x).unwrap());
            net.cost.function(&out, &Matrix::column(&y))
        };
        let h = 1e-6;
        for l in 0..net.weights.len() {
            for i in 0..net.weights[l].rows {
                for j in 0..net.weights[l].cols {
                    let mut plus = net.clone();
                    plus.weights[l].data[i][j] += h;
                    let mut minus = net.clone();
                    minus.weights[l].data[i][j] -= h;
                    let numeric = (cost_at(&plus) - cost_at(&minus)) / (2.0 * h);
                    assert_approx_equal_distance(&[grads.weights[l].data[i][j]], &[numeric], 1e-6);
                }
            }
            for i in 0..net.biases[l].rows {
                let mut plus = net.clone();
                plus.biases[l].data[i][0] += h;
                let mut minus = net.clone();
                minus.biases[l].data[i][0] -= h;
                let numeric = (cost_at(&plus) - cost_at(&minus)) / (2.0 * h);
                assert_approx_equal_distance(&[grads.biases[l].data[i][0]], &[numeric], 1e-6);
            }
        }
    }

    #[test]
    fn momentum_shifts_the_weights_before_the_forward_pass() {
        let sizes = [2, 3, 1];
        let net = network(&sizes, CostFunction::SquaredError, 3);
        let mut rng = StdRng::seed_from_u64(4);
        let velocity = Velocity {
            weights: net.weights.iter().map(|w| Matrix::gaussian(w.rows, w.cols, 0.3, &mut rng)).collect(),
            biases: net.biases.iter().map(|b| Matrix::zeros(b.rows, b.cols)).collect(),
        };
        let mu = 0.8;
        let mut shifted = net.clone();
        for (w, v) in shifted.weights.iter_mut().zip(velocity.weights.iter()) {
            *w = w.clone() + v.scale(mu);
        }

        let (x, y) = example_for(&sizes);
        let mask = DropoutMask::full(&sizes);
        let with_lookahead = backprop(&net, &x, &y, mu, &velocity, &mask).unwrap();
        let pre_shifted = backprop(&shifted, &x, &y, 0.0, &Velocity::zeros_like(&shifted), &mask).unwrap();
        for l in 0..net.weights.len() {
            assert_approx_equal_matrix(&with_lookahead.weights[l], &pre_shifted.weights[l], 1e-12);
            assert_approx_equal_matrix(&with_lookahead.biases[l], &pre_shifted.biases[l], 1e-12);
        }
    }

    #[test]
    fn dropped_inputs_get_no_weight_gradient() {
        let sizes = [3, 2, 1];
        let net = network(&sizes, CostFunction::SquaredError, 5);
        let mut mask = DropoutMask::full(&sizes);
        mask.layers[0] = Matrix::column(&[1.0, 0.0, 1.0]);
        let grads = backprop(&net, &[0.4, 0.9, 0.2], &[1.0], 0.0, &Velocity::zeros_like(&net), &mask).unwrap();
        assert!(grads.weights[0].data.iter().all(|row| row[1] == 0.0));
    }

    #[test]
    fn dropped_neuron_passes_no_error_backward() {
        // The second hidden layer's only neuron is dropped, so no error can
        // reach the first weight matrix.
        let sizes = [2, 1, 1, 1];
        let net = network(&sizes, CostFunction::SquaredError, 6);
        let mut mask = DropoutMask::full(&sizes);
        mask.layers[2] = Matrix::column(&[0.0]);
        let grads = backprop(&net, &[0.3, 0.7], &[1.0], 0.0, &Velocity::zeros_like(&net), &mask).unwrap();
        assert_eq!(grads.weights[0], Matrix::zeros(1, 2));
        assert_eq!(grads.biases[0], Matrix::zeros(1, 1));
    }

    #[test]
    fn dropped_neuron_bias_still_learns() {
        let sizes = [2, 2, 1];
        let net = network(&sizes, CostFunction::SquaredError, 9);
        let mut mask = DropoutMask::full(&sizes);
        mask.layers[1] = Matrix::column(&[0.0, 1.0]);
        let grads = backprop(&net, &[0.3, 0.7], &[1.0], 0.0, &Velocity::zeros_like(&net), &mask).unwrap();
        assert_ne!(grads.biases[0].data[0][0], 0.0);
    }

    #[test]
    fn rejects_mismatched_shapes() {
        let sizes = [2, 3, 1];
        let net = network(&sizes, CostFunction::SquaredError, 8);
        let zero = Velocity::zeros_like(&net);
        let full = DropoutMask::full(&sizes);

        let long_input = backprop(&net, &[1.0, 2.0, 3.0], &[1.0], 0.0, &zero, &full);
        assert!(matches!(long_input, Err(TrainError::ShapeMismatch(_))));

        let long_target = backprop(&net, &[1.0, 2.0], &[1.0, 0.0], 0.0, &zero, &full);
        assert!(matches!(long_target, Err(TrainError::ShapeMismatch(_))));

        let short_mask = backprop(&net, &[1.0, 2.0], &[1.0], 0.0, &zero, &DropoutMask::full(&[2, 3]));
        assert!(matches!(short_mask, Err(TrainError::ShapeMismatch(_))));

        let bad_velocity = Velocity { weights: vec![Matrix::zeros(3, 2)], biases: vec![] };
        let res = backprop(&net, &[1.0, 2.0], &[1.0], 0.0, &bad_velocity, &full);
        assert!(matches!(res, Err(TrainError::ShapeMismatch(_))));
    }
}
