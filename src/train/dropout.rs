use rand::distributions::{Bernoulli, Distribution};
use rand::Rng;

use crate::error::{Result, TrainError};
use crate::math::matrix::Matrix;

/// Per-layer keep (1.0) / drop (0.0) indicators for a single example.
///
/// `layers[l]` is a `(sizes[l] × 1)` column, input layer included. The output
/// layer is always fully kept.
#[derive(Debug, Clone, PartialEq)]
pub struct DropoutMask {
    pub layers: Vec<Matrix>,
}

impl DropoutMask {
    /// Draws one Bernoulli(`keep_prob`) sample per neuron of every layer but
    /// the last, which is forced to ones. `keep_prob = 1.0` keeps everything.
    pub fn sample<R: Rng + ?Sized>(sizes: &[usize], keep_prob: f64, rng: &mut R) -> Result<DropoutMask> {
        validate_keep_prob(keep_prob)?;
        let bernoulli = Bernoulli::new(keep_prob)
            .map_err(|e| TrainError::InvalidArgument(format!("keep probability {}: {}", keep_prob, e)))?;
        let last = sizes.len().saturating_sub(1);
        let layers = sizes.iter().enumerate()
            .map(|(l, &size)| {
                if l == last {
                    Matrix::ones(size, 1)
                } else {
                    let draws: Vec<f64> = (0..size)
                        .map(|_| if bernoulli.sample(&mut *rng) { 1.0 } else { 0.0 })
                        .collect();
                    Matrix::column(&draws)
                }
            })
            .collect();
        Ok(DropoutMask { layers })
    }

    /// The mask that keeps every neuron.
    pub fn full(sizes: &[usize]) -> DropoutMask {
        DropoutMask {
            layers: sizes.iter().map(|&size| Matrix::ones(size, 1)).collect(),
        }
    }

    pub fn layer(&self, l: usize) -> &Matrix {
        &self.layers[l]
    }

    /// Verifies one column per layer, each as tall as its layer.
    pub fn check_against(&self, sizes: &[usize]) -> Result<()> {
        if self.layers.len() != sizes.len() {
            return Err(TrainError::ShapeMismatch(format!(
                "mask covers {} layers, network has {}", self.layers.len(), sizes.len()
            )));
        }
        for (l, (layer, &size)) in self.layers.iter().zip(sizes).enumerate() {
            if layer.shape() != (size, 1) {
                return Err(TrainError::ShapeMismatch(format!(
                    "mask layer {} is {:?}, expected ({}, 1)", l, layer.shape(), size
                )));
            }
        }
        Ok(())
    }

    /// Number of kept neurons in layer `l`.
    pub fn kept(&self, l: usize) -> usize {
        self.layers[l].data.iter().filter(|row| row[0] != 0.0).count()
    }
}

/// Keep probabilities must lie in (0, 1].
pub fn validate_keep_prob(keep_prob: f64) -> Result<()> {
    if keep_prob > 0.0 && keep_prob <= 1.0 {
        Ok(())
    } else {
        Err(TrainError::InvalidArgument(format!(
            "keep probability must be in (0, 1], got {}", keep_prob
        )))
    }
}
