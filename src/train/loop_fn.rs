use std::slice::Chunks;
use std::sync::atomic::Ordering;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::activation::activation::Activation;
use crate::error::{Result, TrainError};
use crate::loss::loss_type::Cost;
use crate::network::network::Network;
use crate::optim::sgd::Sgd;
use crate::optim::velocity::Velocity;
use crate::train::dropout::validate_keep_prob;
use crate::train::epoch_stats::EpochStats;
use crate::train::example::Example;
use crate::train::train_config::TrainConfig;

/// Outcome of a `train_loop` run.
#[derive(Debug, Clone)]
pub struct TrainSummary {
    /// Epochs actually run; lower than requested if the run was stopped.
    pub epochs_completed: usize,
    /// Velocity after the last mini-batch.
    pub velocity: Velocity,
    /// Mean training cost after the last epoch, weight penalty included.
    pub final_cost: f64,
}

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Trains `network` on `data` for `config.epochs` epochs with a random source
/// seeded from `config.seed`.
///
/// `data` is reshuffled in place every epoch. See `train_loop_with_rng`.
pub fn train_loop<A: Activation, C: Cost>(
    network: &mut Network<A, C>,
    data: &mut [Example],
    config: &TrainConfig,
) -> Result<TrainSummary> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    train_loop_with_rng(network, data, config, &mut rng)
}

/// Trains `network` with mini-batch SGD, drawing all randomness from `rng`.
///
/// Each epoch shuffles `data`, cuts it into contiguous mini-batches of
/// `config.batch_size` (the last one may be shorter) and runs the batch step
/// on each in order. The velocity starts at zero and is carried across
/// batches and epochs. There is no convergence check.
///
/// # Errors
/// `InvalidArgument` for an empty data set, a zero batch size or a keep
/// probability outside (0, 1]; `ShapeMismatch` when the network or any
/// example disagrees with the layer sizes. Both are reported before the
/// network or the data order is touched.
///
/// # Early termination
/// The loop stops at an epoch boundary if:
/// - the `progress_tx` receiver has been dropped, **or**
/// - `config.stop_flag` is set to `true`.
pub fn train_loop_with_rng<A, C, R>(
    network: &mut Network<A, C>,
    data: &mut [Example],
    config: &TrainConfig,
    rng: &mut R,
) -> Result<TrainSummary>
where
    A: Activation,
    C: Cost,
    R: Rng + ?Sized,
{
    if data.is_empty() {
        return Err(TrainError::InvalidArgument("training set must not be empty".to_string()));
    }
    if config.batch_size == 0 {
        return Err(TrainError::InvalidArgument("batch_size must be at least 1".to_string()));
    }
    validate_keep_prob(config.optimizer.keep_prob)?;
    network.check_shapes()?;
    for example in data.iter() {
        network.check_example(example)?;
    }

    let weight_decay = config.optimizer.weight_decay;
    let mut velocity = Velocity::zeros_like(network);
    let mut epochs_completed = 0;

    for epoch in 1..=config.epochs {
        if stop_requested(config) {
            break;
        }

        let t_start = Instant::now();

        velocity = run_one_epoch(network, data, &config.optimizer, config.batch_size, velocity, &mut *rng)?;
        epochs_completed = epoch;

        let elapsed_ms = t_start.elapsed().as_millis() as u64;

        if config.verbose {
            println!("Epoch {} training complete", epoch);
        }

        if let Some(ref tx) = config.progress_tx {
            let stats = EpochStats {
                epoch,
                total_epochs: config.epochs,
                train_cost: network.total_cost(data, weight_decay)?,
                elapsed_ms,
            };
            // If the receiver has been dropped, stop training.
            if tx.send(stats).is_err() {
                break;
            }
        }
    }

    Ok(TrainSummary {
        epochs_completed,
        final_cost: network.total_cost(data, weight_decay)?,
        velocity,
    })
}

/// Shuffles `data` in place, every permutation equally likely, and returns
/// its contiguous mini-batches of `batch_size` examples.
///
/// # Panics
/// Panics if `batch_size == 0`.
pub fn minibatches<'a, R: Rng + ?Sized>(
    data: &'a mut [Example],
    batch_size: usize,
    rng: &mut R,
) -> Chunks<'a, Example> {
    data.shuffle(rng);
    data.chunks(batch_size)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// One full pass over the shuffled training data. Returns the velocity after
/// the last mini-batch.
fn run_one_epoch<A, C, R>(
    network: &mut Network<A, C>,
    data: &mut [Example],
    optimizer: &Sgd,
    batch_size: usize,
    mut velocity: Velocity,
    rng: &mut R,
) -> Result<Velocity>
where
    A: Activation,
    C: Cost,
    R: Rng + ?Sized,
{
    for batch in minibatches(data, batch_size, &mut *rng) {
        velocity = optimizer.step(network, batch, &velocity, &mut *rng)?;
    }
    Ok(velocity)
}

fn stop_requested(config: &TrainConfig) -> bool {
    config.stop_flag.as_ref().map_or(false, |flag| flag.load(Ordering::Relaxed))
}
