use std::sync::mpsc;
use std::sync::{Arc, atomic::AtomicBool};

use crate::optim::sgd::Sgd;
use crate::train::epoch_stats::EpochStats;

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`: total number of full passes over the training data
/// - `batch_size`: samples per mini-batch; use `1` for online SGD
/// - `optimizer`: learning rate, weight decay, momentum and keep probability
/// - `seed`: seeds the run's random source (shuffling and dropout)
/// - `verbose`: print a line to stdout after every epoch
/// - `progress_tx`: optional channel sender; one `EpochStats` is sent per
///                   completed epoch.  If the receiver is dropped the loop
///                   terminates early (clean shutdown).
/// - `stop_flag`: optional atomic flag; when set to `true` from another
///                   thread the loop terminates after the current epoch.
pub struct TrainConfig {
    pub epochs: usize,
    pub batch_size: usize,
    pub optimizer: Sgd,
    pub seed: u64,
    pub verbose: bool,
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl TrainConfig {
    /// Creates a quiet `TrainConfig` with seed 0, no progress channel and no stop flag.
    pub fn new(epochs: usize, batch_size: usize, optimizer: Sgd) -> Self {
        TrainConfig {
            epochs,
            batch_size,
            optimizer,
            seed: 0,
            verbose: false,
            progress_tx: None,
            stop_flag: None,
        }
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}
