pub mod backprop;
pub mod dropout;
pub mod epoch_stats;
pub mod example;
pub mod gradients;
pub mod loop_fn;
pub mod train_config;

pub use backprop::backprop;
pub use dropout::DropoutMask;
pub use epoch_stats::EpochStats;
pub use example::Example;
pub use gradients::Gradients;
pub use loop_fn::{minibatches, train_loop, train_loop_with_rng, TrainSummary};
pub use train_config::TrainConfig;
