pub mod error;
pub mod math;
pub mod activation;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;

mod utils;


// Convenience re-exports
pub use error::{Result, TrainError};
pub use math::matrix::Matrix;
pub use activation::activation::{Activation, ActivationFunction};
pub use network::network::Network;
pub use network::spec::NetworkSpec;
pub use loss::loss_type::{Cost, CostFunction};
pub use optim::sgd::Sgd;
pub use optim::velocity::Velocity;
pub use train::example::Example;
pub use train::train_config::TrainConfig;
pub use train::epoch_stats::EpochStats;
pub use train::loop_fn::{train_loop, train_loop_with_rng, TrainSummary};
