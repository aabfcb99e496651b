pub mod sgd;
pub mod velocity;

pub use sgd::Sgd;
pub use velocity::Velocity;
