pub mod matrix;
pub mod ops;

pub use matrix::Matrix;
pub use ops::{hadamard, outer, weighted_input};
