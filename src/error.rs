use thiserror::Error;

/// Errors surfaced by network construction and training.
///
/// Both variants are raised before any weight, bias or velocity is touched,
/// so a failed call never leaves a network half-updated.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TrainError {
    /// Weights, biases, examples or velocity disagree with the layer sizes.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Empty batch or data set, zero batch size, keep probability outside (0, 1],
    /// or a degenerate layer layout.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, TrainError>;
