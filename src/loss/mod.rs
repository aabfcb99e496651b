pub mod squared_error;
pub mod cross_entropy;
pub mod loss_type;

pub use squared_error::SquaredErrorCost;
pub use cross_entropy::CrossEntropyCost;
pub use loss_type::{Cost, CostFunction};
