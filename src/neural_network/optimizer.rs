/// Stochastic Gradient Descent, the update rule applied after every sample
pub mod sgd;

pub use sgd::*;
