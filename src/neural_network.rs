/// Module that contains the hidden-layer activation functions
pub mod activation;
/// Module that contains the result types of evaluating a network
pub mod evaluation;
/// Module that contains the per-sample forward pass record
pub mod forward_trace;
/// Module that contains validation and small linear algebra helpers
pub mod helper_functions;
/// Module that contains loss function implementations
pub mod loss_function;
/// Module that contains the network itself
pub mod network;
/// Module that contains the network configuration
pub mod network_config;
/// Module that contains optimization algorithms for neural network training
pub mod optimizer;
/// Module that contains the output functions applied to the final layer
pub mod output_function;
/// Module that contains weight and bias storage and initialisation
pub mod parameters;
/// Module that contains the classification/regression output strategy
pub mod problem_type;
/// Module that contains progress reporting for long loops
pub mod progress;

pub use activation::*;
pub use evaluation::*;
pub use forward_trace::*;
pub use loss_function::*;
pub use network::*;
pub use network_config::*;
pub use optimizer::*;
pub use output_function::*;
pub use parameters::*;
pub use problem_type::*;

pub use crate::traits::LossFunction;
