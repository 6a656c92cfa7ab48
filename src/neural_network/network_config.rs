use super::helper_functions::{validate_layers, validate_learning_rate};
use super::{Activation, LossKind, OutputFunction, ProblemType};
use crate::error::ModelError;
use serde::{Deserialize, Serialize};

/// Everything needed to build a [`Network`](super::Network).
///
/// Missing fields fall back to [`NetworkConfig::default`] when deserializing.
///
/// # Fields
///
/// - `layers` - Layer widths, input first, output last; at least two, all positive
/// - `activation` - Hidden activation
/// - `output_function` - Output function (Softmax for classification, Identity for regression, ...)
/// - `loss` - Loss used for reporting
/// - `problem_type` - Classification or regression
/// - `learning_rate` - SGD step size
/// - `seed` - Seed for parameter initialisation
/// - `bias` - Whether layers carry bias vectors
/// - `epochs` - Passes over the dataset made by one call to `Network::train`
///
/// # Example
/// ```rust
/// use backprop_mlp::prelude::*;
///
/// let config = NetworkConfig::new(vec![2, 8, 3])
///     .with_problem_type(ProblemType::Classification)
///     .with_activation(Activation::Sigmoid)
///     .with_output_function(OutputFunction::Softmax)
///     .with_loss(LossKind::CrossEntropy)
///     .with_learning_rate(0.1)
///     .with_seed(7);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub layers: Vec<usize>,
    pub activation: Activation,
    pub output_function: OutputFunction,
    pub loss: LossKind,
    pub problem_type: ProblemType,
    pub learning_rate: f32,
    pub seed: u64,
    pub bias: bool,
    pub epochs: usize,
}

impl Default for NetworkConfig {
    /// Default Values
    ///
    /// - `layers` - \[1, 32, 16, 1\]
    /// - `activation` - Tanh
    /// - `output_function` - Identity
    /// - `loss` - MeanSquaredError
    /// - `problem_type` - Regression
    /// - `learning_rate` - 0.01
    /// - `seed` - 141
    /// - `bias` - true
    /// - `epochs` - 1
    fn default() -> Self {
        Self {
            layers: vec![1, 32, 16, 1],
            activation: Activation::Tanh,
            output_function: OutputFunction::Identity,
            loss: LossKind::MeanSquaredError,
            problem_type: ProblemType::Regression,
            learning_rate: 0.01,
            seed: 141,
            bias: true,
            epochs: 1,
        }
    }
}

impl NetworkConfig {
    /// Creates a configuration with the given layer widths and default everything else.
    pub fn new(layers: Vec<usize>) -> Self {
        Self {
            layers,
            ..Self::default()
        }
    }

    pub fn with_activation(mut self, activation: Activation) -> Self {
        self.activation = activation;
        self
    }

    pub fn with_output_function(mut self, output_function: OutputFunction) -> Self {
        self.output_function = output_function;
        self
    }

    pub fn with_loss(mut self, loss: LossKind) -> Self {
        self.loss = loss;
        self
    }

    pub fn with_problem_type(mut self, problem_type: ProblemType) -> Self {
        self.problem_type = problem_type;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f32) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_bias(mut self, bias: bool) -> Self {
        self.bias = bias;
        self
    }

    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    /// Checks the configuration before anything is built from it.
    ///
    /// # Returns
    ///
    /// - `Ok(())` - If the layer widths, learning rate and epoch count are usable
    /// - `Err(ModelError::InputValidationError)` - Otherwise
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_layers(&self.layers)?;
        validate_learning_rate(self.learning_rate)?;
        if self.epochs == 0 {
            return Err(ModelError::InputValidationError(
                "epochs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
