/// Categorical cross entropy loss for one-hot classification targets
pub mod cross_entropy;
/// Mean Squared Error loss function
pub mod mean_squared_error;

pub use cross_entropy::*;
pub use mean_squared_error::*;

use crate::error::ModelError;
use crate::traits::LossFunction;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Selects one of the registered loss functions by name
///
/// The selected loss only feeds the `loss` field of an evaluation; the gradient used by
/// backpropagation is `output - target` whichever loss is configured.
///
/// Names accepted by `FromStr` (case-insensitive):
///
/// - `MeanSquaredError` - "mean_squared_error", "mse"
/// - `CrossEntropy` - "cross_entropy", "categorical_cross_entropy"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossKind {
    MeanSquaredError,
    CrossEntropy,
}

impl LossKind {
    /// Builds the loss function this selector names.
    ///
    /// # Returns
    ///
    /// * `Box<dyn LossFunction + Send + Sync>` - The loss function instance
    pub fn build(&self) -> Box<dyn LossFunction + Send + Sync> {
        match self {
            LossKind::MeanSquaredError => Box::new(MeanSquaredError::new()),
            LossKind::CrossEntropy => Box::new(CrossEntropy::new()),
        }
    }

    /// Returns the canonical name of the loss.
    pub fn name(&self) -> &'static str {
        match self {
            LossKind::MeanSquaredError => "mean_squared_error",
            LossKind::CrossEntropy => "cross_entropy",
        }
    }
}

impl fmt::Display for LossKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LossKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mean_squared_error" | "mse" => Ok(LossKind::MeanSquaredError),
            "cross_entropy" | "categorical_cross_entropy" => Ok(LossKind::CrossEntropy),
            _ => Err(ModelError::UnknownSelector {
                kind: "loss function",
                name: s.to_string(),
            }),
        }
    }
}
