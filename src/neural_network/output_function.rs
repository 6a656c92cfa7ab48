use super::activation::sigmoid;
use crate::error::ModelError;
use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output function enum, used to turn the raw values of the final layer into what the user sees
///
/// Unlike [`Activation`](super::Activation), an output function works on the whole output
/// vector at once, which is what Softmax needs. It has no derivative: backpropagation never
/// differentiates through the output stage (see [`ProblemType::output_delta`](super::ProblemType::output_delta)).
///
/// Names accepted by `FromStr` (case-insensitive):
///
/// - `Identity` - "identity", "simple", "linear"
/// - `Softmax` - "softmax"
/// - `Sigmoid` - "sigmoid"
/// - `Tanh` - "tanh"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFunction {
    Identity,
    Softmax,
    Sigmoid,
    Tanh,
}

impl OutputFunction {
    /// Applies the output function to a raw output vector.
    ///
    /// Softmax subtracts the maximum before exponentiating, so large raw values do not overflow.
    ///
    /// # Parameters
    ///
    /// * `raw` - Raw values of the final layer
    ///
    /// # Returns
    ///
    /// * `Array1<f32>` - Transformed output vector of the same length
    pub fn apply(&self, raw: ArrayView1<f32>) -> Array1<f32> {
        match self {
            OutputFunction::Identity => raw.to_owned(),
            OutputFunction::Softmax => {
                if raw.is_empty() {
                    return Array1::zeros(0);
                }
                let max_val = raw.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
                let mut out = raw.mapv(|x| (x - max_val).exp());
                let sum = out.sum();
                out.mapv_inplace(|x| x / sum);
                out
            }
            OutputFunction::Sigmoid => raw.mapv(sigmoid),
            OutputFunction::Tanh => raw.mapv(f32::tanh),
        }
    }

    /// Returns the canonical name of the output function.
    pub fn name(&self) -> &'static str {
        match self {
            OutputFunction::Identity => "identity",
            OutputFunction::Softmax => "softmax",
            OutputFunction::Sigmoid => "sigmoid",
            OutputFunction::Tanh => "tanh",
        }
    }
}

impl fmt::Display for OutputFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFunction {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "identity" | "simple" | "linear" => Ok(OutputFunction::Identity),
            "softmax" => Ok(OutputFunction::Softmax),
            "sigmoid" => Ok(OutputFunction::Sigmoid),
            "tanh" => Ok(OutputFunction::Tanh),
            _ => Err(ModelError::UnknownSelector {
                kind: "output function",
                name: s.to_string(),
            }),
        }
    }
}
