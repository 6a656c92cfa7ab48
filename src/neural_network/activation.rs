use crate::error::ModelError;
use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Hidden-layer activation function enum, supporting Identity, Sigmoid, Tanh and ReLU
///
/// Every variant carries a derivative that is evaluated at the pre-activation value `z`
/// (not at the activated output), which is what backpropagation stores in the forward trace.
///
/// Names accepted by `FromStr` (case-insensitive):
///
/// - `Identity` - "identity", "simple", "linear"
/// - `Sigmoid` - "sigmoid"
/// - `Tanh` - "tanh"
/// - `ReLU` - "relu"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    Identity,
    Sigmoid,
    Tanh,
    #[serde(rename = "relu")]
    ReLU,
}

impl Activation {
    /// Applies the activation function to a single pre-activation value.
    ///
    /// # Parameters
    ///
    /// * `z` - Pre-activation value
    ///
    /// # Returns
    ///
    /// * `f32` - Activated value
    pub fn apply_scalar(&self, z: f32) -> f32 {
        match self {
            Activation::Identity => z,
            Activation::Sigmoid => sigmoid(z),
            Activation::Tanh => z.tanh(),
            Activation::ReLU => {
                if z > 0.0 {
                    z
                } else {
                    0.0
                }
            }
        }
    }

    /// Computes the derivative of the activation function at a single pre-activation value.
    ///
    /// # Parameters
    ///
    /// * `z` - Pre-activation value the derivative is evaluated at
    ///
    /// # Returns
    ///
    /// * `f32` - Derivative value
    pub fn derivative_scalar(&self, z: f32) -> f32 {
        match self {
            Activation::Identity => 1.0,
            Activation::Sigmoid => {
                let s = sigmoid(z);
                s * (1.0 - s)
            }
            Activation::Tanh => {
                let t = z.tanh();
                1.0 - t * t
            }
            Activation::ReLU => {
                if z > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }

    /// Applies the activation function element-wise.
    ///
    /// # Parameters
    ///
    /// * `z` - Pre-activation vector
    ///
    /// # Returns
    ///
    /// * `Array1<f32>` - A new vector with the activation function applied
    pub fn apply(&self, z: ArrayView1<f32>) -> Array1<f32> {
        z.mapv(|v| self.apply_scalar(v))
    }

    /// Computes the derivative of the activation function element-wise at `z`.
    ///
    /// # Parameters
    ///
    /// * `z` - Pre-activation vector
    ///
    /// # Returns
    ///
    /// * `Array1<f32>` - A vector containing the derivative values
    pub fn derivative(&self, z: ArrayView1<f32>) -> Array1<f32> {
        z.mapv(|v| self.derivative_scalar(v))
    }

    /// Returns the canonical name of the activation function.
    pub fn name(&self) -> &'static str {
        match self {
            Activation::Identity => "identity",
            Activation::Sigmoid => "sigmoid",
            Activation::Tanh => "tanh",
            Activation::ReLU => "relu",
        }
    }
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Activation {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "identity" | "simple" | "linear" => Ok(Activation::Identity),
            "sigmoid" => Ok(Activation::Sigmoid),
            "tanh" => Ok(Activation::Tanh),
            "relu" => Ok(Activation::ReLU),
            _ => Err(ModelError::UnknownSelector {
                kind: "activation function",
                name: s.to_string(),
            }),
        }
    }
}

/// Logistic sigmoid, split by sign so that `exp` never overflows.
pub(crate) fn sigmoid(z: f32) -> f32 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}
