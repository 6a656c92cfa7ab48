use super::{Activation, OutputFunction};
use crate::error::ModelError;
use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of problem a network solves, which decides how the final layer is treated
///
/// # Variants
///
/// - `Classification` - The final layer uses the hidden activation like every other layer.
///   The output function (typically Softmax) is only applied when a prediction is presented,
///   and the prediction is the index of the largest presented value.
/// - `Regression` - The final layer applies the output function directly, and the prediction
///   is the resulting vector.
///
/// Both variants start backpropagation from `output - target` (see [`ProblemType::output_delta`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemType {
    Classification,
    Regression,
}

/// What a network predicts for one input
///
/// # Variants
///
/// - `Class` - Class index chosen by a classification network
/// - `Values` - Output vector of a regression network
#[derive(Debug, Clone, PartialEq)]
pub enum Prediction {
    Class(usize),
    Values(Array1<f32>),
}

impl Prediction {
    /// Returns the class index if this is a classification prediction.
    pub fn class(&self) -> Option<usize> {
        match self {
            Prediction::Class(c) => Some(*c),
            Prediction::Values(_) => None,
        }
    }

    /// Returns the output vector if this is a regression prediction.
    pub fn values(&self) -> Option<ArrayView1<'_, f32>> {
        match self {
            Prediction::Class(_) => None,
            Prediction::Values(v) => Some(v.view()),
        }
    }

    /// First coordinate of the prediction as a plain number, used for plotting.
    ///
    /// A class index is returned as-is; an empty value vector yields NaN.
    pub fn first_coordinate(&self) -> f32 {
        match self {
            Prediction::Class(c) => *c as f32,
            Prediction::Values(v) => v.first().copied().unwrap_or(f32::NAN),
        }
    }
}

impl ProblemType {
    /// Applies the function appropriate for the final layer to its pre-activation.
    ///
    /// # Parameters
    ///
    /// - `z` - Pre-activation of the final layer
    /// - `activation` - Hidden activation of the network
    /// - `output_function` - Output function of the network
    ///
    /// # Returns
    ///
    /// * `Array1<f32>` - Post-activation of the final layer as stored in the forward trace
    pub fn final_activation(
        &self,
        z: ArrayView1<f32>,
        activation: Activation,
        output_function: OutputFunction,
    ) -> Array1<f32> {
        match self {
            ProblemType::Classification => activation.apply(z),
            ProblemType::Regression => output_function.apply(z),
        }
    }

    /// Turns the final-layer output into the vector the user sees.
    ///
    /// For classification this is where the output function runs, e.g. producing
    /// Softmax probabilities; for regression the output already went through it.
    pub fn present(&self, raw: ArrayView1<f32>, output_function: OutputFunction) -> Array1<f32> {
        match self {
            ProblemType::Classification => output_function.apply(raw),
            ProblemType::Regression => raw.to_owned(),
        }
    }

    /// Turns the final-layer output into a prediction.
    ///
    /// # Parameters
    ///
    /// - `raw` - Post-activation of the final layer
    /// - `output_function` - Output function of the network
    ///
    /// # Returns
    ///
    /// * `Prediction` - `Class(argmax)` for classification, `Values(raw)` for regression
    pub fn predict(&self, raw: ArrayView1<f32>, output_function: OutputFunction) -> Prediction {
        match self {
            ProblemType::Classification => {
                Prediction::Class(argmax(self.present(raw, output_function).view()))
            }
            ProblemType::Regression => Prediction::Values(raw.to_owned()),
        }
    }

    /// Error signal that starts the backward pass.
    ///
    /// Both variants use `output - target` without differentiating the final-layer
    /// activation or the output function. This is the exact gradient of `0.5 * |a - t|^2`
    /// for an identity output, and of cross entropy for a sigmoid or softmax output.
    pub fn output_delta(&self, output: ArrayView1<f32>, target: ArrayView1<f32>) -> Array1<f32> {
        &output - &target
    }

    /// Returns the canonical name of the problem type.
    pub fn name(&self) -> &'static str {
        match self {
            ProblemType::Classification => "classification",
            ProblemType::Regression => "regression",
        }
    }
}

impl fmt::Display for ProblemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProblemType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classification" => Ok(ProblemType::Classification),
            "regression" => Ok(ProblemType::Regression),
            _ => Err(ModelError::UnknownSelector {
                kind: "problem type",
                name: s.to_string(),
            }),
        }
    }
}

/// Index of the largest value, the first one on ties. NaN entries never win.
pub fn argmax(values: ArrayView1<f32>) -> usize {
    let mut best_index = 0;
    let mut best_value = f32::NEG_INFINITY;
    for (i, &v) in values.iter().enumerate() {
        if v > best_value {
            best_value = v;
            best_index = i;
        }
    }
    best_index
}
