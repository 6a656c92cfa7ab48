use super::Prediction;
use crate::dataset::{Dataset, decode_class};
use crate::error::ModelError;

/// Result of evaluating a network on a dataset.
///
/// # Fields
///
/// - `score` - Accuracy for classification, R² for regression. `None` when the dataset was
///   empty, or for regression when every target is the same
/// - `loss` - Mean of the configured loss over the samples, `None` for an empty dataset
/// - `predictions` - One prediction per sample, in dataset order
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub score: Option<f32>,
    pub loss: Option<f32>,
    pub predictions: Vec<Prediction>,
}

/// Two parallel point sequences for plotting targets against predictions.
///
/// Each point is `(first input coordinate, first target or prediction coordinate)`.
/// For classification both sides contribute class indices instead.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlotSeries {
    pub targets: Vec<(f32, f32)>,
    pub predictions: Vec<(f32, f32)>,
}

impl Evaluation {
    /// Evaluation of an empty dataset.
    pub fn empty() -> Self {
        Self {
            score: None,
            loss: None,
            predictions: Vec::new(),
        }
    }

    /// Pairs the predictions with the dataset they were made on, for plotting.
    ///
    /// # Parameters
    ///
    /// * `dataset` - The dataset this evaluation was produced from, in the same order
    ///
    /// # Returns
    ///
    /// - `Ok(PlotSeries)` - Target and prediction points, in dataset order
    /// - `Err(ModelError::DimensionMismatch)` - If the dataset and predictions differ in length
    pub fn plot_series(&self, dataset: &Dataset) -> Result<PlotSeries, ModelError> {
        if dataset.len() != self.predictions.len() {
            return Err(ModelError::DimensionMismatch {
                context: "plot series length",
                expected: self.predictions.len(),
                actual: dataset.len(),
            });
        }

        let mut series = PlotSeries {
            targets: Vec::with_capacity(dataset.len()),
            predictions: Vec::with_capacity(dataset.len()),
        };

        for (sample, prediction) in dataset.iter().zip(self.predictions.iter()) {
            let x = sample.input().first().copied().unwrap_or(f32::NAN);
            let y = match prediction {
                Prediction::Class(_) => decode_class(sample.target())
                    .map(|c| c as f32)
                    .unwrap_or(f32::NAN),
                Prediction::Values(_) => sample.target().first().copied().unwrap_or(f32::NAN),
            };
            series.targets.push((x, y));
            series.predictions.push((x, prediction.first_coordinate()));
        }

        Ok(series)
    }
}
