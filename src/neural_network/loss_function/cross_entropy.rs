use crate::traits::LossFunction;
use ndarray::ArrayView1;

/// Lower clipping bound applied to predicted probabilities before taking the logarithm
const PROBABILITY_CLIP: f32 = 1e-7;

/// Categorical Cross Entropy loss function for one-hot classification targets
///
/// Computed per sample as `-Σ target_i * ln(output_i)`, with the output clipped to
/// `[1e-7, 1 - 1e-7]` so that a zero probability does not produce an infinite loss.
/// The output is expected to be a probability distribution (e.g. after softmax).
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossEntropy;

impl CrossEntropy {
    /// Creates a new instance of CrossEntropy
    pub fn new() -> Self {
        Self {}
    }
}

impl LossFunction for CrossEntropy {
    fn name(&self) -> &'static str {
        "cross_entropy"
    }

    fn compute_loss(&self, target: ArrayView1<f32>, output: ArrayView1<f32>) -> f32 {
        -target
            .iter()
            .zip(output.iter())
            .map(|(&t, &p)| t * p.clamp(PROBABILITY_CLIP, 1.0 - PROBABILITY_CLIP).ln())
            .sum::<f32>()
    }
}
