use crate::traits::LossFunction;
use ndarray::ArrayView1;

/// Mean Squared Error loss function
///
/// Computed per sample as the mean of the squared differences between output and target.
///
/// # Example
///
/// ```rust
/// use backprop_mlp::neural_network::loss_function::MeanSquaredError;
/// use backprop_mlp::traits::LossFunction;
/// use ndarray::array;
///
/// let mse = MeanSquaredError::new();
/// let target = array![1.0, 2.0, 3.0];
/// let output = array![1.0, 2.0, 5.0];
///
/// let loss = mse.compute_loss(target.view(), output.view());
/// assert!((loss - 4.0 / 3.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanSquaredError;

impl MeanSquaredError {
    /// Creates a new instance of MeanSquaredError
    ///
    /// # Returns
    ///
    /// - `MeanSquaredError` - Returns a unit-like struct `MeanSquaredError`
    pub fn new() -> Self {
        Self {}
    }
}

impl LossFunction for MeanSquaredError {
    fn name(&self) -> &'static str {
        "mean_squared_error"
    }

    fn compute_loss(&self, target: ArrayView1<f32>, output: ArrayView1<f32>) -> f32 {
        if target.is_empty() {
            return 0.0;
        }

        let squared_diff = (&output - &target).mapv(|x| x * x);
        squared_diff.sum() / squared_diff.len() as f32
    }
}
