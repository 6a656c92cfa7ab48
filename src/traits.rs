use crate::error::IoError;
use crate::training::{EpochRecord, TrainingConfig};
use ndarray::ArrayView1;

/// Defines the interface for loss functions used to report how far a network's
/// outputs are from their targets.
///
/// Losses are evaluated one sample at a time; averaging over a dataset is left to the caller.
pub trait LossFunction {
    /// Returns the registered name of the loss (e.g. "mean_squared_error").
    ///
    /// # Returns
    ///
    /// * `&'static str` - Canonical name of the loss
    fn name(&self) -> &'static str;

    /// Computes the loss between a target vector and the user-facing output for one sample.
    ///
    /// # Parameters
    ///
    /// - `target` - Ground truth vector
    /// - `output` - Output vector produced by the network
    ///
    /// # Returns
    ///
    /// * `f32` - The scalar loss value
    fn compute_loss(&self, target: ArrayView1<f32>, output: ArrayView1<f32>) -> f32;
}

/// Defines the interface for consumers of the per-epoch metrics emitted by the training driver.
///
/// A sink may persist records (file, log) or keep them in memory. The driver calls
/// `write_header` once before the first epoch and `record` once per epoch, in order.
pub trait MetricSink {
    /// Receives the run configuration before the first epoch.
    ///
    /// The default implementation ignores it.
    ///
    /// # Parameters
    ///
    /// * `_config` - Configuration the run was started with
    ///
    /// # Returns
    ///
    /// - `Ok(())` - If the header was handled
    /// - `Err(IoError)` - If the sink could not write the header
    fn write_header(&mut self, _config: &TrainingConfig) -> Result<(), IoError> {
        Ok(())
    }

    /// Receives one epoch record.
    ///
    /// # Parameters
    ///
    /// * `record` - Metrics of the epoch that just finished
    ///
    /// # Returns
    ///
    /// - `Ok(())` - If the record was handled
    /// - `Err(IoError)` - If the sink could not persist the record
    fn record(&mut self, record: &EpochRecord) -> Result<(), IoError>;
}
