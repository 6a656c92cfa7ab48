use crate::error::ModelError;
use ndarray::{Array2, ArrayView1, Axis};

/// Validates a list of layer widths.
///
/// # Parameters
///
/// * `layers` - Layer widths, input first
///
/// # Returns
///
/// - `Ok(())` - If there are at least two layers and every width is positive
/// - `Err(ModelError::InputValidationError)` - Otherwise
pub fn validate_layers(layers: &[usize]) -> Result<(), ModelError> {
    if layers.len() < 2 {
        return Err(ModelError::InputValidationError(format!(
            "A network needs at least an input and an output layer, got {} layer(s)",
            layers.len()
        )));
    }

    if let Some(i) = layers.iter().position(|&w| w == 0) {
        return Err(ModelError::InputValidationError(format!(
            "Layer {} has width 0, every layer width must be positive",
            i
        )));
    }

    Ok(())
}

/// Validates that the learning rate parameter is positive and finite.
///
/// # Parameters
///
/// * `learning_rate` - The learning rate value to validate
///
/// # Returns
///
/// - `Ok(())` - If the learning rate is valid (positive and finite)
/// - `Err(ModelError::InputValidationError)` - If the learning rate is invalid (non-positive, NaN, or infinite)
pub fn validate_learning_rate(learning_rate: f32) -> Result<(), ModelError> {
    if learning_rate <= 0.0 || !learning_rate.is_finite() {
        return Err(ModelError::InputValidationError(format!(
            "learning_rate must be positive and finite, got {}",
            learning_rate
        )));
    }
    Ok(())
}

/// Checks that a vector has the width a layer expects.
pub fn check_width(
    context: &'static str,
    expected: usize,
    actual: ArrayView1<f32>,
) -> Result<(), ModelError> {
    if actual.len() != expected {
        return Err(ModelError::DimensionMismatch {
            context,
            expected,
            actual: actual.len(),
        });
    }
    Ok(())
}

/// Outer product `column * row`, shaped `(column.len(), row.len())`.
pub fn outer(column: ArrayView1<f32>, row: ArrayView1<f32>) -> Array2<f32> {
    let column = column.insert_axis(Axis(1));
    let row = row.insert_axis(Axis(0));
    column.dot(&row)
}
