/// Fraction of positions where `predicted` equals `actual`.
///
/// # Parameters
///
/// - `predicted` - Predicted class indices
/// - `actual` - True class indices
///
/// # Returns
///
/// * `Option<f32>` - The accuracy in `[0, 1]`, or `None` if there is nothing to compare
///
/// # Panics
///
/// Panics if the two slices have different lengths.
///
/// # Example
/// ```rust
/// use backprop_mlp::metric::accuracy;
///
/// let acc = accuracy(&[0, 1, 2, 1], &[0, 1, 1, 1]).unwrap();
/// assert!((acc - 0.75).abs() < 1e-6);
/// assert_eq!(accuracy(&[], &[]), None);
/// ```
pub fn accuracy(predicted: &[usize], actual: &[usize]) -> Option<f32> {
    if predicted.len() != actual.len() {
        panic!(
            "Prediction and target arrays must have the same length. Predicted: {}, Actual: {}",
            predicted.len(),
            actual.len()
        );
    }

    if predicted.is_empty() {
        return None;
    }

    let correct = predicted
        .iter()
        .zip(actual.iter())
        .filter(|(p, a)| p == a)
        .count();
    Some(correct as f32 / predicted.len() as f32)
}

/// Coefficient of determination (R²) between predicted and actual values.
///
/// # Parameters
///
/// - `predicted` - Predicted values
/// - `actual` - True values
///
/// # Returns
///
/// * `Option<f32>` - `1 - SSE / SST`, or `None` if the input is empty or every actual value is the same
///
/// # Panics
///
/// Panics if the two slices have different lengths.
pub fn r2_score(predicted: &[f32], actual: &[f32]) -> Option<f32> {
    if predicted.len() != actual.len() {
        panic!(
            "Prediction and target arrays must have the same length. Predicted: {}, Actual: {}",
            predicted.len(),
            actual.len()
        );
    }

    if actual.is_empty() {
        return None;
    }

    let actual_mean = actual.iter().sum::<f32>() / actual.len() as f32;

    let (sse, sst) = actual.iter().zip(predicted.iter()).fold(
        (0.0f32, 0.0f32),
        |(sse_acc, sst_acc), (&act, &pred)| {
            let error = pred - act;
            let deviation = act - actual_mean;
            (sse_acc + error * error, sst_acc + deviation * deviation)
        },
    );

    // all actual values identical
    if sst < 1e-10 {
        return None;
    }

    Some(1.0 - sse / sst)
}
