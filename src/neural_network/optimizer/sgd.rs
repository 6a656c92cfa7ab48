use crate::neural_network::helper_functions::validate_learning_rate;
use crate::neural_network::parameters::{Gradients, Parameters};
use crate::error::ModelError;

/// Stochastic Gradient Descent (SGD) optimizer.
///
/// Updates parameters in the direction of the negative gradient, scaled by the learning rate:
/// `w -= learning_rate * grad` for every weight matrix and bias vector.
///
/// # Fields
///
/// * `learning_rate` - Learning rate controlling the size of parameter updates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SGD {
    learning_rate: f32,
}

impl SGD {
    /// Creates a new SGD optimizer with the specified learning rate.
    ///
    /// # Parameters
    ///
    /// * `learning_rate` - Step size for parameter updates
    ///
    /// # Returns
    ///
    /// - `Ok(Self)` - A new SGD optimizer instance
    /// - `Err(ModelError::InputValidationError)` - If the learning rate is not positive and finite
    pub fn new(learning_rate: f32) -> Result<Self, ModelError> {
        validate_learning_rate(learning_rate)?;
        Ok(Self { learning_rate })
    }

    /// Gets the learning rate.
    pub fn learning_rate(&self) -> f32 {
        self.learning_rate
    }

    /// Applies one update step to every layer.
    ///
    /// All gradients must already be computed: the update never interleaves with the
    /// backward pass, so every gradient was taken against the pre-update weights.
    ///
    /// # Parameters
    ///
    /// - `parameters` - Parameters to update in place
    /// - `gradients` - Gradients shaped like `parameters`
    ///
    /// # Returns
    ///
    /// - `Ok(())` - If every gradient matched its parameter's shape
    /// - `Err(ModelError::DimensionMismatch)` - If the layer counts or shapes differ; nothing is updated in that case
    pub fn update_parameters(
        &self,
        parameters: &mut Parameters,
        gradients: &Gradients,
    ) -> Result<(), ModelError> {
        check_gradient_shapes(parameters, gradients)?;

        let lr = self.learning_rate;
        for (w, g) in parameters
            .weights_mut()
            .iter_mut()
            .zip(gradients.weights.iter())
        {
            w.scaled_add(-lr, g);
        }

        if let (Some(biases), Some(grad_biases)) =
            (parameters.biases_mut(), gradients.biases.as_ref())
        {
            for (b, g) in biases.iter_mut().zip(grad_biases.iter()) {
                b.scaled_add(-lr, g);
            }
        }

        Ok(())
    }
}

fn check_gradient_shapes(parameters: &Parameters, gradients: &Gradients) -> Result<(), ModelError> {
    if parameters.weights().len() != gradients.weights.len() {
        return Err(ModelError::DimensionMismatch {
            context: "gradient layer count",
            expected: parameters.weights().len(),
            actual: gradients.weights.len(),
        });
    }

    for (w, g) in parameters.weights().iter().zip(gradients.weights.iter()) {
        if w.dim() != g.dim() {
            return Err(ModelError::DimensionMismatch {
                context: "weight gradient size",
                expected: w.len(),
                actual: g.len(),
            });
        }
    }

    match (parameters.biases(), gradients.biases.as_ref()) {
        (Some(biases), Some(grad_biases)) => {
            if biases.len() != grad_biases.len() {
                return Err(ModelError::DimensionMismatch {
                    context: "bias gradient count",
                    expected: biases.len(),
                    actual: grad_biases.len(),
                });
            }
            for (b, g) in biases.iter().zip(grad_biases.iter()) {
                if b.len() != g.len() {
                    return Err(ModelError::DimensionMismatch {
                        context: "bias gradient length",
                        expected: b.len(),
                        actual: g.len(),
                    });
                }
            }
            Ok(())
        }
        (None, None) => Ok(()),
        (Some(biases), None) => Err(ModelError::DimensionMismatch {
            context: "bias gradient count",
            expected: biases.len(),
            actual: 0,
        }),
        (None, Some(grad_biases)) => Err(ModelError::DimensionMismatch {
            context: "bias gradient count",
            expected: 0,
            actual: grad_biases.len(),
        }),
    }
}
