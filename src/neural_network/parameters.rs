use super::helper_functions::validate_layers;
use crate::error::ModelError;
use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// Trainable parameters of a network: one weight matrix per pair of consecutive layers
/// and, when bias is enabled, one bias vector per pair.
///
/// Weight matrix `i` has shape `(width_i, width_{i+1})` and bias vector `i` has length
/// `width_{i+1}`, so a row vector times the matrix maps layer `i` onto layer `i + 1`.
///
/// # Fields
///
/// - `weights` - Weight matrices, `layers.len() - 1` of them
/// - `biases` - Bias vectors, present only when bias is enabled
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    weights: Vec<Array2<f32>>,
    biases: Option<Vec<Array1<f32>>>,
}

/// Gradients for every parameter of a network, shaped exactly like [`Parameters`].
#[derive(Debug, Clone, PartialEq)]
pub struct Gradients {
    /// Weight gradients, one per weight matrix
    pub weights: Vec<Array2<f32>>,
    /// Bias gradients, present only when the network has biases
    pub biases: Option<Vec<Array1<f32>>>,
}

impl Parameters {
    /// Draws fresh parameters for the given layer widths.
    ///
    /// Every entry is sampled i.i.d. from a standard normal distribution and divided by
    /// `sqrt(fan_in)`, where the fan-in of the pair `(i, i + 1)` is `width_i`. For each pair the
    /// bias vector (if enabled) is drawn before the weight matrix, all from one generator
    /// seeded with `seed`, so the same widths and seed always give bit-identical parameters.
    ///
    /// # Parameters
    ///
    /// - `layers` - Layer widths, input first
    /// - `bias` - Whether to allocate bias vectors
    /// - `seed` - Seed of the random generator
    ///
    /// # Returns
    ///
    /// - `Ok(Parameters)` - Initialised parameters
    /// - `Err(ModelError::InputValidationError)` - If fewer than two layers are given or a width is zero
    pub fn initialize(layers: &[usize], bias: bool, seed: u64) -> Result<Self, ModelError> {
        validate_layers(layers)?;

        let mut rng = StdRng::seed_from_u64(seed);
        let mut weights = Vec::with_capacity(layers.len() - 1);
        let mut biases = Vec::with_capacity(if bias { layers.len() - 1 } else { 0 });

        for pair in layers.windows(2) {
            let (fan_in, fan_out) = (pair[0], pair[1]);
            let scale = 1.0 / (fan_in as f32).sqrt();

            if bias {
                biases.push(Array1::from_shape_simple_fn(fan_out, || {
                    rng.sample::<f32, _>(StandardNormal) * scale
                }));
            }
            weights.push(Array2::from_shape_simple_fn((fan_in, fan_out), || {
                rng.sample::<f32, _>(StandardNormal) * scale
            }));
        }

        Ok(Self {
            weights,
            biases: bias.then_some(biases),
        })
    }

    /// Builds parameters from explicit values.
    ///
    /// # Parameters
    ///
    /// - `weights` - Weight matrices; the column count of each must equal the row count of the next
    /// - `biases` - Optional bias vectors, one per weight matrix, each as long as its matrix has columns
    ///
    /// # Returns
    ///
    /// - `Ok(Parameters)` - If the shapes chain correctly
    /// - `Err(ModelError)` - If there are no matrices, a matrix is empty, or shapes do not chain
    pub fn from_weights(
        weights: Vec<Array2<f32>>,
        biases: Option<Vec<Array1<f32>>>,
    ) -> Result<Self, ModelError> {
        if weights.is_empty() {
            return Err(ModelError::InputValidationError(
                "At least one weight matrix is required".to_string(),
            ));
        }

        let mut widths = Vec::with_capacity(weights.len() + 1);
        widths.push(weights[0].nrows());
        for (i, w) in weights.iter().enumerate() {
            if w.nrows() != widths[i] {
                return Err(ModelError::DimensionMismatch {
                    context: "weight matrix rows",
                    expected: widths[i],
                    actual: w.nrows(),
                });
            }
            widths.push(w.ncols());
        }
        validate_layers(&widths)?;

        if let Some(biases) = &biases {
            if biases.len() != weights.len() {
                return Err(ModelError::DimensionMismatch {
                    context: "bias vector count",
                    expected: weights.len(),
                    actual: biases.len(),
                });
            }
            for (b, w) in biases.iter().zip(weights.iter()) {
                if b.len() != w.ncols() {
                    return Err(ModelError::DimensionMismatch {
                        context: "bias vector length",
                        expected: w.ncols(),
                        actual: b.len(),
                    });
                }
            }
        }

        Ok(Self { weights, biases })
    }

    /// Gets the weight matrices.
    pub fn weights(&self) -> &[Array2<f32>] {
        &self.weights
    }

    /// Gets the bias vectors, if bias is enabled.
    pub fn biases(&self) -> Option<&[Array1<f32>]> {
        self.biases.as_deref()
    }

    /// Whether the parameters include bias vectors.
    pub fn has_bias(&self) -> bool {
        self.biases.is_some()
    }

    /// Layer widths implied by the weight shapes, input first.
    pub fn layer_widths(&self) -> Vec<usize> {
        let mut widths = Vec::with_capacity(self.weights.len() + 1);
        widths.push(self.weights[0].nrows());
        widths.extend(self.weights.iter().map(|w| w.ncols()));
        widths
    }

    /// Total number of trainable scalars.
    pub fn param_count(&self) -> usize {
        let weight_count: usize = self.weights.iter().map(|w| w.len()).sum();
        let bias_count: usize = self
            .biases
            .as_ref()
            .map(|b| b.iter().map(|v| v.len()).sum())
            .unwrap_or(0);
        weight_count + bias_count
    }

    /// Number of trainable scalars in the pair `(index, index + 1)`.
    ///
    /// # Returns
    ///
    /// * `Option<usize>` - The count, or `None` if there is no weight matrix at `index`
    pub fn layer_param_count(&self, index: usize) -> Option<usize> {
        let weights = self.weights.get(index)?.len();
        let bias = match &self.biases {
            Some(biases) => biases.get(index)?.len(),
            None => 0,
        };
        Some(weights + bias)
    }

    pub(crate) fn weights_mut(&mut self) -> &mut [Array2<f32>] {
        &mut self.weights
    }

    pub(crate) fn biases_mut(&mut self) -> Option<&mut [Array1<f32>]> {
        self.biases.as_deref_mut()
    }
}
