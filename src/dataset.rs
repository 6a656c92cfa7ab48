use crate::error::ModelError;
use ndarray::{Array1, ArrayView1, ArrayView2};
use rand::Rng;
use rand::seq::SliceRandom;

/// One training or test example: an input vector and its target.
///
/// For regression the target is the expected output vector. For classification it is a
/// one-hot vector as wide as the output layer; [`Sample::from_class`] builds one from a
/// class index.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    input: Array1<f32>,
    target: Array1<f32>,
}

impl Sample {
    /// Creates a sample from an input vector and a target vector.
    pub fn new(input: Array1<f32>, target: Array1<f32>) -> Self {
        Self { input, target }
    }

    /// Creates a classification sample with a one-hot target.
    ///
    /// # Parameters
    ///
    /// - `input` - Input vector
    /// - `class` - Class index, must be below `n_classes`
    /// - `n_classes` - Width of the one-hot target
    ///
    /// # Returns
    ///
    /// - `Ok(Sample)` - The sample
    /// - `Err(ModelError::InputValidationError)` - If `class >= n_classes`
    pub fn from_class(
        input: Array1<f32>,
        class: usize,
        n_classes: usize,
    ) -> Result<Self, ModelError> {
        Ok(Self {
            input,
            target: one_hot(class, n_classes)?,
        })
    }

    /// Gets the input vector.
    pub fn input(&self) -> ArrayView1<'_, f32> {
        self.input.view()
    }

    /// Gets the target vector.
    pub fn target(&self) -> ArrayView1<'_, f32> {
        self.target.view()
    }
}

/// Encodes a class index as a one-hot vector.
///
/// # Returns
///
/// - `Ok(Array1<f32>)` - A vector of `n_classes` zeros with a single 1 at `class`
/// - `Err(ModelError::InputValidationError)` - If `class` is out of range
pub fn one_hot(class: usize, n_classes: usize) -> Result<Array1<f32>, ModelError> {
    if class >= n_classes {
        return Err(ModelError::InputValidationError(format!(
            "Class index {} is out of range for {} classes",
            class, n_classes
        )));
    }
    let mut target = Array1::zeros(n_classes);
    target[class] = 1.0;
    Ok(target)
}

/// Decodes a one-hot target back into its class index by locating its nonzero entry.
///
/// # Returns
///
/// - `Ok(usize)` - Index of the first nonzero entry
/// - `Err(ModelError::InputValidationError)` - If every entry is zero
pub fn decode_class(target: ArrayView1<f32>) -> Result<usize, ModelError> {
    target.iter().position(|&v| v != 0.0).ok_or_else(|| {
        ModelError::InputValidationError(
            "Classification target has no nonzero entry".to_string(),
        )
    })
}

/// An ordered collection of samples.
///
/// The content of each sample never changes once it is in a dataset; only the order can,
/// through [`Dataset::shuffle`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    samples: Vec<Sample>,
}

impl Dataset {
    /// Creates a dataset from samples, keeping their order.
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    /// Creates a classification dataset from inputs and integer labels.
    ///
    /// Labels are shifted down by `category_shift` before one-hot encoding, so a dataset whose
    /// classes are numbered `1..=n` is loaded with `category_shift = 1`.
    ///
    /// # Parameters
    ///
    /// - `inputs` - Input vectors
    /// - `labels` - One label per input
    /// - `n_classes` - Number of classes (width of the output layer)
    /// - `category_shift` - Value of the smallest label
    ///
    /// # Returns
    ///
    /// - `Ok(Dataset)` - The dataset, in input order
    /// - `Err(ModelError)` - If the lengths differ or a label falls outside `[shift, shift + n_classes)`
    pub fn from_labels(
        inputs: Vec<Array1<f32>>,
        labels: &[usize],
        n_classes: usize,
        category_shift: usize,
    ) -> Result<Self, ModelError> {
        if inputs.len() != labels.len() {
            return Err(ModelError::DimensionMismatch {
                context: "label count",
                expected: inputs.len(),
                actual: labels.len(),
            });
        }

        let samples = inputs
            .into_iter()
            .zip(labels.iter())
            .map(|(input, &label)| {
                let class = label.checked_sub(category_shift).ok_or_else(|| {
                    ModelError::InputValidationError(format!(
                        "Label {} is below the category shift {}",
                        label, category_shift
                    ))
                })?;
                Sample::from_class(input, class, n_classes)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { samples })
    }

    /// Creates a dataset from two matrices whose rows are paired up.
    ///
    /// # Parameters
    ///
    /// - `x` - Inputs, one sample per row
    /// - `y` - Targets, one sample per row
    ///
    /// # Returns
    ///
    /// - `Ok(Dataset)` - The dataset, in row order
    /// - `Err(ModelError::DimensionMismatch)` - If the row counts differ
    pub fn from_arrays(x: ArrayView2<f32>, y: ArrayView2<f32>) -> Result<Self, ModelError> {
        if x.nrows() != y.nrows() {
            return Err(ModelError::DimensionMismatch {
                context: "target row count",
                expected: x.nrows(),
                actual: y.nrows(),
            });
        }

        Ok(x.outer_iter()
            .zip(y.outer_iter())
            .map(|(input, target)| Sample::new(input.to_owned(), target.to_owned()))
            .collect())
    }

    /// Appends a sample.
    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the dataset holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Gets the sample at `index`.
    pub fn get(&self, index: usize) -> Option<&Sample> {
        self.samples.get(index)
    }

    /// Gets all samples in their current order.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Iterates over the samples in their current order.
    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    /// Reorders the samples randomly.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.samples.shuffle(rng);
    }

    /// Checks that every sample fits a network with the given input and output widths.
    ///
    /// # Returns
    ///
    /// - `Ok(())` - If every input and target has the right length
    /// - `Err(ModelError::DimensionMismatch)` - For the first sample that does not
    pub fn validate_for(&self, input_width: usize, output_width: usize) -> Result<(), ModelError> {
        for sample in &self.samples {
            if sample.input.len() != input_width {
                return Err(ModelError::DimensionMismatch {
                    context: "sample input width",
                    expected: input_width,
                    actual: sample.input.len(),
                });
            }
            if sample.target.len() != output_width {
                return Err(ModelError::DimensionMismatch {
                    context: "sample target width",
                    expected: output_width,
                    actual: sample.target.len(),
                });
            }
        }
        Ok(())
    }
}

impl FromIterator<Sample> for Dataset {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
