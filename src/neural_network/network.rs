use super::helper_functions::{check_width, outer};
use super::parameters::{Gradients, Parameters};
use super::progress::{ProgressReporter, validate_cadence};
use super::{Evaluation, ForwardTrace, NetworkConfig, Prediction, ProblemType, SGD};
use crate::dataset::{Dataset, Sample, decode_class};
use crate::error::ModelError;
use crate::metric::{accuracy, r2_score};
use crate::traits::LossFunction;
use ndarray::{Array1, ArrayView1};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{info, warn};

/// Source of network identities; every network and every clone gets a fresh one.
static NEXT_NETWORK_ID: AtomicU64 = AtomicU64::new(0);

fn next_network_id() -> u64 {
    NEXT_NETWORK_ID.fetch_add(1, Ordering::Relaxed)
}

/// A fully-connected feed-forward network trained one sample at a time with hand-written
/// backpropagation and plain SGD.
///
/// The network exclusively owns its [`Parameters`]; they only change through
/// [`Network::apply_gradients`] (reached from `backpropagate`, `train_sample` and `train`).
/// Forward propagation, prediction and evaluation never mutate anything.
///
/// Every network carries its own identity (a clone gets a new one), and every forward trace
/// remembers the identity and parameter generation it was produced against, so
/// backpropagation only accepts traces from this network's current parameters.
///
/// # Example
/// ```rust
/// use backprop_mlp::prelude::*;
/// use ndarray::array;
///
/// let config = NetworkConfig::new(vec![2, 4, 1])
///     .with_activation(Activation::Tanh)
///     .with_learning_rate(0.05)
///     .with_seed(3);
/// let mut network = Network::new(&config).unwrap();
///
/// let dataset = Dataset::new(vec![
///     Sample::new(array![0.0, 1.0], array![1.0]),
///     Sample::new(array![1.0, 0.0], array![-1.0]),
/// ]);
///
/// network.train(&dataset, None).unwrap();
/// let evaluation = network.test(&dataset, None).unwrap();
/// assert_eq!(evaluation.predictions.len(), 2);
/// ```
pub struct Network {
    config: NetworkConfig,
    parameters: Parameters,
    optimizer: SGD,
    loss: Box<dyn LossFunction + Send + Sync>,
    id: u64,
    generation: u64,
}

impl Network {
    /// Builds a network with freshly initialised parameters.
    ///
    /// # Parameters
    ///
    /// * `config` - Layer widths, functions, problem type, learning rate, seed and bias flag
    ///
    /// # Returns
    ///
    /// - `Ok(Network)` - The network
    /// - `Err(ModelError::InputValidationError)` - If the configuration is invalid (fewer than two layers, a zero width, bad learning rate, zero epochs)
    pub fn new(config: &NetworkConfig) -> Result<Self, ModelError> {
        config.validate()?;
        let parameters = Parameters::initialize(&config.layers, config.bias, config.seed)?;
        Self::assemble(config, parameters)
    }

    /// Builds a network around parameters supplied by the caller.
    ///
    /// # Parameters
    ///
    /// - `config` - Network configuration; its `layers` and `bias` must describe `parameters`
    /// - `parameters` - Parameters to start from
    ///
    /// # Returns
    ///
    /// - `Ok(Network)` - The network
    /// - `Err(ModelError)` - If the configuration is invalid or does not match the parameter shapes
    pub fn from_parameters(
        config: &NetworkConfig,
        parameters: Parameters,
    ) -> Result<Self, ModelError> {
        config.validate()?;

        let widths = parameters.layer_widths();
        if widths.len() != config.layers.len() {
            return Err(ModelError::DimensionMismatch {
                context: "layer count",
                expected: config.layers.len(),
                actual: widths.len(),
            });
        }
        for (&expected, &actual) in config.layers.iter().zip(widths.iter()) {
            if expected != actual {
                return Err(ModelError::DimensionMismatch {
                    context: "layer width",
                    expected,
                    actual,
                });
            }
        }
        if parameters.has_bias() != config.bias {
            return Err(ModelError::InputValidationError(format!(
                "Configuration has bias = {} but the parameters {} bias vectors",
                config.bias,
                if parameters.has_bias() {
                    "carry"
                } else {
                    "carry no"
                }
            )));
        }

        Self::assemble(config, parameters)
    }

    fn assemble(config: &NetworkConfig, parameters: Parameters) -> Result<Self, ModelError> {
        Ok(Self {
            config: config.clone(),
            parameters,
            optimizer: SGD::new(config.learning_rate)?,
            loss: config.loss.build(),
            id: next_network_id(),
            generation: 0,
        })
    }

    /// Gets the configuration the network was built from.
    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Gets the current parameters.
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Gets the problem type.
    pub fn problem_type(&self) -> ProblemType {
        self.config.problem_type
    }

    /// Width of the input layer.
    pub fn input_width(&self) -> usize {
        self.config.layers[0]
    }

    /// Width of the output layer.
    pub fn output_width(&self) -> usize {
        self.config.layers[self.config.layers.len() - 1]
    }

    /// Number of parameter updates applied so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Propagates one input through the network.
    ///
    /// For every weight matrix `i`: `z_i = output_i · W_i (+ b_i)`, then the hidden
    /// activation is applied, except on the final layer, where the problem type decides
    /// (hidden activation for classification, output function for regression).
    ///
    /// # Parameters
    ///
    /// * `input` - Input vector, as wide as the input layer
    ///
    /// # Returns
    ///
    /// - `Ok(ForwardTrace)` - Pre-activations and outputs of every layer
    /// - `Err(ModelError::DimensionMismatch)` - If the input has the wrong width
    pub fn forward(&self, input: ArrayView1<f32>) -> Result<ForwardTrace, ModelError> {
        check_width("network input", self.input_width(), input)?;

        let weights = self.parameters.weights();
        let biases = self.parameters.biases();
        let last = weights.len() - 1;

        let mut pre_activations = Vec::with_capacity(weights.len());
        let mut outputs = Vec::with_capacity(weights.len() + 1);
        outputs.push(input.to_owned());

        for (i, w) in weights.iter().enumerate() {
            let mut z = outputs[i].dot(w);
            if let Some(biases) = biases {
                z += &biases[i];
            }

            let a = if i == last {
                self.config.problem_type.final_activation(
                    z.view(),
                    self.config.activation,
                    self.config.output_function,
                )
            } else {
                self.config.activation.apply(z.view())
            };

            pre_activations.push(z);
            outputs.push(a);
        }

        Ok(ForwardTrace {
            pre_activations,
            outputs,
            network_id: self.id,
            generation: self.generation,
        })
    }

    /// Computes the gradients of every parameter for one forward trace, without applying them.
    ///
    /// The chain starts from `output - target` (no derivative of the final stage). For the
    /// last weight matrix the gradient is `outer(output_{L-1}, delta)`. Walking back, the delta
    /// becomes `(W_{i+1} · delta) ⊙ f'(z_i)` with `f'` the hidden activation's derivative at the
    /// stored pre-activation, and the gradient of `W_i` is `outer(output_i, delta)`. Bias
    /// gradients equal the delta of their layer.
    ///
    /// # Parameters
    ///
    /// - `trace` - Trace from [`Network::forward`] on the current parameters
    /// - `target` - Target of the sample that produced the trace
    ///
    /// # Returns
    ///
    /// - `Ok(Gradients)` - Gradients shaped like the parameters
    /// - `Err(ModelError::DimensionMismatch)` - If the target or the trace does not fit the network
    /// - `Err(ModelError::ProcessingError)` - If the trace was produced by another network, or by this one before its last parameter update
    pub fn compute_gradients(
        &self,
        trace: &ForwardTrace,
        target: ArrayView1<f32>,
    ) -> Result<Gradients, ModelError> {
        self.check_trace(trace)?;
        check_width("backpropagation target", self.output_width(), target)?;

        let weights = self.parameters.weights();
        let n = weights.len();
        let outputs = &trace.outputs;
        let pre_activations = &trace.pre_activations;

        let mut weight_grads = Vec::with_capacity(n);
        let mut bias_grads = Vec::with_capacity(n);

        let mut delta = self
            .config
            .problem_type
            .output_delta(outputs[n].view(), target);
        weight_grads.push(outer(outputs[n - 1].view(), delta.view()));
        bias_grads.push(delta.clone());

        for i in (0..n - 1).rev() {
            let propagated = weights[i + 1].dot(&delta);
            delta = propagated * self.config.activation.derivative(pre_activations[i].view());
            weight_grads.push(outer(outputs[i].view(), delta.view()));
            bias_grads.push(delta.clone());
        }

        // collected from the output backwards
        weight_grads.reverse();
        bias_grads.reverse();

        Ok(Gradients {
            weights: weight_grads,
            biases: self.parameters.has_bias().then_some(bias_grads),
        })
    }

    /// Applies gradients with the SGD rule and invalidates all earlier forward traces.
    ///
    /// # Returns
    ///
    /// - `Ok(())` - If the gradients matched the parameter shapes
    /// - `Err(ModelError::DimensionMismatch)` - Otherwise; the parameters are left unchanged
    pub fn apply_gradients(&mut self, gradients: &Gradients) -> Result<(), ModelError> {
        self.optimizer
            .update_parameters(&mut self.parameters, gradients)?;
        self.generation += 1;
        Ok(())
    }

    /// Runs one backpropagation step: computes all gradients for the trace, then updates
    /// every layer.
    ///
    /// # Parameters
    ///
    /// - `trace` - Trace from [`Network::forward`] on the current parameters
    /// - `target` - Target of the sample that produced the trace
    ///
    /// # Returns
    ///
    /// - `Ok(())` - If the parameters were updated
    /// - `Err(ModelError)` - If the target width is wrong or the trace does not belong to the current parameters; nothing is updated
    pub fn backpropagate(
        &mut self,
        trace: &ForwardTrace,
        target: ArrayView1<f32>,
    ) -> Result<(), ModelError> {
        let gradients = self.compute_gradients(trace, target)?;
        self.apply_gradients(&gradients)
    }

    /// Forward propagation followed by backpropagation on one sample.
    pub fn train_sample(&mut self, sample: &Sample) -> Result<(), ModelError> {
        let trace = self.forward(sample.input())?;
        self.backpropagate(&trace, sample.target())
    }

    /// Trains on every sample of the dataset, in the dataset's order, for the configured
    /// number of epochs.
    ///
    /// Every sample is checked against the layer widths before any update happens. An empty
    /// dataset is not an error: nothing is trained and a warning is logged.
    ///
    /// # Parameters
    ///
    /// - `dataset` - Training samples
    /// - `report_percentage` - Report progress every this many percent (1 to 100), or `None` for silence
    ///
    /// # Returns
    ///
    /// - `Ok(())` - When training finished
    /// - `Err(ModelError)` - If a sample does not fit the network or the cadence is invalid
    pub fn train(
        &mut self,
        dataset: &Dataset,
        report_percentage: Option<u32>,
    ) -> Result<(), ModelError> {
        validate_cadence(report_percentage)?;
        dataset.validate_for(self.input_width(), self.output_width())?;

        if dataset.is_empty() {
            warn!("training called with an empty dataset, parameters left unchanged");
            return Ok(());
        }

        let total = (self.config.epochs * dataset.len()) as u64;
        let mut progress = ProgressReporter::new("training", total, report_percentage);
        let mut done = 0u64;

        for _ in 0..self.config.epochs {
            for sample in dataset {
                self.train_sample(sample)?;
                done += 1;
                progress.advance(done);
            }
        }

        progress.finish();
        Ok(())
    }

    /// Predicts one input.
    ///
    /// # Returns
    ///
    /// - `Ok(Prediction::Class)` - For classification: index of the largest value after the output function
    /// - `Ok(Prediction::Values)` - For regression: the final-layer output
    /// - `Err(ModelError::DimensionMismatch)` - If the input has the wrong width
    pub fn predict(&self, input: ArrayView1<f32>) -> Result<Prediction, ModelError> {
        let trace = self.forward(input)?;
        Ok(self
            .config
            .problem_type
            .predict(trace.output().view(), self.config.output_function))
    }

    /// The user-facing output vector for one input: class scores after the output function
    /// for classification, the final-layer output for regression.
    pub fn output_scores(&self, input: ArrayView1<f32>) -> Result<Array1<f32>, ModelError> {
        let trace = self.forward(input)?;
        Ok(self
            .config
            .problem_type
            .present(trace.output().view(), self.config.output_function))
    }

    /// Evaluates the network on a dataset without changing it.
    ///
    /// Classification targets are decoded by locating their nonzero entry and compared with
    /// the predicted class; the score is the fraction of matches. Regression scores are the
    /// R² over all output coordinates. The loss is the configured loss averaged over samples,
    /// computed on the user-facing outputs.
    ///
    /// # Parameters
    ///
    /// - `dataset` - Samples to evaluate
    /// - `report_percentage` - Report progress every this many percent (1 to 100), or `None` for silence
    ///
    /// # Returns
    ///
    /// - `Ok(Evaluation)` - Score, loss and one prediction per sample in dataset order (empty dataset: `Evaluation::empty()`)
    /// - `Err(ModelError)` - If a sample does not fit the network, a classification target is all zeros, or the cadence is invalid
    pub fn test(
        &self,
        dataset: &Dataset,
        report_percentage: Option<u32>,
    ) -> Result<Evaluation, ModelError> {
        validate_cadence(report_percentage)?;
        dataset.validate_for(self.input_width(), self.output_width())?;

        if dataset.is_empty() {
            warn!("test called with an empty dataset, no score computed");
            return Ok(Evaluation::empty());
        }

        let problem_type = self.config.problem_type;
        let output_function = self.config.output_function;
        let mut progress = ProgressReporter::new("test", dataset.len() as u64, report_percentage);

        let mut predictions = Vec::with_capacity(dataset.len());
        let mut loss_sum = 0.0f32;
        let mut predicted_classes = Vec::new();
        let mut actual_classes = Vec::new();
        let mut predicted_values = Vec::new();
        let mut actual_values = Vec::new();

        for (i, sample) in dataset.iter().enumerate() {
            let trace = self.forward(sample.input())?;
            let raw = trace.output().view();

            let presented = problem_type.present(raw, output_function);
            loss_sum += self.loss.compute_loss(sample.target(), presented.view());

            let prediction = problem_type.predict(raw, output_function);
            match &prediction {
                Prediction::Class(class) => {
                    predicted_classes.push(*class);
                    actual_classes.push(decode_class(sample.target())?);
                }
                Prediction::Values(values) => {
                    predicted_values.extend(values.iter().copied());
                    actual_values.extend(sample.target().iter().copied());
                }
            }
            predictions.push(prediction);
            progress.advance(i as u64 + 1);
        }
        progress.finish();

        let score = match problem_type {
            ProblemType::Classification => accuracy(&predicted_classes, &actual_classes),
            ProblemType::Regression => r2_score(&predicted_values, &actual_values),
        };

        Ok(Evaluation {
            score,
            loss: Some(loss_sum / dataset.len() as f32),
            predictions,
        })
    }

    /// Prints a summary of the network's structure
    ///
    /// Displays each layer's width and parameter count in a tabular format
    pub fn summary(&self) {
        let col1_width = 33;
        let col2_width = 24;
        let col3_width = 15;
        println!(
            "Network: \"{}\" ({} activation, {} output, {} loss)",
            self.config.problem_type,
            self.config.activation,
            self.config.output_function,
            self.loss.name()
        );
        println!(
            "┏{}┳{}┳{}┓",
            "━".repeat(col1_width),
            "━".repeat(col2_width),
            "━".repeat(col3_width)
        );
        println!(
            "┃ {:<31} ┃ {:<22} ┃ {:>13} ┃",
            "Layer (type)", "Output Shape", "Param #"
        );
        println!(
            "┡{}╇{}╇{}┩",
            "━".repeat(col1_width),
            "━".repeat(col2_width),
            "━".repeat(col3_width)
        );
        println!(
            "│ {:<31} │ {:<22} │ {:>13} │",
            "Layer_0 (Input)",
            format!("({})", self.input_width()),
            0
        );

        let last = self.config.layers.len() - 1;
        for i in 1..=last {
            let kind = if i == last { "Output" } else { "Dense" };
            println!(
                "│ {:<31} │ {:<22} │ {:>13} │",
                format!("Layer_{} ({})", i, kind),
                format!("({})", self.config.layers[i]),
                self.parameters.layer_param_count(i - 1).unwrap_or(0)
            );
        }
        println!(
            "└{}┴{}┴{}┘",
            "─".repeat(col1_width),
            "─".repeat(col2_width),
            "─".repeat(col3_width)
        );
        let total_params = self.parameters.param_count();
        println!(" Total params: {} ({} B)", total_params, total_params * 4); // f32, 4 bytes each
        info!(
            layers = ?self.config.layers,
            params = total_params,
            "network summary printed"
        );
    }

    fn check_trace(&self, trace: &ForwardTrace) -> Result<(), ModelError> {
        if trace.network_id != self.id {
            return Err(ModelError::ProcessingError(
                "Forward trace was produced by a different network".to_string(),
            ));
        }

        if trace.generation != self.generation {
            return Err(ModelError::ProcessingError(format!(
                "Forward trace was computed against parameter generation {}, current generation is {}",
                trace.generation, self.generation
            )));
        }

        if trace.outputs.len() != self.config.layers.len()
            || trace.pre_activations.len() + 1 != self.config.layers.len()
        {
            return Err(ModelError::DimensionMismatch {
                context: "forward trace layer count",
                expected: self.config.layers.len(),
                actual: trace.outputs.len(),
            });
        }

        for (output, &width) in trace.outputs.iter().zip(self.config.layers.iter()) {
            check_width("forward trace output", width, output.view())?;
        }
        for (z, &width) in trace
            .pre_activations
            .iter()
            .zip(self.config.layers.iter().skip(1))
        {
            check_width("forward trace pre-activation", width, z.view())?;
        }

        Ok(())
    }
}

impl Clone for Network {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            parameters: self.parameters.clone(),
            optimizer: self.optimizer,
            loss: self.config.loss.build(),
            id: next_network_id(),
            generation: self.generation,
        }
    }
}

impl std::fmt::Debug for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Network")
            .field("config", &self.config)
            .field("param_count", &self.parameters.param_count())
            .field("generation", &self.generation)
            .finish()
    }
}
