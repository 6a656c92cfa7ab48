//! Small fully-connected feed-forward neural networks (multilayer perceptrons) trained from
//! scratch with hand-written forward propagation and backpropagation, for classification and
//! regression.

/// Error types shared by every module.
pub mod error;

/// Module `dataset` contains the sample and dataset types the network trains and evaluates on.
///
/// A [`Sample`](dataset::Sample) pairs an input vector with a target vector; classification
/// targets are one-hot vectors, built from class indices with
/// [`Sample::from_class`](dataset::Sample::from_class) or
/// [`Dataset::from_labels`](dataset::Dataset::from_labels) (which also handles labels that do
/// not start at zero).
///
/// # Examples
/// ```rust
/// use backprop_mlp::dataset::{Dataset, decode_class};
/// use ndarray::array;
///
/// let dataset = Dataset::from_labels(
///     vec![array![0.1, 0.2], array![0.9, 0.8]],
///     &[1, 2],
///     2,
///     1,
/// )
/// .unwrap();
///
/// assert_eq!(decode_class(dataset.samples()[1].target()).unwrap(), 1);
/// ```
pub mod dataset;

/// Module `metric` contains the scores the network reports.
///
/// - **accuracy**: fraction of matching class indices
/// - **r2_score**: coefficient of determination for regression outputs
pub mod metric;

/// Components for building, training and evaluating multilayer perceptrons.
///
/// # Core Components
///
/// ## Function registries
/// - **Activation**: hidden-layer nonlinearity (Identity, Sigmoid, Tanh, ReLU) with derivatives
/// - **OutputFunction**: final-stage transform (Identity, Softmax, Sigmoid, Tanh)
/// - **LossKind**: reporting losses (MeanSquaredError, CrossEntropy)
/// - **ProblemType**: classification or regression output strategy
///
/// ## Network
/// - **NetworkConfig**: layer widths, functions, learning rate, seed, bias flag
/// - **Parameters**: weight matrices and optional bias vectors, seeded fan-in scaled initialisation
/// - **Network**: forward propagation, backpropagation, train, predict, test
/// - **ForwardTrace**: per-sample record consumed by backpropagation
///
/// # Examples
/// ```rust
/// use backprop_mlp::neural_network::*;
/// use ndarray::array;
///
/// let config = NetworkConfig::new(vec![2, 3, 2])
///     .with_problem_type(ProblemType::Classification)
///     .with_activation(Activation::Sigmoid)
///     .with_output_function(OutputFunction::Softmax)
///     .with_seed(5);
/// let mut network = Network::new(&config).unwrap();
///
/// let trace = network.forward(array![1.0, 0.0].view()).unwrap();
/// network.backpropagate(&trace, array![0.0, 1.0].view()).unwrap();
///
/// let prediction = network.predict(array![1.0, 0.0].view()).unwrap();
/// assert!(prediction.class().unwrap() < 2);
/// ```
pub mod neural_network;

/// A convenience module that re-exports the most commonly used types and traits from this crate.
pub mod prelude;

/// Traits at the seams of the crate: loss functions and metric sinks.
pub mod traits;

/// The epoch loop around a network: shuffling, train/test cycles, best-score tracking and
/// metric sinks.
///
/// # Examples
/// ```rust
/// use backprop_mlp::prelude::*;
/// use ndarray::array;
///
/// let network = NetworkConfig::new(vec![1, 1])
///     .with_activation(Activation::Identity)
///     .with_learning_rate(0.1)
///     .with_seed(1);
/// let config = TrainingConfig::new(network)
///     .with_epochs(3)
///     .with_shuffle(ShuffleMode::Never);
///
/// let mut train = Dataset::new(vec![Sample::new(array![1.0], array![2.0])]);
/// let test = Dataset::new(vec![
///     Sample::new(array![1.0], array![2.0]),
///     Sample::new(array![2.0], array![4.0]),
/// ]);
///
/// let mut sink = DelimitedSink::new(Vec::new());
/// let mut driver = TrainingDriver::new(config).unwrap();
/// driver.run(&mut train, &test, &mut sink).unwrap();
///
/// let log = String::from_utf8(sink.into_inner()).unwrap();
/// assert!(log.contains("Epoch;Score;Best;BestEpoch"));
/// ```
pub mod training;
