use super::{MemorySink, ShuffleMode, TrainingConfig};
use crate::dataset::Dataset;
use crate::error::{IoError, ModelError};
use crate::neural_network::{Evaluation, Network};
use crate::traits::MetricSink;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Metrics of one epoch, as handed to a [`MetricSink`].
///
/// # Fields
///
/// - `epoch` - Epoch number, starting at 1
/// - `score` - Test score of this epoch (`None` if the test set was empty or the score undefined)
/// - `best_score` - Best score seen so far, including this epoch
/// - `best_epoch` - Epoch at which `best_score` was reached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochRecord {
    pub epoch: usize,
    pub score: Option<f32>,
    pub best_score: Option<f32>,
    pub best_epoch: Option<usize>,
}

/// Outcome of a complete run.
///
/// # Fields
///
/// - `records` - One record per epoch, in order
/// - `best_score` - Best test score over the run
/// - `best_epoch` - Epoch at which the best score was reached
/// - `last_evaluation` - Test evaluation of the final epoch, with its predictions in test-set order
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSummary {
    pub records: Vec<EpochRecord>,
    pub best_score: Option<f32>,
    pub best_epoch: Option<usize>,
    pub last_evaluation: Option<Evaluation>,
}

/// Tracks the best score over epochs. Only a strictly greater, non-NaN score replaces
/// the current best, so the earliest epoch wins ties.
#[derive(Debug, Clone, Copy, Default)]
struct BestScore {
    score: Option<f32>,
    epoch: Option<usize>,
}

impl BestScore {
    fn update(&mut self, epoch: usize, score: Option<f32>) -> EpochRecord {
        if let Some(s) = score {
            let improves = match self.score {
                _ if s.is_nan() => false,
                None => true,
                Some(best) => s > best,
            };
            if improves {
                self.score = Some(s);
                self.epoch = Some(epoch);
            }
        }

        EpochRecord {
            epoch,
            score,
            best_score: self.score,
            best_epoch: self.epoch,
        }
    }
}

/// Runs repeated train/test cycles over a network and reports one [`EpochRecord`] per epoch.
///
/// The driver owns the network and a shuffle generator seeded from the network seed, so two
/// drivers built from the same configuration and fed the same data produce the same records.
///
/// # Example
/// ```rust
/// use backprop_mlp::prelude::*;
/// use ndarray::array;
///
/// let network = NetworkConfig::new(vec![1, 4, 1]).with_learning_rate(0.05).with_seed(11);
/// let config = TrainingConfig::new(network).with_epochs(5);
///
/// let mut train = Dataset::new(vec![
///     Sample::new(array![0.0], array![0.0]),
///     Sample::new(array![0.5], array![0.25]),
///     Sample::new(array![1.0], array![1.0]),
/// ]);
/// let test = train.clone();
///
/// let mut driver = TrainingDriver::new(config).unwrap();
/// let mut sink = MemorySink::new();
/// let summary = driver.run(&mut train, &test, &mut sink).unwrap();
///
/// assert_eq!(summary.records.len(), 5);
/// assert_eq!(sink.records().len(), 5);
/// ```
#[derive(Debug)]
pub struct TrainingDriver {
    config: TrainingConfig,
    network: Network,
    rng: StdRng,
}

impl TrainingDriver {
    /// Validates the configuration and builds a freshly initialised network.
    ///
    /// # Returns
    ///
    /// - `Ok(TrainingDriver)` - The driver
    /// - `Err(ModelError)` - If the configuration is invalid
    pub fn new(config: TrainingConfig) -> Result<Self, ModelError> {
        config.validate()?;
        let network = Network::new(&config.network)?;
        Ok(Self::assemble(config, network))
    }

    /// Builds a driver around an existing network, e.g. one created with fixed parameters.
    ///
    /// The network's own configuration replaces `config.network`.
    pub fn with_network(mut config: TrainingConfig, network: Network) -> Result<Self, ModelError> {
        config.network = network.config().clone();
        config.validate()?;
        Ok(Self::assemble(config, network))
    }

    fn assemble(config: TrainingConfig, network: Network) -> Self {
        let rng = StdRng::seed_from_u64(config.network.seed);
        Self {
            config,
            network,
            rng,
        }
    }

    /// Gets the run configuration.
    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Gets the network being trained.
    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Gives up the driver and returns the trained network.
    pub fn into_network(self) -> Network {
        self.network
    }

    /// Runs all configured epochs.
    ///
    /// Each epoch optionally shuffles the training set, trains on it, evaluates on the test
    /// set, updates the best score and hands the record to `sink`. The sink receives the
    /// configuration header before the first epoch.
    ///
    /// # Parameters
    ///
    /// - `train` - Training set; its order may be shuffled, its samples are never modified
    /// - `test` - Test set, evaluated after every epoch
    /// - `sink` - Receiver of the header and the per-epoch records
    ///
    /// # Returns
    ///
    /// - `Ok(TrainingSummary)` - All records, the best score and the last evaluation
    /// - `Err(IoError::Model)` - If a dataset does not fit the network
    /// - `Err(IoError::StdIoError)` - If the sink failed to write
    pub fn run(
        &mut self,
        train: &mut Dataset,
        test: &Dataset,
        sink: &mut dyn MetricSink,
    ) -> Result<TrainingSummary, IoError> {
        let input_width = self.network.input_width();
        let output_width = self.network.output_width();
        train.validate_for(input_width, output_width)?;
        test.validate_for(input_width, output_width)?;

        sink.write_header(&self.config)?;

        info!(
            epochs = self.config.epochs,
            train_samples = train.len(),
            test_samples = test.len(),
            seed = self.config.network.seed,
            "training run started"
        );

        if self.config.shuffle == ShuffleMode::Once {
            train.shuffle(&mut self.rng);
        }

        let report = self.config.report_percentage;
        let mut best = BestScore::default();
        let mut records = Vec::with_capacity(self.config.epochs);
        let mut last_evaluation = None;

        for epoch in 1..=self.config.epochs {
            if self.config.shuffle == ShuffleMode::EveryEpoch {
                train.shuffle(&mut self.rng);
            }

            self.network.train(train, report)?;
            let evaluation = self.network.test(test, report)?;

            let record = best.update(epoch, evaluation.score);
            info!(
                epoch,
                score = ?record.score,
                loss = ?evaluation.loss,
                best_score = ?record.best_score,
                best_epoch = ?record.best_epoch,
                "epoch finished"
            );
            sink.record(&record)?;
            records.push(record);
            last_evaluation = Some(evaluation);
        }

        info!(
            best_score = ?best.score,
            best_epoch = ?best.epoch,
            "training run finished"
        );

        Ok(TrainingSummary {
            records,
            best_score: best.score,
            best_epoch: best.epoch,
            last_evaluation,
        })
    }
}

/// Runs one independent training run per seed, in parallel.
///
/// Every run builds its own network from `config` with `network.seed` replaced by its seed,
/// works on its own copy of the training set and records into its own [`MemorySink`]; no
/// parameters are shared between runs.
///
/// # Parameters
///
/// - `config` - Base configuration
/// - `seeds` - One seed per run
/// - `train` - Training set, copied for every run
/// - `test` - Test set, shared read-only
///
/// # Returns
///
/// * `Vec<Result<TrainingSummary, IoError>>` - One result per seed, in the order of `seeds`
pub fn run_seeds(
    config: &TrainingConfig,
    seeds: &[u64],
    train: &Dataset,
    test: &Dataset,
) -> Vec<Result<TrainingSummary, IoError>> {
    seeds
        .par_iter()
        .map(|&seed| {
            let mut run_config = config.clone();
            run_config.network.seed = seed;

            let mut driver = TrainingDriver::new(run_config)?;
            let mut train = train.clone();
            let mut sink = MemorySink::new();
            driver.run(&mut train, test, &mut sink)
        })
        .collect()
}
