use crate::error::{IoError, ModelError};
use crate::neural_network::NetworkConfig;
use crate::neural_network::progress::validate_cadence;
use serde::{Deserialize, Serialize};

/// When the training driver reorders the training set
///
/// # Variants
///
/// - `Never` - Samples are used in the order they were given
/// - `Once` - Samples are shuffled once before the first epoch
/// - `EveryEpoch` - Samples are shuffled before every epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShuffleMode {
    Never,
    Once,
    #[default]
    EveryEpoch,
}

/// Complete configuration of one training run.
///
/// Missing fields fall back to [`TrainingConfig::default`] when deserializing, so a JSON file
/// only needs to name what differs:
///
/// ```rust
/// use backprop_mlp::training::{ShuffleMode, TrainingConfig};
///
/// let config = TrainingConfig::from_json_str(
///     r#"{
///         "network": { "layers": [2, 8, 3], "problem_type": "classification",
///                      "activation": "sigmoid", "output_function": "softmax" },
///         "epochs": 20,
///         "shuffle": "once"
///     }"#,
/// )
/// .unwrap();
///
/// assert_eq!(config.epochs, 20);
/// assert_eq!(config.shuffle, ShuffleMode::Once);
/// assert_eq!(config.network.layers, vec![2, 8, 3]);
/// ```
///
/// # Fields
///
/// - `network` - Configuration of the network being trained (layers, functions, learning rate, seed, bias)
/// - `epochs` - Number of train/test cycles the driver runs
/// - `shuffle` - When the training set is reordered; the shuffle generator is seeded from `network.seed`
/// - `report_percentage` - Progress reporting cadence in percent for train and test, `None` for silence
/// - `notes` - Extra free-form lines written into metric log headers (e.g. preprocessing applied to the data)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub network: NetworkConfig,
    pub epochs: usize,
    pub shuffle: ShuffleMode,
    pub report_percentage: Option<u32>,
    pub notes: Vec<String>,
}

impl Default for TrainingConfig {
    /// Default Values
    ///
    /// - `network` - `NetworkConfig::default()`
    /// - `epochs` - 1000
    /// - `shuffle` - EveryEpoch
    /// - `report_percentage` - None
    /// - `notes` - empty
    fn default() -> Self {
        Self {
            network: NetworkConfig::default(),
            epochs: 1000,
            shuffle: ShuffleMode::EveryEpoch,
            report_percentage: None,
            notes: Vec::new(),
        }
    }
}

impl TrainingConfig {
    /// Creates a configuration for the given network with default driver settings.
    pub fn new(network: NetworkConfig) -> Self {
        Self {
            network,
            ..Self::default()
        }
    }

    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    pub fn with_shuffle(mut self, shuffle: ShuffleMode) -> Self {
        self.shuffle = shuffle;
        self
    }

    pub fn with_report_percentage(mut self, report_percentage: Option<u32>) -> Self {
        self.report_percentage = report_percentage;
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Checks the configuration before a run starts.
    ///
    /// # Returns
    ///
    /// - `Ok(())` - If the network configuration, epoch count and reporting cadence are usable
    /// - `Err(ModelError::InputValidationError)` - Otherwise
    pub fn validate(&self) -> Result<(), ModelError> {
        self.network.validate()?;
        if self.epochs == 0 {
            return Err(ModelError::InputValidationError(
                "epochs must be at least 1".to_string(),
            ));
        }
        validate_cadence(self.report_percentage)
    }

    /// Parses and validates a configuration from JSON text.
    ///
    /// # Returns
    ///
    /// - `Ok(TrainingConfig)` - The configuration
    /// - `Err(IoError::JsonError)` - If the text is not valid JSON for this structure (including unknown selector names)
    /// - `Err(IoError::Model)` - If the parsed configuration fails validation
    pub fn from_json_str(json: &str) -> Result<Self, IoError> {
        let config: TrainingConfig = serde_json::from_str(json).map_err(IoError::JsonError)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a configuration from a JSON file.
    ///
    /// # Parameters
    ///
    /// * `path` - Path of the JSON file
    ///
    /// # Returns
    ///
    /// - `Ok(TrainingConfig)` - The configuration
    /// - `Err(IoError::StdIoError)` - If the file cannot be opened
    /// - `Err(IoError::JsonError)` - If the file is not valid JSON for this structure
    /// - `Err(IoError::Model)` - If the parsed configuration fails validation
    pub fn from_json_path(path: &str) -> Result<Self, IoError> {
        let reader = IoError::load_in_buf_reader(path)?;
        let config: TrainingConfig = serde_json::from_reader(reader).map_err(IoError::JsonError)?;
        config.validate()?;
        Ok(config)
    }

    /// Human-readable description of the run, one `Key: value` line each, as written at the
    /// top of a metric log.
    pub fn header_lines(&self) -> Vec<String> {
        let network = &self.network;
        let mut lines = vec![
            format!("Layers: {:?}", network.layers),
            format!("Seed: {}", network.seed),
            format!("Learning rate: {}", network.learning_rate),
            format!("Activation function: {}", network.activation),
            format!("Output function: {}", network.output_function),
            format!("Loss function: {}", network.loss),
            format!("Problem type: {}", network.problem_type),
            format!("Epochs: {}", self.epochs),
            format!("Bias: {}", network.bias),
        ];
        lines.extend(self.notes.iter().cloned());
        lines
    }
}
