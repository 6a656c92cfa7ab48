use std::fs::File;
use std::io::BufReader;

/// Error types that can occur while building, training or evaluating a network
///
/// # Variants
///
/// - `InputValidationError` - The configuration or the data handed in does not meet the expected rules (too few layers, zero widths, non-positive learning rate, malformed one-hot target, ...)
/// - `DimensionMismatch` - A vector or matrix does not have the width required at that point (input width, target width, weight matrix shape, trace shape)
/// - `UnknownSelector` - A named activation, output function, loss or problem type is not registered
/// - `ProcessingError` - Something went wrong while processing, e.g. a stale forward trace was handed to backpropagation
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    InputValidationError(String),
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },
    UnknownSelector {
        kind: &'static str,
        name: String,
    },
    ProcessingError(String),
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::InputValidationError(msg) => write!(f, "Input validation error: {}", msg),
            ModelError::DimensionMismatch {
                context,
                expected,
                actual,
            } => write!(
                f,
                "Dimension mismatch in {}: expected {}, got {}",
                context, expected, actual
            ),
            ModelError::UnknownSelector { kind, name } => {
                write!(f, "Unknown {} \"{}\"", kind, name)
            }
            ModelError::ProcessingError(msg) => write!(f, "Processing error: {}", msg),
        }
    }
}

/// Implements the standard error trait for ModelError
impl std::error::Error for ModelError {}

/// Input/Output error types that can occur while reading configuration files or writing metric logs
///
/// # Variants
///
/// - `StdIoError` - Wraps standard I/O errors from file system operations
/// - `JsonError` - Wraps JSON deserialization errors when reading a configuration file
/// - `Model` - The file was read fine but its content is not a valid configuration
#[derive(Debug)]
pub enum IoError {
    StdIoError(std::io::Error),
    JsonError(serde_json::Error),
    Model(ModelError),
}

impl IoError {
    pub fn load_in_buf_reader(path: &str) -> Result<BufReader<File>, IoError> {
        let file = File::open(path).map_err(IoError::StdIoError)?;
        Ok(BufReader::new(file))
    }
}

impl std::fmt::Display for IoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IoError::StdIoError(e) => write!(f, "IO error: {}", e),
            IoError::JsonError(e) => write!(f, "JSON error: {}", e),
            IoError::Model(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for IoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IoError::StdIoError(e) => Some(e),
            IoError::JsonError(e) => Some(e),
            IoError::Model(e) => Some(e),
        }
    }
}

impl From<ModelError> for IoError {
    fn from(e: ModelError) -> Self {
        IoError::Model(e)
    }
}

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::StdIoError(e)
    }
}
