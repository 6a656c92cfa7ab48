pub use crate::dataset::{Dataset, Sample, decode_class, one_hot};
pub use crate::error::{IoError, ModelError};
pub use crate::neural_network::{
    Activation, Evaluation, ForwardTrace, Gradients, LossKind, Network, NetworkConfig,
    OutputFunction, Parameters, PlotSeries, Prediction, ProblemType,
};
pub use crate::training::{
    DelimitedSink, EpochRecord, JsonLinesSink, MemorySink, ShuffleMode, TracingSink,
    TrainingConfig, TrainingDriver, TrainingSummary, run_seeds,
};
pub use crate::traits::{LossFunction, MetricSink};
