/// Module that contains the run configuration
pub mod config;
/// Module that contains the epoch loop and parallel multi-seed runs
pub mod driver;
/// Module that contains the metric sinks
pub mod metric_sink;

pub use config::*;
pub use driver::*;
pub use metric_sink::*;

pub use crate::traits::MetricSink;
