use super::{EpochRecord, TrainingConfig};
use crate::error::IoError;
use crate::traits::MetricSink;
use std::fs::File;
use std::io::{BufWriter, Write};
use tracing::info;

/// Column names of the delimited metric log
const COLUMNS: [&str; 4] = ["Epoch", "Score", "Best", "BestEpoch"];

/// Keeps every record in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemorySink {
    records: Vec<EpochRecord>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the records received so far, in epoch order.
    pub fn records(&self) -> &[EpochRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<EpochRecord> {
        self.records
    }
}

impl MetricSink for MemorySink {
    fn record(&mut self, record: &EpochRecord) -> Result<(), IoError> {
        self.records.push(record.clone());
        Ok(())
    }
}

/// Writes records as delimiter-separated text, one line per epoch.
///
/// Unless disabled with [`DelimitedSink::without_header`], the run configuration is written
/// first as `Key: value` lines, followed by a column line. Missing values are written as `-`.
/// The writer is flushed after every record, so a log stays readable while a run is going.
///
/// ```text
/// Layers: [784, 512, 10]
/// Seed: 51
/// ...
/// Epoch;Score;Best;BestEpoch
/// 1;0.81;0.81;1
/// 2;0.79;0.81;1
/// ```
#[derive(Debug)]
pub struct DelimitedSink<W: Write> {
    writer: W,
    delimiter: char,
    header: bool,
}

impl DelimitedSink<BufWriter<File>> {
    /// Creates (or truncates) a log file at `path`.
    ///
    /// # Returns
    ///
    /// - `Ok(DelimitedSink)` - Sink writing to the file
    /// - `Err(IoError::StdIoError)` - If the file cannot be created
    pub fn create(path: &str) -> Result<Self, IoError> {
        let file = File::create(path).map_err(IoError::StdIoError)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> DelimitedSink<W> {
    /// Creates a sink over any writer, using `;` as delimiter.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            delimiter: ';',
            header: true,
        }
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Skips the configuration and column lines.
    pub fn without_header(mut self) -> Self {
        self.header = false;
        self
    }

    /// Gives the writer back, e.g. to inspect an in-memory log.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn format_record(&self, record: &EpochRecord) -> String {
        let d = self.delimiter;
        format!(
            "{}{d}{}{d}{}{d}{}",
            record.epoch,
            format_optional(record.score),
            format_optional(record.best_score),
            format_optional(record.best_epoch),
        )
    }
}

impl<W: Write> MetricSink for DelimitedSink<W> {
    fn write_header(&mut self, config: &TrainingConfig) -> Result<(), IoError> {
        if !self.header {
            return Ok(());
        }

        for line in config.header_lines() {
            writeln!(self.writer, "{}", line)?;
        }
        let columns = COLUMNS.join(&self.delimiter.to_string());
        writeln!(self.writer, "{}", columns)?;
        self.writer.flush()?;
        Ok(())
    }

    fn record(&mut self, record: &EpochRecord) -> Result<(), IoError> {
        let line = self.format_record(record);
        writeln!(self.writer, "{}", line)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Writes every record as one JSON object per line, e.g.
/// `{"epoch":2,"score":0.79,"best_score":0.81,"best_epoch":1}`.
///
/// Missing values are written as `null`. The run configuration is not part of the stream.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl JsonLinesSink<BufWriter<File>> {
    /// Creates (or truncates) a JSON-lines file at `path`.
    pub fn create(path: &str) -> Result<Self, IoError> {
        let file = File::create(path).map_err(IoError::StdIoError)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> MetricSink for JsonLinesSink<W> {
    fn record(&mut self, record: &EpochRecord) -> Result<(), IoError> {
        serde_json::to_writer(&mut self.writer, record).map_err(IoError::JsonError)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Emits every record as a `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl MetricSink for TracingSink {
    fn write_header(&mut self, config: &TrainingConfig) -> Result<(), IoError> {
        for line in config.header_lines() {
            info!(target: "backprop_mlp::metrics", "{}", line);
        }
        Ok(())
    }

    fn record(&mut self, record: &EpochRecord) -> Result<(), IoError> {
        info!(
            target: "backprop_mlp::metrics",
            epoch = record.epoch,
            score = ?record.score,
            best_score = ?record.best_score,
            best_epoch = ?record.best_epoch,
            "epoch metrics"
        );
        Ok(())
    }
}

fn format_optional<T: std::fmt::Display>(value: Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "-".to_string(),
    }
}
