use crate::error::ModelError;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

/// Validates a reporting cadence given in percent.
pub fn validate_cadence(cadence: Option<u32>) -> Result<(), ModelError> {
    match cadence {
        Some(step) if step == 0 || step > 100 => Err(ModelError::InputValidationError(format!(
            "Reporting cadence must be between 1 and 100 percent, got {}",
            step
        ))),
        _ => Ok(()),
    }
}

/// Reports how far a long loop has got, every `cadence` percent.
///
/// Drives an `indicatif` progress bar and emits a `debug!` event each time another
/// checkpoint is crossed. Without a cadence the bar is hidden and no events are emitted.
/// Reporting never feeds back into the computation it observes.
pub(crate) struct ProgressReporter {
    label: &'static str,
    total: u64,
    cadence: Option<u32>,
    next_checkpoint: u32,
    bar: ProgressBar,
}

impl ProgressReporter {
    pub(crate) fn new(label: &'static str, total: u64, cadence: Option<u32>) -> Self {
        let bar = match cadence {
            Some(_) if total > 0 => {
                let bar = ProgressBar::new(total);
                bar.set_style(
                    ProgressStyle::default_bar()
                        .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} | {msg}")
                        .unwrap_or_else(|_| ProgressStyle::default_bar())
                        .progress_chars("█▓░"),
                );
                bar.set_message(label);
                bar
            }
            _ => ProgressBar::hidden(),
        };

        Self {
            label,
            total,
            cadence,
            next_checkpoint: 0,
            bar,
        }
    }

    /// Marks `done` units of work as finished.
    pub(crate) fn advance(&mut self, done: u64) {
        self.bar.set_position(done);

        let Some(step) = self.cadence else {
            return;
        };
        if self.total == 0 {
            return;
        }

        let percent = (done.saturating_mul(100) / self.total) as u32;
        while self.next_checkpoint < 100 && percent >= self.next_checkpoint {
            debug!(
                label = self.label,
                percent = self.next_checkpoint,
                "progress checkpoint"
            );
            self.next_checkpoint += step;
        }
    }

    pub(crate) fn finish(self) {
        if self.cadence.is_some() {
            debug!(label = self.label, percent = 100u32, "progress checkpoint");
        }
        self.bar.finish_and_clear();
    }
}
