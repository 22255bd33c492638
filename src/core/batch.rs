//! Bookkeeping for one conversion run over a fixed selection and format.

use super::error::ConvertError;
use super::format::TargetFormat;
use super::{ConversionProgress, DestinationItem, SourceItem};
use chrono::{DateTime, Local};

/// How a finished run ended.
#[derive(Debug)]
pub enum BatchOutcome {
    /// Every source was converted.
    Completed { converted: usize },
    /// The run stopped at the first failing item; later items were not attempted.
    Aborted {
        processed: usize,
        failed_item: Option<String>,
        error: ConvertError,
    },
}

pub struct BatchRun {
    sources: Vec<SourceItem>,
    format: TargetFormat,
    current: usize,
    destinations: Vec<DestinationItem>,
    started_at: DateTime<Local>,
}

impl BatchRun {
    pub fn new(sources: Vec<SourceItem>, format: TargetFormat) -> Self {
        Self {
            sources,
            format,
            current: 0,
            destinations: Vec::new(),
            started_at: Local::now(),
        }
    }

    pub fn format(&self) -> TargetFormat {
        self.format
    }

    pub fn total(&self) -> usize {
        self.sources.len()
    }

    pub fn processed(&self) -> usize {
        self.destinations.len()
    }

    /// The item to convert next, or `None` once every item has been handled.
    pub fn current_item(&self) -> Option<&SourceItem> {
        self.sources.get(self.current)
    }

    /// 1-based position of the current item, for status messages.
    pub fn position(&self) -> usize {
        self.current + 1
    }

    pub fn record_success(&mut self, destination: DestinationItem) {
        self.destinations.push(destination);
        self.current += 1;
    }

    pub fn progress(&self) -> ConversionProgress {
        ConversionProgress {
            processed: self.processed(),
            total: self.total(),
        }
    }

    /// Ends the run, successfully if no error is given.
    pub fn finish(self, error: Option<ConvertError>) -> BatchOutcome {
        let elapsed = Local::now() - self.started_at;
        match error {
            None => {
                tracing::info!(
                    "Batch of {} files finished in {} ms",
                    self.processed(),
                    elapsed.num_milliseconds()
                );
                BatchOutcome::Completed {
                    converted: self.processed(),
                }
            }
            Some(error) => {
                let failed_item = self.current_item().map(|s| s.display_name.clone());
                tracing::error!(
                    "Batch aborted after {} of {} files: {}",
                    self.processed(),
                    self.total(),
                    error
                );
                BatchOutcome::Aborted {
                    processed: self.processed(),
                    failed_item,
                    error,
                }
            }
        }
    }
}
