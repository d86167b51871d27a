//! Observability sink for scheduling passes
//!
//! Nothing reported here feeds back into state. Sinks are best effort.

use crate::{scheduler::JobFailure, Error};
use mockall::automock;
use tracing::{error, warn};

#[automock]
pub trait EventSink {
    /// Called once per pass that quarantined at least one job
    fn on_failures(&self, height: u64, failures: &[JobFailure]);

    /// Called when a pass was skipped because the params are unusable
    fn on_configuration_error(&self, height: u64, err: &Error);
}

/// Default sink writing to the tracing subscriber
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EventSink for LogSink {
    fn on_failures(&self, height: u64, failures: &[JobFailure]) {
        let summary: Vec<String> = failures
            .iter()
            .map(|f| format!("{}:{}", f.job_id, f.reason))
            .collect();
        warn!(height, count = failures.len(), "Execute errors: {:?}", summary);
    }

    fn on_configuration_error(&self, height: u64, err: &Error) {
        error!(height, "Skipping job execution: {}", err);
    }
}
