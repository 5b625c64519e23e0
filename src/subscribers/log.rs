//! # Simple logging observer for debugging and demos.
//!
//! [`LogWriter`] prints events to stdout in a human-readable format.
//! This is primarily useful for development, debugging, and examples.
//!
//! ## Output format
//! ```text
//! [completed] task=fetch attempt=1
//! [error] task=fetch err="connection refused" attempt=2
//! [drained] successful=18 failed=2 total=20
//! ```

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Simple stdout logging observer.
///
/// Enabled via the `logging` feature. Prints human-readable event
/// descriptions to stdout for debugging and demonstration purposes.
///
/// Not intended for production use - implement a custom [`Subscribe`] for
/// structured logging or metrics collection.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Subscribe for LogWriter {
    fn on_event(&self, e: &Event) {
        match e.kind {
            EventKind::TaskCompleted => {
                if let (Some(task), Some(att)) = (&e.task, e.attempt) {
                    println!("[completed] task={task} attempt={att}");
                }
            }
            EventKind::TaskError => {
                println!(
                    "[error] task={:?} err={:?} attempt={:?}",
                    e.task, e.reason, e.attempt
                );
            }
            EventKind::QueueDrained => {
                let report = e.report.unwrap_or_default();
                println!(
                    "[drained] successful={} failed={} total={}",
                    report.successful_tasks, report.failed_tasks, report.total_tasks
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
