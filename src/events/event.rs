//! # Lifecycle events emitted by the scheduler.
//!
//! The [`EventKind`] enum classifies the three notification kinds the queue
//! produces:
//! - [`EventKind::TaskCompleted`] — an attempt settled successfully
//! - [`EventKind::TaskError`] — an attempt settled with an error
//! - [`EventKind::QueueDrained`] — every worker slot went idle
//!
//! The [`Event`] struct carries additional metadata such as a timestamp,
//! task name, attempt number, failure reason, and — for drain events — the
//! aggregate [`DrainReport`].
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Use `seq` to restore the exact emission order when events
//! are recorded out of band.
//!
//! ## Example
//! ```
//! use taskpool::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::TaskError)
//!     .with_task("demo-task")
//!     .with_reason("boom")
//!     .with_attempt(3);
//!
//! assert_eq!(ev.kind, EventKind::TaskError);
//! assert_eq!(ev.task.as_deref(), Some("demo-task"));
//! assert_eq!(ev.reason.as_deref(), Some("boom"));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of queue lifecycle events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A task attempt completed successfully.
    ///
    /// Sets:
    /// - `task`: task name
    /// - `attempt`: attempt number (1-based)
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    TaskCompleted,

    /// A task attempt failed.
    ///
    /// Emitted once per failed attempt, whether or not the retry budget
    /// allows another attempt. No separate "permanently failed" kind
    /// exists; compare `attempt` against the configured retry budget to
    /// distinguish final failures.
    ///
    /// Sets:
    /// - `task`: task name
    /// - `attempt`: attempt number
    /// - `reason`: failure message
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    TaskError,

    /// Every worker slot went idle; the queue is drained.
    ///
    /// Emitted exactly once per complete drain, carrying the run counters
    /// at that instant.
    ///
    /// Sets:
    /// - `report`: aggregate [`DrainReport`]
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    QueueDrained,
}

/// Aggregate metrics carried by a [`EventKind::QueueDrained`] event.
///
/// A single logical task can appear in both tallies: a task that failed
/// twice and then succeeded contributes 2 to `failed_tasks` (attempts) and
/// 1 to `successful_tasks`, while `total_tasks` counts it once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainReport {
    /// Attempts that settled successfully.
    pub successful_tasks: u64,
    /// Attempts that settled with an error (counted per attempt).
    pub failed_tasks: u64,
    /// Unique tasks admitted since construction or the last clear.
    pub total_tasks: u64,
}

/// Queue lifecycle event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Debug, Clone)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Name of the task, if applicable.
    pub task: Option<Arc<str>>,
    /// Attempt count (starting from 1).
    pub attempt: Option<u32>,
    /// Human-readable failure reason.
    pub reason: Option<Arc<str>>,
    /// Aggregate drain metrics (only for [`EventKind::QueueDrained`]).
    pub report: Option<DrainReport>,
}

impl Event {
    /// Creates a new event of the given kind with the current timestamp and
    /// next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            task: None,
            attempt: None,
            reason: None,
            report: None,
        }
    }

    /// Attaches a task name.
    #[inline]
    pub fn with_task(mut self, task: impl Into<Arc<str>>) -> Self {
        self.task = Some(task.into());
        self
    }

    /// Attaches an attempt count.
    #[inline]
    pub fn with_attempt(mut self, n: u32) -> Self {
        self.attempt = Some(n);
        self
    }

    /// Attaches a human-readable failure reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches an aggregate drain report.
    #[inline]
    pub fn with_report(mut self, report: DrainReport) -> Self {
        self.report = Some(report);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seq_is_monotonic() {
        let a = Event::new(EventKind::TaskCompleted);
        let b = Event::new(EventKind::TaskCompleted);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn builders_set_fields() {
        let report = DrainReport {
            successful_tasks: 3,
            failed_tasks: 1,
            total_tasks: 3,
        };
        let ev = Event::new(EventKind::QueueDrained).with_report(report);
        assert_eq!(ev.report, Some(report));
        assert!(ev.task.is_none());
        assert!(ev.attempt.is_none());
    }
}
