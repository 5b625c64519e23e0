//! Error types used by the taskpool scheduler and tasks.
//!
//! This module defines two main error enums:
//!
//! - [`QueueError`] — errors raised by the scheduler itself.
//! - [`TaskError`] — errors raised by individual task attempts.
//!
//! Task errors are data, not scheduler failures: the queue captures them
//! per attempt, surfaces them through [`EventKind::TaskError`](crate::EventKind)
//! notifications and the failed-attempt counter, and keeps running. The
//! scheduler's only user-facing hard failure is [`QueueError::Busy`], returned
//! by [`TaskQueue::clear_queue`](crate::TaskQueue::clear_queue) while any
//! worker slot is still bound.
//!
//! Both types provide helper methods (`as_label`, `as_message`) for
//! logging/metrics.

use thiserror::Error;

/// # Errors produced by the taskpool scheduler.
///
/// These represent invalid operations against the queue itself, not task
/// failures (those travel as [`TaskError`] payloads on events).
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    /// The queue cannot be cleared while any worker slot is bound.
    ///
    /// Wait for the drained notification (or call
    /// [`TaskQueue::run_until_drained`](crate::TaskQueue::run_until_drained))
    /// before clearing.
    #[error("queue is busy: one or more worker slots are still bound")]
    Busy,
}

impl QueueError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use taskpool::QueueError;
    ///
    /// assert_eq!(QueueError::Busy.as_label(), "queue_busy");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            QueueError::Busy => "queue_busy",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            QueueError::Busy => "clear rejected: worker slots still bound".to_string(),
        }
    }
}

/// # Errors produced by task execution.
///
/// A task attempt either fails with [`TaskError::Fail`] (recorded in the
/// queued record's failure history, counted, possibly retried) or reports
/// [`TaskError::Canceled`] when it observed the run's cancellation token.
/// Cancellation is accounting-neutral: the scheduler records no failure and
/// schedules no retry for a cancelled attempt.
#[non_exhaustive]
#[derive(Error, Debug, Clone)]
pub enum TaskError {
    /// Task execution failed; the attempt may be retried if the retry
    /// budget allows.
    #[error("execution failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// Task observed cancellation and exited without a usable outcome.
    #[error("context cancelled")]
    Canceled,
}

impl TaskError {
    /// Convenience constructor for [`TaskError::Fail`].
    ///
    /// # Example
    /// ```
    /// use taskpool::TaskError;
    ///
    /// let err = TaskError::fail("connection refused");
    /// assert_eq!(err.as_label(), "task_failed");
    /// ```
    pub fn fail(error: impl Into<String>) -> Self {
        TaskError::Fail {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            TaskError::Fail { .. } => "task_failed",
            TaskError::Canceled => "task_canceled",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            TaskError::Fail { error } => format!("error: {error}"),
            TaskError::Canceled => "context cancelled".to_string(),
        }
    }

    /// Returns true if this error marks a cancelled attempt.
    pub fn is_canceled(&self) -> bool {
        matches!(self, TaskError::Canceled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_stable() {
        assert_eq!(QueueError::Busy.as_label(), "queue_busy");
        assert_eq!(TaskError::fail("x").as_label(), "task_failed");
        assert_eq!(TaskError::Canceled.as_label(), "task_canceled");
    }

    #[test]
    fn fail_message_carries_cause() {
        let err = TaskError::fail("boom");
        assert_eq!(err.to_string(), "execution failed: boom");
        assert!(err.as_message().contains("boom"));
        assert!(!err.is_canceled());
    }
}
