//! # Queued-task record.
//!
//! [`QueuedTask`] wraps an admitted task with its per-run bookkeeping:
//! how many attempts have started and which errors those attempts produced.
//!
//! ## Ownership
//! A record is owned by exactly one holder at a time: the pending queue
//! while it waits, or the worker slot executing it. On retry the record
//! *moves* back to the pending queue (re-appended at the back); it is never
//! duplicated. At a terminal outcome (success, or failure with an exhausted
//! retry budget) the record is dropped.

use crate::error::TaskError;
use crate::tasks::TaskRef;

/// A task admitted to the queue, plus its mutable bookkeeping.
pub(crate) struct QueuedTask {
    /// The unit of work.
    pub task: TaskRef,
    /// Number of attempts started (incremented exactly once per execution
    /// start, never reset).
    pub attempts: u32,
    /// Errors recorded by failed attempts, in attempt order.
    pub failures: Vec<TaskError>,
}

impl QueuedTask {
    /// Wraps a freshly admitted task (no attempts yet).
    pub fn new(task: TaskRef) -> Self {
        Self {
            task,
            attempts: 0,
            failures: Vec::new(),
        }
    }

    /// Records the start of one execution attempt.
    pub fn begin_attempt(&mut self) -> u32 {
        self.attempts += 1;
        self.attempts
    }

    /// Records a failed attempt.
    pub fn record_failure(&mut self, err: TaskError) {
        self.failures.push(err);
    }

    /// True if the retry budget still allows re-queueing this record.
    ///
    /// `retries = 0` means one attempt only; `retries = R` allows up to
    /// `R + 1` attempts in total.
    pub fn can_retry(&self, retries: u32) -> bool {
        retries > 0 && self.attempts <= retries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::TaskFn;
    use tokio_util::sync::CancellationToken;

    fn noop() -> TaskRef {
        TaskFn::arc("noop", |_ctx: CancellationToken| async { Ok::<(), TaskError>(()) })
    }

    #[test]
    fn retry_budget_allows_r_plus_one_attempts() {
        let mut record = QueuedTask::new(noop());
        assert_eq!(record.attempts, 0);

        // retries = 2 → attempts 1 and 2 may requeue, attempt 3 may not.
        record.begin_attempt();
        assert!(record.can_retry(2));
        record.begin_attempt();
        assert!(record.can_retry(2));
        record.begin_attempt();
        assert!(!record.can_retry(2));
    }

    #[test]
    fn zero_retries_means_single_attempt() {
        let mut record = QueuedTask::new(noop());
        record.begin_attempt();
        assert!(!record.can_retry(0));
    }

    #[test]
    fn failures_accumulate_in_attempt_order() {
        let mut record = QueuedTask::new(noop());
        record.record_failure(TaskError::fail("first"));
        record.record_failure(TaskError::fail("second"));
        assert_eq!(record.failures.len(), 2);
        assert!(record.failures[0].as_message().contains("first"));
        assert!(record.failures[1].as_message().contains("second"));
    }
}
