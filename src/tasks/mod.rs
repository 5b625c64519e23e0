//! # Task abstractions and queued records.
//!
//! This module provides the task-related types:
//! - [`Task`] - trait for implementing async cancelable tasks
//! - [`TaskFn`] - function-based task implementation
//! - [`TaskRef`] - shared reference to a task (`Arc<dyn Task>`)
//! - [`QueuedTask`] - a task plus its per-run bookkeeping (crate-internal)
//!
//! It also hosts [`delay`], a plain timed-delay primitive consumed by
//! application code (typically to build test tasks). The scheduler itself
//! never calls it.

mod queued;
mod task;
mod task_fn;

pub(crate) use queued::QueuedTask;
pub use task::{Task, TaskRef};
pub use task_fn::TaskFn;

use std::time::Duration;

/// Completes after the given duration has elapsed.
///
/// A deferred-completion building block for callers composing tasks out of
/// timed waits. Cancellation-unaware on purpose: wrap it in a
/// `tokio::select!` against a token if the wait must be interruptible.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use taskpool::delay;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// delay(Duration::from_millis(1)).await;
/// # }
/// ```
pub async fn delay(duration: Duration) {
    tokio::time::sleep(duration).await;
}
