//! # Task abstraction.
//!
//! This module defines the [`Task`] trait: an async, cancelable,
//! zero-argument unit of work. The common handle type is [`TaskRef`], an
//! `Arc<dyn Task>` suitable for sharing between the pending queue and
//! worker slots.
//!
//! A task receives a [`CancellationToken`] and should periodically check it
//! to stop cooperatively when the queue is stopped.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::TaskError;

/// Shared handle to a task (`Arc<dyn Task>`).
pub type TaskRef = Arc<dyn Task>;

/// # Asynchronous, cancelable unit of work.
///
/// A `Task` has a stable [`name`](Task::name) and an async
/// [`run`](Task::run) method that receives a [`CancellationToken`].
/// Implementors should regularly check cancellation and exit promptly when
/// the queue is stopped; returning [`TaskError::Canceled`] keeps the attempt
/// accounting-neutral (no failure recorded, no retry scheduled).
///
/// The queue ignores successful return values and settles each attempt as
/// completed, failed, or cancelled.
///
/// # Example
/// ```
/// use tokio_util::sync::CancellationToken;
/// use async_trait::async_trait;
/// use taskpool::{Task, TaskError};
///
/// struct Demo;
///
/// #[async_trait]
/// impl Task for Demo {
///     fn name(&self) -> &str { "demo" }
///
///     async fn run(&self, ctx: CancellationToken) -> Result<(), TaskError> {
///         if ctx.is_cancelled() {
///             return Err(TaskError::Canceled);
///         }
///         // do work...
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Task: Send + Sync + 'static {
    /// Returns a stable, human-readable task name.
    fn name(&self) -> &str;

    /// Executes one attempt until completion or cancellation.
    ///
    /// Implementations should check `ctx.is_cancelled()` at suspension
    /// points and exit quickly to honor a cooperative stop.
    async fn run(&self, ctx: CancellationToken) -> Result<(), TaskError>;
}
