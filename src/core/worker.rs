//! # Run a single attempt of a task execution.
//!
//! Executes one attempt of a [`Task`] under the run's cancellation token
//! and classifies the result into an [`Outcome`] for the scheduler's
//! settle step.
//!
//! ## Classification
//! ```text
//! task.run() → Ok(())             → Outcome::Completed
//! task.run() → Err(Canceled)      → Outcome::Cancelled   (accounting-neutral)
//! task.run() → Err(other)         → Outcome::Failed(err)
//! token fires while in flight     → Outcome::Cancelled
//! ```
//!
//! ## Rules
//! - The attempt races against the shared run token: when the token fires,
//!   the attempt future is dropped at its next suspension point and the
//!   outcome is unknown, so nothing is recorded for it.
//! - Side effects already performed by a cancelled attempt are not undone;
//!   a stop bounds how much *new* work starts, not how long in-flight work
//!   takes to physically finish.

use tokio_util::sync::CancellationToken;

use crate::error::TaskError;
use crate::tasks::Task;

/// Settlement of one execution attempt.
pub(crate) enum Outcome {
    /// The attempt succeeded.
    Completed,
    /// The attempt failed with an error.
    Failed(TaskError),
    /// The run token fired (or the task reported cancellation); the
    /// outcome is unknown, not failed.
    Cancelled,
}

/// Executes a single attempt of `task` under `token`.
pub(crate) async fn run_attempt(task: &dyn Task, token: &CancellationToken) -> Outcome {
    tokio::select! {
        res = task.run(token.clone()) => match res {
            Ok(()) => Outcome::Completed,
            Err(TaskError::Canceled) => Outcome::Cancelled,
            Err(err) => Outcome::Failed(err),
        },
        _ = token.cancelled() => Outcome::Cancelled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::TaskFn;

    #[tokio::test]
    async fn classifies_success_and_failure() {
        let ok = TaskFn::new("ok", |_ctx: CancellationToken| async { Ok::<(), TaskError>(()) });
        let bad = TaskFn::new("bad", |_ctx: CancellationToken| async {
            Err(TaskError::fail("nope"))
        });

        let token = CancellationToken::new();
        assert!(matches!(
            run_attempt(&ok, &token).await,
            Outcome::Completed
        ));
        assert!(matches!(
            run_attempt(&bad, &token).await,
            Outcome::Failed(_)
        ));
    }

    #[tokio::test]
    async fn cancelled_token_interrupts_the_attempt() {
        let hang = TaskFn::new("hang", |ctx: CancellationToken| async move {
            ctx.cancelled().await;
            Err(TaskError::Canceled)
        });

        let token = CancellationToken::new();
        let attempt = run_attempt(&hang, &token);
        tokio::pin!(attempt);

        // Not settled yet.
        tokio::select! {
            biased;
            _ = &mut attempt => panic!("attempt settled before cancellation"),
            _ = tokio::task::yield_now() => {}
        }

        token.cancel();
        assert!(matches!(attempt.await, Outcome::Cancelled));
    }

    #[tokio::test]
    async fn task_reported_cancellation_is_not_a_failure() {
        let quits = TaskFn::new("quits", |_ctx: CancellationToken| async {
            Err(TaskError::Canceled)
        });
        let token = CancellationToken::new();
        assert!(matches!(
            run_attempt(&quits, &token).await,
            Outcome::Cancelled
        ));
    }
}
