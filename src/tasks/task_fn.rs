//! # Function-backed task (`TaskFn`)
//!
//! [`TaskFn`] wraps a closure `F: Fn(CancellationToken) -> Fut`, producing a
//! fresh future per attempt. Each attempt owns its own state; shared state
//! between retries must be passed in explicitly via `Arc<...>` inside the
//! closure.

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::TaskError;
use crate::tasks::task::Task;

/// Function-backed task implementation.
///
/// Wraps a closure that *creates* a new future per attempt, so a retried
/// task starts from a clean slate.
///
/// ## Example
/// ```
/// use tokio_util::sync::CancellationToken;
/// use taskpool::{TaskFn, TaskRef, TaskError};
///
/// let t: TaskRef = TaskFn::arc("worker", |ctx: CancellationToken| async move {
///     if ctx.is_cancelled() {
///         return Err(TaskError::Canceled);
///     }
///     // do work...
///     Ok::<_, TaskError>(())
/// });
///
/// assert_eq!(t.name(), "worker");
/// ```
#[derive(Debug)]
pub struct TaskFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> TaskFn<F> {
    /// Creates a new function-backed task.
    ///
    /// Prefer [`TaskFn::arc`] when you immediately need a [`TaskRef`](crate::TaskRef).
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }

    /// Creates the task and returns it as a shared handle (`Arc<dyn Task>`).
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

#[async_trait]
impl<F, Fut> Task for TaskFn<F>
where
    F: Fn(CancellationToken) -> Fut + Send + Sync + 'static, // Fn, not FnMut
    Fut: Future<Output = Result<(), TaskError>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, ctx: CancellationToken) -> Result<(), TaskError> {
        (self.f)(ctx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn each_attempt_gets_a_fresh_future() {
        use std::sync::atomic::{AtomicU32, Ordering};

        let calls = Arc::new(AtomicU32::new(0));
        let calls_in = Arc::clone(&calls);
        let task = TaskFn::arc("counting", move |_ctx: CancellationToken| {
            let calls = Arc::clone(&calls_in);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<(), crate::TaskError>(())
            }
        });

        let token = CancellationToken::new();
        task.run(token.clone()).await.unwrap();
        task.run(token).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
