//! # Example: retry
//!
//! A flaky job retried under a bounded budget, observed through the
//! built-in [`LogWriter`] subscriber.
//!
//! Demonstrates how to:
//! - Set a retry budget with [`QueueConfig::retries`].
//! - Attach [`LogWriter`] to watch completions, errors, and the drain.
//! - See a retried job re-enter the line behind later admissions.
//!
//! ## Flow
//! ```text
//! TaskQueue::with_tasks()
//!     ├─► subscribe_all(LogWriter)
//!     └─► run_until_drained()
//!           ├─► flaky  ──► [error] x2 ──► requeued ──► [completed]
//!           ├─► steady ──► [completed]
//!           └─► [drained]
//! ```
//!
//! ## Run
//! Requires the `logging` feature for [`LogWriter`].
//! ```bash
//! cargo run --example retry --features logging
//! ```

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use taskpool::{delay, LogWriter, QueueConfig, TaskError, TaskFn, TaskQueue, TaskRef};
use tokio_util::sync::CancellationToken;

/// Fails the first two attempts, then succeeds.
fn flaky(name: &'static str) -> TaskRef {
    let calls = Arc::new(AtomicU32::new(0));

    TaskFn::arc(name, move |_ctx: CancellationToken| {
        let calls = calls.clone();
        async move {
            delay(Duration::from_millis(100)).await;
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            if n < 3 {
                return Err(TaskError::fail(format!("attempt {n} blew up")));
            }
            Ok(())
        }
    })
}

fn steady(name: &'static str) -> TaskRef {
    TaskFn::arc(name, |_ctx: CancellationToken| async {
        delay(Duration::from_millis(100)).await;
        Ok::<(), TaskError>(())
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // One slot so the retry ordering is visible in the log output:
    // flaky fails, steady runs, then flaky's retry gets the slot.
    let cfg = QueueConfig {
        workers: 1,
        retries: 2,
    };

    let queue = TaskQueue::with_tasks(cfg, vec![flaky("flaky"), steady("steady")]);
    queue.subscribe_all(Arc::new(LogWriter::new()));

    let report = queue.run_until_drained().await;

    println!(
        "\ndrained: successful={} failed={} total={}",
        report.successful_tasks, report.failed_tasks, report.total_tasks
    );
}
