//! # Example: batch
//!
//! Minimal example: run a batch of jobs through a small worker pool and
//! print the drain report.
//!
//! Demonstrates how to:
//! - Define jobs with [`TaskFn`].
//! - Bound concurrency with [`QueueConfig::workers`].
//! - Wait for the drain with the [`run`] facade.
//!
//! ## Flow
//! ```text
//! run(cfg, tasks, subs)
//!     ├─► TaskQueue::with_tasks()
//!     ├─► start_execution()          (binds up to `workers` slots)
//!     │     └─► drive_slot() x4 ──► job-0..job-11
//!     └─► run_until_drained() ──► DrainReport
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example batch
//! ```

use std::time::Duration;
use taskpool::{delay, run, QueueConfig, TaskError, TaskFn, TaskRef};
use tokio_util::sync::CancellationToken;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // 1. Four slots for twelve jobs: at most four run at once.
    let cfg = QueueConfig {
        workers: 4,
        retries: 0,
    };

    // 2. Each job simulates a little work and reports on the console.
    let tasks: Vec<TaskRef> = (0..12)
        .map(|i| {
            TaskFn::arc(format!("job-{i}"), move |ctx: CancellationToken| async move {
                if ctx.is_cancelled() {
                    return Err(TaskError::Canceled);
                }
                println!("[job-{i}] working...");
                delay(Duration::from_millis(150)).await;
                println!("[job-{i}] done");
                Ok(())
            }) as TaskRef
        })
        .collect();

    // 3. No subscribers; the facade starts the queue and awaits the drain.
    let report = run(cfg, tasks, Vec::new()).await;

    println!(
        "\ndrained: successful={} failed={} total={}",
        report.successful_tasks, report.failed_tasks, report.total_tasks
    );
}
