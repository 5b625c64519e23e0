//! # taskpool
//!
//! **Taskpool** is a bounded-concurrency task queue for Rust.
//!
//! It runs an unbounded stream of independent async tasks through a
//! fixed-size pool of logical worker slots, tracks completion and failure,
//! retries within a configured budget, and can be stopped cooperatively.
//! Use it to push large batches of asynchronous operations (network calls,
//! file reads, ...) without serializing them or running them all at once,
//! and without one slow task blocking unrelated work.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │   TaskRef    │   │   TaskRef    │   │   TaskRef    │
//!     │(user task #1)│   │(user task #2)│   │(user task #3)│
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼ add_tasks        ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  TaskQueue (scheduler)                                            │
//! │  - pending queue (FIFO; retries re-append at the back)            │
//! │  - worker-slot table (fixed size, set at construction)            │
//! │  - run counters (completed / failed attempts / total added)       │
//! │  - Dispatcher (observer registry keyed by EventKind)              │
//! │  - CancellationToken (one per run; stop() cancels it)             │
//! └──────┬──────────────────┬──────────────────┬──────────────────────┘
//!        ▼                  ▼                  ▼
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │   slot 0     │   │   slot 1     │   │  slot W-1    │
//!     │ (drive loop) │   │ (drive loop) │   │ (drive loop) │
//!     └┬─────────────┘   └┬─────────────┘   └┬─────────────┘
//!      │ Emits:           │ Emits:           │ Emits:
//!      │ - TaskCompleted  │ - TaskError      │ - QueueDrained
//!      ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │              Dispatcher (per-kind observer registry)              │
//! └─────────────────────────────────┬─────────────────────────────────┘
//!                                   ▼
//!                      subscriber.on_event(&Event)
//! ```
//!
//! ### Lifecycle
//! ```text
//! TaskRef ──► add_tasks ──► pending ──► start_execution ──► drive_slot()
//!
//! loop {
//!   ├─► attempts += 1
//!   ├─► run one attempt under the run token
//!   │       │
//!   │       ├─ Ok        ──► completed += 1, emit TaskCompleted
//!   │       ├─ Err       ──► failed += 1, emit TaskError
//!   │       │               └─ attempts <= retries ─► re-append to BACK
//!   │       └─ Cancelled ──► nothing recorded (outcome unknown)
//!   │
//!   ├─► token not cancelled ─► pop next pending, repeat
//!   └─► else free the slot
//!         └─ every slot idle ─► emit QueueDrained { report } (exactly once)
//! }
//! ```
//!
//! ## Features
//! | Area              | Description                                                          | Key types / traits                   |
//! |-------------------|----------------------------------------------------------------------|--------------------------------------|
//! | **Scheduling**    | Fixed worker slots, FIFO admission, bounded retries.                 | [`TaskQueue`], [`QueueConfig`]       |
//! | **Observers**     | Hook into lifecycle events (logging, metrics, custom handlers).      | [`Subscribe`], [`SubscriptionId`]    |
//! | **Events**        | Classified notifications with ordering metadata.                     | [`Event`], [`EventKind`], [`DrainReport`] |
//! | **Errors**        | Typed errors for the scheduler and for task attempts.                | [`QueueError`], [`TaskError`]        |
//! | **Tasks**         | Define tasks as trait impls or closures.                             | [`Task`], [`TaskFn`], [`TaskRef`]    |
//! | **Façade**        | One-call run-to-completion over the notification-driven core.        | [`run`]                              |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```
//! use std::sync::Arc;
//! use taskpool::{run, QueueConfig, Subscribe, TaskError, TaskFn, TaskRef};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let tasks: Vec<TaskRef> = (0..8)
//!         .map(|i| {
//!             TaskFn::arc(format!("fetch-{i}"), |ctx: CancellationToken| async move {
//!                 if ctx.is_cancelled() {
//!                     return Err(TaskError::Canceled);
//!                 }
//!                 // do work...
//!                 Ok(())
//!             }) as TaskRef
//!         })
//!         .collect();
//!
//!     let report = run(
//!         QueueConfig { workers: 3, retries: 1 },
//!         tasks,
//!         Vec::<Arc<dyn Subscribe>>::new(),
//!     )
//!     .await;
//!
//!     assert_eq!(report.successful_tasks, 8);
//!     assert_eq!(report.total_tasks, 8);
//! }
//! ```

mod core;
mod error;
mod events;
mod subscribers;
mod tasks;

// ---- Public re-exports ----

pub use crate::core::{run, QueueConfig, TaskQueue, DEFAULT_WORKERS};
pub use error::{QueueError, TaskError};
pub use events::{Dispatcher, DrainReport, Event, EventKind, SubscriptionId};
pub use subscribers::Subscribe;
pub use tasks::{delay, Task, TaskFn, TaskRef};

// Optional: expose a simple built-in logging observer (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
