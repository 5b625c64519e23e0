//! # TaskQueue: bounded-concurrency scheduler with retries and drain detection.
//!
//! The [`TaskQueue`] owns the pending-task sequence, the fixed worker-slot
//! table, the run counters, and the per-run cancellation token. It decides
//! what each worker runs next, applies the retry policy, and detects the
//! moment every slot goes idle.
//!
//! ## High-level architecture
//! ```text
//! add_tasks() ──► pending (FIFO, VecDeque<QueuedTask>)
//!                     │ pop front on dispatch
//! start_execution() ──┼──► slot 0 ──► drive_slot() loop
//!                     ├──► slot 1 ──► drive_slot() loop
//!                     └──► slot W-1 ► drive_slot() loop
//!
//! drive_slot() loop (one spawned future per bound slot):
//!   ├─► attempts += 1
//!   ├─► run_attempt(task, run_token)
//!   ├─► settle under the state lock:
//!   │     ├─ Completed → completed += 1        → emit TaskCompleted
//!   │     ├─ Failed    → failures += err,      → emit TaskError
//!   │     │              failed_attempts += 1,
//!   │     │              requeue at the BACK if attempts <= retries
//!   │     └─ Cancelled → nothing recorded (outcome unknown, not failed)
//!   ├─► token not cancelled? pop next pending and loop (slot stays bound)
//!   └─► otherwise free the slot; if every slot is idle → emit QueueDrained
//! ```
//!
//! ## Rules
//! - First attempts run in admission order (FIFO); a retried task loses its
//!   original position and is ordered after all tasks pending at the moment
//!   of retry. Completion order across slots is not guaranteed.
//! - All bookkeeping (queue pop/push, slot transitions, counters, the drain
//!   decision) happens inside one critical section per settle, so the drain
//!   notification fires exactly once per complete drain and never while a
//!   slot is still bound.
//! - Notifications are emitted after the critical section, so observers may
//!   re-enter the queue (e.g. [`TaskQueue::add_tasks`]) without deadlock.
//! - Task errors never escape the scheduler: they are captured per attempt
//!   and surfaced via [`EventKind::TaskError`] and the failed counter.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio_util::sync::CancellationToken;

use crate::core::config::QueueConfig;
use crate::core::slot::Slot;
use crate::core::worker::{run_attempt, Outcome};
use crate::error::QueueError;
use crate::events::{Dispatcher, DrainReport, Event, EventKind, SubscriptionId};
use crate::subscribers::{DrainWaiter, Subscribe};
use crate::tasks::{QueuedTask, TaskRef};

/// Mutable scheduler state, exclusively owned behind one lock.
///
/// The lock is never held across an await point: each mutation is one
/// indivisible step even though many task executions are logically
/// concurrent.
struct State {
    /// Admitted tasks waiting for a slot, in dispatch order.
    pending: VecDeque<QueuedTask>,
    /// Fixed-size worker-slot table (allocated at construction).
    slots: Vec<Slot>,
    /// Attempts that settled successfully.
    completed: u64,
    /// Attempts that settled with an error (per attempt, not per task).
    failed_attempts: u64,
    /// Unique tasks admitted (never incremented by retries).
    total_added: u64,
    /// Cancellation token for the current run. One-shot: a stopped run's
    /// token is replaced by a fresh one on the next start.
    token: CancellationToken,
}

impl State {
    fn all_idle(&self) -> bool {
        self.slots.iter().all(Slot::is_idle)
    }

    fn report(&self) -> DrainReport {
        DrainReport {
            successful_tasks: self.completed,
            failed_tasks: self.failed_attempts,
            total_tasks: self.total_added,
        }
    }
}

struct Inner {
    cfg: QueueConfig,
    state: Mutex<State>,
    dispatcher: Dispatcher,
}

impl Inner {
    fn lock_state(&self) -> MutexGuard<'_, State> {
        // State mutations can't leave the struct inconsistent mid-panic;
        // recover the guard rather than propagating poison.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Bounded-concurrency task scheduler.
///
/// Runs admitted tasks through a fixed pool of worker slots, retries failed
/// attempts within the configured budget, and reports lifecycle events
/// through its observer registry. Cheap to clone; clones share one
/// scheduler.
///
/// ## Example
/// ```
/// use taskpool::{QueueConfig, TaskError, TaskFn, TaskQueue, TaskRef};
/// use tokio_util::sync::CancellationToken;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let queue = TaskQueue::new(QueueConfig { workers: 2, retries: 0 });
///
///     let hello: TaskRef = TaskFn::arc("hello", |_ctx: CancellationToken| async {
///         Ok::<_, TaskError>(())
///     });
///     queue.add_task(hello);
///
///     let report = queue.run_until_drained().await;
///     assert_eq!(report.successful_tasks, 1);
///     assert_eq!(report.total_tasks, 1);
/// }
/// ```
#[derive(Clone)]
pub struct TaskQueue {
    inner: Arc<Inner>,
}

impl TaskQueue {
    /// Creates an idle queue with no pending tasks.
    ///
    /// Allocates exactly [`QueueConfig::worker_count`] idle slots. Never
    /// starts execution.
    pub fn new(cfg: QueueConfig) -> Self {
        let workers = cfg.worker_count();
        let mut slots = Vec::with_capacity(workers);
        slots.resize_with(workers, || Slot::Idle);

        Self {
            inner: Arc::new(Inner {
                cfg,
                state: Mutex::new(State {
                    pending: VecDeque::new(),
                    slots,
                    completed: 0,
                    failed_attempts: 0,
                    total_added: 0,
                    token: CancellationToken::new(),
                }),
                dispatcher: Dispatcher::new(),
            }),
        }
    }

    /// Creates a queue and admits an initial batch of tasks.
    pub fn with_tasks(cfg: QueueConfig, tasks: impl IntoIterator<Item = TaskRef>) -> Self {
        let queue = Self::new(cfg);
        queue.add_tasks(tasks);
        queue
    }

    // ---- Admission ----

    /// Admits one task to the back of the pending queue.
    ///
    /// Valid before and during a run, including from inside an observer
    /// callback. Admission never dispatches by itself: busy workers pick up
    /// new work as they free; idle slots go back to work on the next
    /// [`start_execution`](Self::start_execution).
    pub fn add_task(&self, task: TaskRef) {
        self.add_tasks(std::iter::once(task));
    }

    /// Admits a batch of tasks, preserving iteration order.
    ///
    /// Each admitted task counts once toward `total_tasks`, regardless of
    /// how many attempts it later takes.
    pub fn add_tasks(&self, tasks: impl IntoIterator<Item = TaskRef>) {
        let mut state = self.inner.lock_state();
        for task in tasks {
            state.total_added += 1;
            state.pending.push_back(QueuedTask::new(task));
        }
    }

    // ---- Execution ----

    /// Dispatches pending tasks to every idle worker slot.
    ///
    /// Non-blocking: completion is observed through notifications. Safe to
    /// call repeatedly (e.g. after admitting more tasks); already-bound
    /// slots are untouched, so work is never double-dispatched.
    ///
    /// If nothing was dispatched and every slot is idle — an empty queue —
    /// the drained notification fires immediately with the counters at this
    /// instant (all zero on a fresh queue).
    ///
    /// A stopped run's token cannot be un-cancelled; once the previous run
    /// has fully wound down, a fresh token is minted here so the queue can
    /// be re-run after [`stop`](Self::stop).
    ///
    /// # Panics
    /// Must be called within a tokio runtime (worker loops are spawned).
    pub fn start_execution(&self) {
        let mut drained: Option<Event> = None;
        {
            let mut state = self.inner.lock_state();
            if state.token.is_cancelled() && state.all_idle() {
                state.token = CancellationToken::new();
            }
            let token = state.token.clone();

            // A cancelled run hands out no further work; the pending queue
            // survives untouched for a later restart.
            if !token.is_cancelled() {
                for slot in 0..state.slots.len() {
                    if !state.slots[slot].is_idle() {
                        continue;
                    }
                    let Some(record) = state.pending.pop_front() else {
                        break;
                    };
                    state.slots[slot] = Slot::bind(record.task.name());
                    tokio::spawn(drive_slot(
                        Arc::clone(&self.inner),
                        slot,
                        record,
                        token.clone(),
                    ));
                }
            }

            if state.all_idle() {
                drained = Some(Event::new(EventKind::QueueDrained).with_report(state.report()));
            }
        }
        if let Some(event) = drained {
            self.inner.dispatcher.emit(&event);
        }
    }

    /// Raises the shared cancellation signal for the current run.
    ///
    /// Idle slots are given no further work, and in-flight attempts are
    /// interrupted at their next suspension point and treated as cancelled
    /// (accounting-neutral). Work that never observes the token still runs
    /// to physical completion in the background with its outcome discarded:
    /// stop bounds how much *new* work starts, not how long in-flight work
    /// takes to finish. Idempotent.
    ///
    /// The signal is raised inside the state critical section (cancel never
    /// blocks), so by the time this returns no dispatch pass can still hand
    /// out work under the old token.
    pub fn stop(&self) {
        self.inner.lock_state().token.cancel();
    }

    /// Discards all pending tasks and resets every counter to zero.
    ///
    /// Only valid while the scheduler is fully idle; returns
    /// [`QueueError::Busy`] (leaving state unchanged) if any worker slot is
    /// still bound.
    pub fn clear_queue(&self) -> Result<(), QueueError> {
        let mut state = self.inner.lock_state();
        if !state.all_idle() {
            return Err(QueueError::Busy);
        }
        state.pending.clear();
        state.completed = 0;
        state.failed_attempts = 0;
        state.total_added = 0;
        Ok(())
    }

    /// Starts execution and resolves once the queue drains.
    ///
    /// A synchronous-looking façade over the notification-driven scheduler:
    /// subscribes an internal drain waiter, dispatches, and returns the
    /// [`DrainReport`] the drained notification carried. The waiter is
    /// revoked before returning, so the queue can be re-run afterwards.
    pub async fn run_until_drained(&self) -> DrainReport {
        let (waiter, rx) = DrainWaiter::channel();
        let id = self
            .inner
            .dispatcher
            .subscribe(EventKind::QueueDrained, Arc::new(waiter));
        self.start_execution();
        // The sender only disappears if the waiter registration is revoked
        // out from under us (clear_subscriptions during a run).
        let report = rx.await.unwrap_or_default();
        self.inner.dispatcher.unsubscribe(id);
        report
    }

    // ---- Observers ----

    /// Registers an observer for one notification kind.
    pub fn subscribe(&self, kind: EventKind, subscriber: Arc<dyn Subscribe>) -> SubscriptionId {
        self.inner.dispatcher.subscribe(kind, subscriber)
    }

    /// Registers an observer for all three notification kinds.
    pub fn subscribe_all(&self, subscriber: Arc<dyn Subscribe>) -> Vec<SubscriptionId> {
        [
            EventKind::TaskCompleted,
            EventKind::TaskError,
            EventKind::QueueDrained,
        ]
        .into_iter()
        .map(|kind| self.subscribe(kind, Arc::clone(&subscriber)))
        .collect()
    }

    /// Revokes one subscription.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.dispatcher.unsubscribe(id)
    }

    /// Revokes every subscription, supporting a re-run of this instance
    /// with a different observer set.
    pub fn clear_subscriptions(&self) {
        self.inner.dispatcher.clear();
    }

    // ---- Read-only counters ----

    /// Tasks admitted but not yet bound to a slot.
    pub fn pending_tasks(&self) -> usize {
        self.inner.lock_state().pending.len()
    }

    /// Attempts that settled successfully since construction or the last
    /// clear.
    pub fn completed_tasks(&self) -> u64 {
        self.inner.lock_state().completed
    }

    /// Attempts that settled with an error (counted per attempt, so one
    /// task retried twice contributes 2).
    pub fn failed_tasks(&self) -> u64 {
        self.inner.lock_state().failed_attempts
    }

    /// Unique tasks admitted since construction or the last clear.
    pub fn total_tasks(&self) -> u64 {
        self.inner.lock_state().total_added
    }

    /// Size of the worker-slot table (fixed at construction).
    pub fn total_workers(&self) -> usize {
        self.inner.lock_state().slots.len()
    }

    /// True while any worker slot is bound.
    pub fn is_busy(&self) -> bool {
        !self.inner.lock_state().all_idle()
    }

    /// Snapshot of the task names currently bound to slots.
    ///
    /// Eventually consistent: a bound task may settle right after the
    /// snapshot is taken.
    pub fn active_tasks(&self) -> Vec<Arc<str>> {
        self.inner
            .lock_state()
            .slots
            .iter()
            .filter_map(|slot| slot.bound_task().cloned())
            .collect()
    }
}

/// Runs a batch of tasks to completion and returns the drain report.
///
/// Convenience façade (one call instead of construct/subscribe/start/wait):
/// builds a queue, registers each observer for all three notification
/// kinds, starts execution, and resolves once the drained notification
/// fires.
///
/// ## Example
/// ```
/// use taskpool::{run, QueueConfig, TaskError, TaskFn, TaskRef};
/// use tokio_util::sync::CancellationToken;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let tasks: Vec<TaskRef> = (0..4)
///         .map(|i| {
///             TaskFn::arc(format!("job-{i}"), |_ctx: CancellationToken| async {
///                 Ok::<_, TaskError>(())
///             }) as TaskRef
///         })
///         .collect();
///
///     let report = run(QueueConfig { workers: 2, retries: 0 }, tasks, Vec::new()).await;
///     assert_eq!(report.successful_tasks, 4);
///     assert_eq!(report.failed_tasks, 0);
///     assert_eq!(report.total_tasks, 4);
/// }
/// ```
pub async fn run(
    cfg: QueueConfig,
    tasks: Vec<TaskRef>,
    subscribers: Vec<Arc<dyn Subscribe>>,
) -> DrainReport {
    let queue = TaskQueue::with_tasks(cfg, tasks);
    for subscriber in subscribers {
        queue.subscribe_all(subscriber);
    }
    queue.run_until_drained().await
}

/// Worker loop for one bound slot.
///
/// Runs the bound record, settles it, and keeps pulling pending work until
/// the queue is empty or the run token fires. The slot stays bound between
/// consecutive attempts; it is freed only on exit, and the drain decision
/// is made in the same critical section that frees it.
async fn drive_slot(inner: Arc<Inner>, slot: usize, first: QueuedTask, token: CancellationToken) {
    let mut current = first;
    loop {
        let attempt = current.begin_attempt();
        let outcome = run_attempt(current.task.as_ref(), &token).await;

        let mut events: Vec<Event> = Vec::with_capacity(2);
        let next = {
            let mut state = inner.lock_state();

            match outcome {
                Outcome::Completed => {
                    state.completed += 1;
                    events.push(
                        Event::new(EventKind::TaskCompleted)
                            .with_task(current.task.name())
                            .with_attempt(attempt),
                    );
                }
                Outcome::Failed(err) => {
                    state.failed_attempts += 1;
                    events.push(
                        Event::new(EventKind::TaskError)
                            .with_task(current.task.name())
                            .with_attempt(attempt)
                            .with_reason(err.as_message()),
                    );
                    current.record_failure(err);
                    if current.can_retry(inner.cfg.retries) {
                        // Ownership moves back to the pending queue. The
                        // retried record goes to the back: it must not jump
                        // ahead of tasks admitted since its prior attempt.
                        state.pending.push_back(current);
                    }
                }
                Outcome::Cancelled => {
                    // Outcome unknown, not failed: no failure recorded, no
                    // retry scheduled.
                }
            }

            // Keyed on the run signal, not the attempt's outcome: a task
            // that reports Canceled while the run is live gives up its own
            // attempt only, and the slot keeps pulling pending work.
            let next = if token.is_cancelled() {
                None
            } else {
                state.pending.pop_front()
            };
            match &next {
                Some(record) => {
                    // Rebind without an idle gap so another dispatch pass
                    // cannot double-book this slot.
                    state.slots[slot] = Slot::bind(record.task.name());
                }
                None => {
                    state.slots[slot] = Slot::Idle;
                    if state.all_idle() {
                        events.push(
                            Event::new(EventKind::QueueDrained).with_report(state.report()),
                        );
                    }
                }
            }
            next
        };

        for event in &events {
            inner.dispatcher.emit(event);
        }

        match next {
            Some(record) => current = record,
            None => break,
        }
    }
}
