//! Internal observer bridging the drained notification to a oneshot.
//!
//! Used by [`TaskQueue::run_until_drained`](crate::TaskQueue::run_until_drained)
//! to turn the notification-driven scheduler into a future that resolves
//! once the drain fires.

use std::sync::{Mutex, PoisonError};

use tokio::sync::oneshot;

use crate::events::{DrainReport, Event, EventKind};
use crate::subscribers::Subscribe;

/// One-shot observer that forwards the first [`EventKind::QueueDrained`]
/// report it sees and ignores everything afterwards.
pub(crate) struct DrainWaiter {
    tx: Mutex<Option<oneshot::Sender<DrainReport>>>,
}

impl DrainWaiter {
    /// Creates the waiter and the receiving half it will resolve.
    pub fn channel() -> (Self, oneshot::Receiver<DrainReport>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                tx: Mutex::new(Some(tx)),
            },
            rx,
        )
    }
}

impl Subscribe for DrainWaiter {
    fn on_event(&self, event: &Event) {
        if event.kind != EventKind::QueueDrained {
            return;
        }
        let sender = self
            .tx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(tx) = sender {
            // Receiver may already be gone if the caller was dropped.
            let _ = tx.send(event.report.unwrap_or_default());
        }
    }

    fn name(&self) -> &'static str {
        "DrainWaiter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn resolves_on_first_drain_only() {
        let (waiter, rx) = DrainWaiter::channel();
        let report = DrainReport {
            successful_tasks: 2,
            failed_tasks: 0,
            total_tasks: 2,
        };

        waiter.on_event(&Event::new(EventKind::TaskCompleted));
        waiter.on_event(&Event::new(EventKind::QueueDrained).with_report(report));
        // A second drain is ignored rather than panicking on a spent sender.
        waiter.on_event(&Event::new(EventKind::QueueDrained));

        assert_eq!(rx.await.unwrap(), report);
    }
}
