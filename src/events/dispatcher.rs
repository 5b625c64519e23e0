//! # Observer registry keyed by event kind.
//!
//! [`Dispatcher`] delivers events to registered observers. It is held by
//! the queue as a plain field (composition): the scheduler stays a business
//! object and delegates subscribe/unsubscribe/publish here.
//!
//! ## Architecture
//! ```text
//! emit(event)
//!     │  snapshot the registrations for event.kind (lock released)
//!     ├──► observer 1 .on_event(&event)   (registration order)
//!     ├──► observer 2 .on_event(&event)
//!     └──► observer N .on_event(&event)
//! ```
//!
//! ## Rules
//! - **Synchronous delivery**: observers run inline at the emission point,
//!   in registration order.
//! - **No lock across callbacks**: the registry lock is released before any
//!   observer runs, so observers may re-enter the queue (e.g. call
//!   `add_tasks`) without deadlocking.
//! - **Independently revocable**: every subscription gets a unique
//!   [`SubscriptionId`]; [`Dispatcher::clear`] revokes all of them at once,
//!   which supports re-running one queue instance with a different
//!   observer set.
//! - **Panic isolation**: a panicking observer is caught and reported to
//!   stderr; other observers and the scheduler are unaffected.

use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Opaque handle identifying one subscription.
///
/// Returned by subscribe calls; pass it back to unsubscribe exactly that
/// registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// One registered observer.
struct Registration {
    id: SubscriptionId,
    subscriber: Arc<dyn Subscribe>,
}

/// Observer registry keyed by [`EventKind`].
///
/// Cheap to share behind the queue's `Arc`; all methods take `&self`.
pub struct Dispatcher {
    next_id: AtomicU64,
    registry: Mutex<HashMap<EventKind, Vec<Registration>>>,
}

impl Dispatcher {
    /// Creates an empty dispatcher.
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(0),
            registry: Mutex::new(HashMap::new()),
        }
    }

    /// Registers an observer for one event kind.
    ///
    /// The same observer instance may be registered for several kinds (or
    /// several times for one kind); each registration is revoked
    /// independently.
    pub fn subscribe(&self, kind: EventKind, subscriber: Arc<dyn Subscribe>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, AtomicOrdering::Relaxed));
        let mut registry = self.lock_registry();
        registry
            .entry(kind)
            .or_default()
            .push(Registration { id, subscriber });
        id
    }

    /// Revokes one subscription. Returns false if the id was not found
    /// (already revoked, or cleared).
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut registry = self.lock_registry();
        for registrations in registry.values_mut() {
            if let Some(pos) = registrations.iter().position(|r| r.id == id) {
                registrations.remove(pos);
                return true;
            }
        }
        false
    }

    /// Revokes every subscription.
    pub fn clear(&self) {
        self.lock_registry().clear();
    }

    /// Number of live registrations across all kinds.
    pub fn len(&self) -> usize {
        self.lock_registry().values().map(Vec::len).sum()
    }

    /// True if no observer is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Delivers an event to every observer registered for its kind.
    ///
    /// The registration snapshot is taken under the lock, then the lock is
    /// released before any observer runs. Observers registered from within
    /// a callback see only subsequent events.
    pub fn emit(&self, event: &Event) {
        let targets: Vec<Arc<dyn Subscribe>> = {
            let registry = self.lock_registry();
            match registry.get(&event.kind) {
                Some(registrations) => registrations
                    .iter()
                    .map(|r| Arc::clone(&r.subscriber))
                    .collect(),
                None => return,
            }
        };

        for subscriber in targets {
            let call = AssertUnwindSafe(|| subscriber.on_event(event));
            if std::panic::catch_unwind(call).is_err() {
                eprintln!(
                    "[taskpool] subscriber '{}' panicked while handling {:?}",
                    subscriber.name(),
                    event.kind
                );
            }
        }
    }

    fn lock_registry(
        &self,
    ) -> std::sync::MutexGuard<'_, HashMap<EventKind, Vec<Registration>>> {
        // A poisoned registry only means an observer panicked mid-callback;
        // the map itself is still valid.
        self.registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;

    struct Counter {
        hits: AtomicU32,
    }

    impl Counter {
        fn arc() -> Arc<Self> {
            Arc::new(Self {
                hits: AtomicU32::new(0),
            })
        }

        fn hits(&self) -> u32 {
            self.hits.load(AtomicOrdering::SeqCst)
        }
    }

    impl Subscribe for Counter {
        fn on_event(&self, _event: &Event) {
            self.hits.fetch_add(1, AtomicOrdering::SeqCst);
        }

        fn name(&self) -> &'static str {
            "counter"
        }
    }

    #[test]
    fn emit_reaches_only_matching_kind() {
        let dispatcher = Dispatcher::new();
        let completed = Counter::arc();
        let errored = Counter::arc();
        dispatcher.subscribe(EventKind::TaskCompleted, completed.clone());
        dispatcher.subscribe(EventKind::TaskError, errored.clone());

        dispatcher.emit(&Event::new(EventKind::TaskCompleted));
        dispatcher.emit(&Event::new(EventKind::TaskCompleted));
        dispatcher.emit(&Event::new(EventKind::QueueDrained));

        assert_eq!(completed.hits(), 2);
        assert_eq!(errored.hits(), 0);
    }

    #[test]
    fn unsubscribe_revokes_exactly_one_registration() {
        let dispatcher = Dispatcher::new();
        let counter = Counter::arc();
        let first = dispatcher.subscribe(EventKind::TaskCompleted, counter.clone());
        let _second = dispatcher.subscribe(EventKind::TaskCompleted, counter.clone());

        assert!(dispatcher.unsubscribe(first));
        assert!(!dispatcher.unsubscribe(first));

        dispatcher.emit(&Event::new(EventKind::TaskCompleted));
        assert_eq!(counter.hits(), 1);
    }

    #[test]
    fn clear_revokes_everything() {
        let dispatcher = Dispatcher::new();
        let counter = Counter::arc();
        dispatcher.subscribe(EventKind::TaskCompleted, counter.clone());
        dispatcher.subscribe(EventKind::QueueDrained, counter.clone());
        assert_eq!(dispatcher.len(), 2);

        dispatcher.clear();
        assert!(dispatcher.is_empty());

        dispatcher.emit(&Event::new(EventKind::TaskCompleted));
        dispatcher.emit(&Event::new(EventKind::QueueDrained));
        assert_eq!(counter.hits(), 0);
    }

    #[test]
    fn panicking_subscriber_does_not_poison_delivery() {
        struct Bomb;
        impl Subscribe for Bomb {
            fn on_event(&self, _event: &Event) {
                panic!("boom");
            }
            fn name(&self) -> &'static str {
                "bomb"
            }
        }

        let dispatcher = Dispatcher::new();
        let counter = Counter::arc();
        dispatcher.subscribe(EventKind::TaskError, Arc::new(Bomb));
        dispatcher.subscribe(EventKind::TaskError, counter.clone());

        dispatcher.emit(&Event::new(EventKind::TaskError));
        assert_eq!(counter.hits(), 1);
    }
}
