//! # Core observer trait
//!
//! `Subscribe` is the extension point for plugging custom event handlers
//! into the queue. Observers are invoked synchronously at the emission
//! point, in registration order.
//!
//! ## Contract
//! - Implementations must be fast and non-blocking: they run inline on the
//!   worker that settled the task. Hand slow work (I/O, batching) off to a
//!   channel or spawned task instead.
//! - Observers may re-enter the queue — in particular
//!   [`TaskQueue::add_tasks`](crate::TaskQueue::add_tasks) is safe to call
//!   from inside a callback. There is no guarantee a callback runs before
//!   the scheduler's next step; communicate only through the event data.
//! - A panicking observer is isolated: the panic is caught and reported,
//!   and delivery continues.

use crate::events::Event;

/// Contract for queue event observers.
pub trait Subscribe: Send + Sync + 'static {
    /// Handles a single event.
    ///
    /// # Parameters
    /// - `event`: Reference to the event (does not transfer ownership)
    fn on_event(&self, event: &Event);

    /// Human-readable name (for logs/metrics).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
