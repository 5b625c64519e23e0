//! # Event observers for the taskpool queue.
//!
//! This module provides the [`Subscribe`] trait and built-in
//! implementations for handling lifecycle events published by the
//! [`TaskQueue`](crate::TaskQueue) through its
//! [`Dispatcher`](crate::Dispatcher).
//!
//! ## Event flow
//! ```text
//! Worker settles ── emit(Event) ──► Dispatcher ──► observers for that kind
//!                                                      │
//!                                                 ┌────┴─────┬─────────┐
//!                                                 ▼          ▼         ▼
//!                                              LogWriter  Metrics   Custom
//! ```
//!
//! ## Implementing custom observers
//! ```
//! use taskpool::{Event, EventKind, Subscribe};
//!
//! struct Metrics;
//!
//! impl Subscribe for Metrics {
//!     fn on_event(&self, event: &Event) {
//!         if event.kind == EventKind::TaskError {
//!             // increment failure counter
//!         }
//!     }
//! }
//! ```

#[cfg(feature = "logging")]
mod log;
mod subscribe;
mod waiter;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use subscribe::Subscribe;
pub(crate) use waiter::DrainWaiter;
