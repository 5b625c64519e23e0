//! Lifecycle notifications: data model and observer dispatch.
//!
//! This module groups the event **data model** and the **dispatcher** used
//! to deliver notifications emitted by the scheduler to registered
//! observers.
//!
//! ## Contents
//! - [`EventKind`], [`Event`], [`DrainReport`] — classification and payload
//! - [`Dispatcher`], [`SubscriptionId`] — observer registry keyed by kind
//!
//! ## Quick reference
//! - **Publisher**: the [`TaskQueue`](crate::TaskQueue) scheduler, at the
//!   moment a task settles or a drain completes.
//! - **Consumers**: anything implementing [`Subscribe`](crate::Subscribe),
//!   registered per [`EventKind`] through the queue's subscription API.

mod dispatcher;
mod event;

pub use dispatcher::{Dispatcher, SubscriptionId};
pub use event::{DrainReport, Event, EventKind};
