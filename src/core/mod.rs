//! Scheduler core: configuration, worker slots, and the queue.
//!
//! This module contains the embedded implementation of the taskpool
//! scheduler. The public API from this module is [`QueueConfig`],
//! [`TaskQueue`], and the [`run`] façade.
//!
//! Internal modules:
//! - [`config`]: worker-count and retry-budget configuration;
//! - [`slot`]: the fixed-size worker slot table entries;
//! - [`worker`]: executes one attempt under the run's cancellation token;
//! - [`queue`]: admission, dispatch, retry, drain detection, stop/clear.

mod config;
mod queue;
mod slot;
mod worker;

pub use config::{QueueConfig, DEFAULT_WORKERS};
pub use queue::{run, TaskQueue};
