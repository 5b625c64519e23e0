//! Worker slot table entries.
//!
//! The scheduler owns a fixed-size `Vec<Slot>` allocated at construction.
//! A slot is either idle or bound to exactly one in-flight queued task;
//! the record itself lives with the worker future while bound, so the slot
//! only carries identification metadata.

use std::sync::Arc;

/// State of a single worker slot.
pub(crate) enum Slot {
    /// No task bound, ready for dispatch.
    Idle,

    /// Bound to one in-flight queued task.
    Busy {
        /// Name of the bound task.
        task: Arc<str>,
    },
}

impl Slot {
    /// Binds the slot to a task.
    pub fn bind(task: impl Into<Arc<str>>) -> Self {
        Slot::Busy { task: task.into() }
    }

    /// True if no task is bound.
    pub fn is_idle(&self) -> bool {
        matches!(self, Slot::Idle)
    }

    /// Name of the bound task, if any.
    pub fn bound_task(&self) -> Option<&Arc<str>> {
        match self {
            Slot::Idle => None,
            Slot::Busy { task } => Some(task),
        }
    }
}
