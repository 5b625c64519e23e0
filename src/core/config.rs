//! # Queue configuration.
//!
//! Provides [`QueueConfig`], the settings a [`TaskQueue`](crate::TaskQueue)
//! is constructed with.
//!
//! ## Sentinel values
//! - `workers = 0` → silently normalized to [`DEFAULT_WORKERS`]. A zero-size
//!   pool can never make progress, so the invalid value falls back to the
//!   default instead of erroring. This leniency is deliberate and part of
//!   the public contract; use [`QueueConfig::worker_count`] to read the
//!   normalized value.
//! - `retries = 0` → no retry, one attempt only. `retries = R` allows up to
//!   `R + 1` attempts per task.

/// Worker-slot count used when the configured value is unusable.
pub const DEFAULT_WORKERS: usize = 30;

/// Configuration for a [`TaskQueue`](crate::TaskQueue).
///
/// ## Field semantics
/// - `workers`: size of the fixed worker-slot table (`0` = use
///   [`DEFAULT_WORKERS`]; the table is never resized after construction)
/// - `retries`: retry budget per task (`0` = single attempt)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueueConfig {
    /// Number of logical worker slots.
    pub workers: usize,
    /// Maximum additional attempts after the first failure.
    pub retries: u32,
}

impl QueueConfig {
    /// Returns the normalized worker count (sentinel `0` replaced by the
    /// default).
    #[inline]
    pub fn worker_count(&self) -> usize {
        if self.workers == 0 {
            DEFAULT_WORKERS
        } else {
            self.workers
        }
    }
}

impl Default for QueueConfig {
    /// Default configuration:
    ///
    /// - `workers = 30` (the documented pool-size default)
    /// - `retries = 0` (one attempt only)
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            retries: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_workers_falls_back_to_default() {
        let cfg = QueueConfig {
            workers: 0,
            retries: 0,
        };
        assert_eq!(cfg.worker_count(), DEFAULT_WORKERS);
    }

    #[test]
    fn explicit_worker_count_is_kept() {
        let cfg = QueueConfig {
            workers: 5,
            retries: 2,
        };
        assert_eq!(cfg.worker_count(), 5);
    }

    #[test]
    fn default_matches_documented_values() {
        let cfg = QueueConfig::default();
        assert_eq!(cfg.workers, 30);
        assert_eq!(cfg.retries, 0);
    }
}
