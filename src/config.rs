//! # Global runtime configuration.
//!
//! Provides [`Config`], the centralized settings for the supervisor.
//!
//! ## Sentinel values
//! - `fault_exit_code = None` → leave the host's default exit behavior for
//!   faulted runs (the process still exits 0 unless the embedder decides
//!   otherwise)
//! - `queue_capacity` is clamped to a minimum of 1 by the subscriber set

use std::time::Duration;

/// Global configuration for the supervisor.
///
/// ## Field semantics
/// - `grace`: upper bound on the log-drain window before the process exits
/// - `interrupt_exit_code`: process exit code reported for interrupted runs
/// - `fault_exit_code`: optional exit code for faulted (non-interrupted) runs
/// - `queue_capacity`: per-subscriber event queue depth
#[derive(Clone, Debug)]
pub struct Config {
    /// Maximum time to wait for subscriber queues to drain before exiting.
    ///
    /// This bounds the only delay in the supervisor: giving asynchronous
    /// log sinks time to flush. It is an explicit timeout, not a sleep —
    /// if all queues drain early, the supervisor returns early.
    pub grace: Duration,

    /// Exit code reported when the run was interrupted.
    ///
    /// Scheduler hosts read the process exit code, not a return value;
    /// interrupted runs must report non-zero.
    pub interrupt_exit_code: i32,

    /// Exit code for a run whose work unit faulted (and was not interrupted).
    ///
    /// - `None` → host default (the process exits with 0)
    /// - `Some(code)` → reported explicitly
    pub fault_exit_code: Option<i32>,

    /// Capacity of each subscriber's event queue.
    ///
    /// Subscribers that fall behind more than this many events have
    /// events dropped (with a warning). Minimum value is 1 (enforced by
    /// the subscriber set).
    pub queue_capacity: usize,
}

impl Config {
    /// Returns the queue capacity clamped to a minimum of 1.
    #[inline]
    pub fn queue_capacity_clamped(&self) -> usize {
        self.queue_capacity.max(1)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `grace = 5s`
    /// - `interrupt_exit_code = 1`
    /// - `fault_exit_code = None` (host default)
    /// - `queue_capacity = 1024`
    fn default() -> Self {
        Self {
            grace: Duration::from_secs(5),
            interrupt_exit_code: 1,
            fault_exit_code: None,
            queue_capacity: 1024,
        }
    }
}
