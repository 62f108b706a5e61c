//! # Lifecycle hooks: the embedder's extension points.
//!
//! [`Hooks`] is a capability set with three optional slots, each invoked at
//! a fixed point of the run lifecycle:
//!
//! - [`on_graceful_shutdown`](Hooks::on_graceful_shutdown) — the single
//!   idempotent cleanup step; runs at most once per process, from whichever
//!   of the interrupt / terminating paths gets there first;
//! - [`on_cancellation`](Hooks::on_cancellation) — runs on the interrupt
//!   path, after cleanup;
//! - [`on_exit`](Hooks::on_exit) — runs on the terminating path, only for
//!   runs that completed without interrupt.
//!
//! Every slot defaults to a no-op. Faults never escape: the supervisor
//! contains both returned errors and panics, logging them and continuing
//! with the remaining teardown steps.
//!
//! ## Example
//! ```rust
//! use runguard::{HookError, Hooks};
//!
//! struct ReleaseLockfile;
//!
//! impl Hooks for ReleaseLockfile {
//!     fn on_graceful_shutdown(&self) -> Result<(), HookError> {
//!         std::fs::remove_file("/var/run/nightly-import.lock")
//!             .map_err(|e| HookError::fail(e.to_string()))
//!     }
//! }
//! ```

use crate::error::HookError;

/// Extension points invoked during the run lifecycle.
///
/// All methods default to a no-op; implement only the slots you need.
/// Hooks receive no access to the supervisor's run state — close over your
/// own context instead.
///
/// Implementations should be quick: hooks run inline on the shutdown path
/// and delay the process exit.
pub trait Hooks: Send + Sync + 'static {
    /// Invoked on the interrupt path, after the graceful-shutdown step.
    fn on_cancellation(&self) -> Result<(), HookError> {
        Ok(())
    }

    /// Invoked on the terminating path, only when the run completed without
    /// interrupt.
    fn on_exit(&self) -> Result<(), HookError> {
        Ok(())
    }

    /// The single idempotent cleanup step; invoked at most once per
    /// process, regardless of which termination path fires first.
    fn on_graceful_shutdown(&self) -> Result<(), HookError> {
        Ok(())
    }
}

/// Default-behavior hook set: every slot is a no-op.
pub struct NoopHooks;

impl Hooks for NoopHooks {}
