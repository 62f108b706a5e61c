//! # Asynchronous, cancelable work unit.
//!
//! A `Work` has a stable [`name`](Work::name) and an async
//! [`run`](Work::run) method that receives a [`CancellationToken`].
//! Implementors should regularly check cancellation and exit promptly when
//! the run is interrupted — interruption is cooperative notification only,
//! the future is never forcibly preempted while the process is alive.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::WorkError;

/// Shared handle to a work unit.
pub type WorkRef = Arc<dyn Work>;

/// # Caller-supplied unit of work.
///
/// Executed exactly once per process invocation by the supervisor.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use runguard::{Work, WorkError};
/// use tokio_util::sync::CancellationToken;
///
/// struct NightlyImport;
///
/// #[async_trait]
/// impl Work for NightlyImport {
///     fn name(&self) -> &str {
///         "nightly-import"
///     }
///
///     async fn run(&self, ctx: CancellationToken) -> Result<(), WorkError> {
///         if ctx.is_cancelled() {
///             return Err(WorkError::Canceled);
///         }
///         // do work...
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Work: Send + Sync + 'static {
    /// Returns a stable, human-readable name for logs.
    fn name(&self) -> &str;

    /// Executes the work until completion or cancellation.
    ///
    /// Implementations should check `ctx.is_cancelled()` at convenient
    /// points and return [`WorkError::Canceled`] to exit early.
    async fn run(&self, ctx: CancellationToken) -> Result<(), WorkError>;
}
