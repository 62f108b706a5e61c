//! # Function-backed work unit (`WorkFn`)
//!
//! [`WorkFn`] wraps a closure `F: Fn(CancellationToken) -> Fut`, producing
//! a fresh future when the supervisor invokes it. State that must survive
//! the call belongs in an `Arc<...>` captured by the closure.
//!
//! ## Example
//! ```rust
//! use runguard::{WorkError, WorkFn, WorkRef};
//! use tokio_util::sync::CancellationToken;
//!
//! let unit: WorkRef = WorkFn::arc("worker", |ctx: CancellationToken| async move {
//!     if ctx.is_cancelled() {
//!         return Err(WorkError::Canceled);
//!     }
//!     // do work...
//!     Ok(())
//! });
//!
//! assert_eq!(unit.name(), "worker");
//! ```

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::WorkError;
use crate::work::unit::Work;

/// Function-backed work unit implementation.
///
/// Wraps a closure that *creates* the future to run.
pub struct WorkFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> WorkFn<F> {
    /// Creates a new function-backed work unit.
    ///
    /// Prefer [`WorkFn::arc`] when you immediately need a [`WorkRef`](crate::WorkRef).
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }

    /// Creates the work unit and returns it as a shared handle
    /// (`Arc<dyn Work>`).
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

#[async_trait]
impl<F, Fut> Work for WorkFn<F>
where
    F: Fn(CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), WorkError>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, ctx: CancellationToken) -> Result<(), WorkError> {
        (self.f)(ctx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_work_fn_runs_closure() {
        let unit = WorkFn::new("double", |_ctx| async { Ok(()) });
        assert_eq!(unit.name(), "double");
        assert!(unit.run(CancellationToken::new()).await.is_ok());
    }

    #[tokio::test]
    async fn test_work_fn_observes_cancellation() {
        let unit = WorkFn::new("cancel-aware", |ctx: CancellationToken| async move {
            if ctx.is_cancelled() {
                return Err(WorkError::Canceled);
            }
            Ok(())
        });

        let token = CancellationToken::new();
        token.cancel();
        assert!(matches!(
            unit.run(token).await,
            Err(WorkError::Canceled)
        ));
    }
}
