//! # Interrupt notification sources.
//!
//! [`SignalSource`] abstracts where "stop this run" requests come from, so
//! the supervisor is constructible and testable without binding to real OS
//! signals. Two implementations ship with the crate:
//!
//! - [`OsSignals`] — production source backed by `tokio::signal`;
//! - [`ManualTrigger`] — synthesizes interrupts on demand (tests, embedders
//!   that expose their own stop entry point).
//!
//! ## Signals
//! **Unix platforms:**
//! - `SIGINT` (Ctrl-C in terminal)
//! - `SIGTERM` (default kill signal, used by systemd/Kubernetes)
//! - `SIGQUIT` (quit signal, often used for core dumps or hard stop)
//!
//! **Windows platforms:**
//! - `Ctrl-C` via [`tokio::signal::ctrl_c`]
//!
//! There is no OS analog of the unconditional process-terminating
//! notification here: that sequence is owned and driven by
//! [`Supervisor::run`](crate::Supervisor::run) itself, exactly once per
//! process.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Source of operator interrupt notifications.
///
/// `interrupted` resolves when a stop request is observed. It may resolve
/// at most once meaningfully; the supervisor stops polling after the first
/// observation. Registration failures are returned as `Err` — the
/// supervisor logs them and disarms the interrupt branch instead of
/// propagating.
#[async_trait]
pub trait SignalSource: Send + Sync {
    /// Completes when an interrupt is requested.
    async fn interrupted(&self) -> std::io::Result<()>;
}

/// Production interrupt source: OS termination signals.
///
/// Each call to `interrupted` creates independent signal listeners.
pub struct OsSignals;

#[cfg(unix)]
#[async_trait]
impl SignalSource for OsSignals {
    async fn interrupted(&self) -> std::io::Result<()> {
        use tokio::signal::unix::{SignalKind, signal};

        let mut sigint = signal(SignalKind::interrupt())?;
        let mut sigterm = signal(SignalKind::terminate())?;
        let mut sigquit = signal(SignalKind::quit())?;

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = sigint.recv()  => {},
            _ = sigterm.recv() => {},
            _ = sigquit.recv() => {},
        }
        Ok(())
    }
}

#[cfg(not(unix))]
#[async_trait]
impl SignalSource for OsSignals {
    async fn interrupted(&self) -> std::io::Result<()> {
        tokio::signal::ctrl_c().await
    }
}

/// Interrupt source that fires when [`trigger`](ManualTrigger::trigger) is
/// called.
///
/// Useful for tests and for embedders that need a manual cancellation entry
/// point alongside (or instead of) OS signals. Cloning shares the trigger:
/// any clone can fire it, all waiters observe it.
#[derive(Clone, Default)]
pub struct ManualTrigger {
    token: CancellationToken,
}

impl ManualTrigger {
    /// Creates an untriggered source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests an interrupt. Idempotent: repeated calls have no further
    /// effect.
    pub fn trigger(&self) {
        self.token.cancel();
    }

    /// True if the trigger has fired.
    pub fn is_triggered(&self) -> bool {
        self.token.is_cancelled()
    }
}

#[async_trait]
impl SignalSource for ManualTrigger {
    async fn interrupted(&self) -> std::io::Result<()> {
        self.token.cancelled().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_manual_trigger_wakes_waiter() {
        let trigger = ManualTrigger::new();
        let waiter = trigger.clone();

        let handle = tokio::spawn(async move { waiter.interrupted().await });
        trigger.trigger();

        assert!(handle.await.unwrap().is_ok());
        assert!(trigger.is_triggered());
    }

    #[tokio::test]
    async fn test_trigger_is_idempotent() {
        let trigger = ManualTrigger::new();
        trigger.trigger();
        trigger.trigger();
        assert!(trigger.interrupted().await.is_ok());
    }
}
