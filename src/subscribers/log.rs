//! # Built-in logging subscriber.
//!
//! [`LogWriter`] renders lifecycle events as structured `tracing` records
//! at the severity each [`EventKind`](crate::events::EventKind) declares.
//!
//! ## Output format
//! ```text
//! INFO  run_starting subject=nightly-import "task starting"
//! WARN  interrupt_requested "interrupt invoked"
//! ERROR hook_faulted subject=on_exit reason="hook failed: ..." "lifecycle hook failed"
//! ERROR run_interrupted "interrupted run"
//! ```
//!
//! Enabled via the `logging` feature. The embedding binary is responsible
//! for installing a `tracing` subscriber (e.g. `tracing-subscriber`'s fmt
//! layer); `LogWriter` only emits records.

use async_trait::async_trait;

use crate::events::{Event, EventKind, Severity};
use crate::subscribers::Subscribe;

/// Structured-logging subscriber backed by `tracing`.
///
/// Maps event severity to `tracing` levels: `Critical` and `Error` become
/// `error!` records (`tracing` has no separate critical level; critical
/// events carry `critical = true`), `Warning` becomes `warn!`, `Info`
/// becomes `info!`.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Creates a new log writer.
    pub fn new() -> Self {
        Self
    }
}

/// Static message for an event kind, matching the run lifecycle narration.
fn message(kind: EventKind) -> &'static str {
    match kind {
        EventKind::RunStarting => "task starting",
        EventKind::RunCompleted => "task complete",
        EventKind::CleanupStarted => "task clean up",
        EventKind::WorkFaulted => "work unit faulted",
        EventKind::FinalActionFaulted => "final action faulted",
        EventKind::CleanupFailed => "cleanup hook failed",
        EventKind::HookFaulted => "lifecycle hook failed",
        EventKind::InterruptRequested => "interrupt invoked",
        EventKind::SignalBindFailed => "signal registration failed",
        EventKind::RunInterrupted => "interrupted run",
        EventKind::RunIncomplete => "incomplete run",
        EventKind::RunFinished => "run complete",
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, event: &Event) {
        let kind = event.kind.as_label();
        let subject = event.subject.as_deref();
        let reason = event.reason.as_deref();

        match event.kind.severity() {
            Severity::Info => {
                tracing::info!(seq = event.seq, kind, subject, "{}", message(event.kind));
            }
            Severity::Warning => {
                tracing::warn!(
                    seq = event.seq,
                    kind,
                    subject,
                    reason,
                    "{}",
                    message(event.kind)
                );
            }
            Severity::Error => {
                tracing::error!(
                    seq = event.seq,
                    kind,
                    subject,
                    reason,
                    "{}",
                    message(event.kind)
                );
            }
            Severity::Critical => {
                tracing::error!(
                    seq = event.seq,
                    kind,
                    subject,
                    reason,
                    critical = true,
                    "{}",
                    message(event.kind)
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "log-writer"
    }
}
