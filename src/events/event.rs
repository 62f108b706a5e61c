//! # Lifecycle events emitted by the supervisor.
//!
//! The [`EventKind`] enum classifies events across the run lifecycle:
//! - **Progress events**: run starting, work complete, cleanup started
//! - **Fault events**: work/final-action/hook failures (always contained)
//! - **Terminal classification**: interrupted, incomplete, or finished run
//!
//! The [`Event`] struct carries metadata: a monotonic sequence number,
//! wall-clock timestamp, the subject (work or hook name), and an optional
//! fault reason.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Per-subscriber delivery is FIFO, so a single sink observes
//! events in publication order.
//!
//! ## Example
//! ```rust
//! use runguard::{Event, EventKind, Severity};
//!
//! let ev = Event::new(EventKind::WorkFaulted)
//!     .with_subject("nightly-import")
//!     .with_reason("connection refused");
//!
//! assert_eq!(ev.kind, EventKind::WorkFaulted);
//! assert_eq!(ev.kind.severity(), Severity::Critical);
//! assert_eq!(ev.subject.as_deref(), Some("nightly-import"));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Log level attached to an [`EventKind`].
///
/// Mirrors the four levels the run lifecycle distinguishes: progress,
/// degraded-but-continuing, contained hook faults, and terminal failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Normal progress.
    Info,
    /// Degraded but continuing (interrupt notice, cleanup hook fault).
    Warning,
    /// Contained fault in a hook or final action.
    Error,
    /// Work fault or terminal failure classification.
    Critical,
}

/// Classification of run lifecycle events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Progress events ===
    /// Run is starting; emitted before the work unit is invoked.
    ///
    /// Sets:
    /// - `subject`: work name
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    RunStarting,

    /// Work unit returned without fault.
    ///
    /// Sets:
    /// - `subject`: work name
    /// - `at`, `seq`
    RunCompleted,

    /// Graceful-shutdown cleanup is being invoked (at most once per process).
    ///
    /// Sets:
    /// - `at`, `seq`
    CleanupStarted,

    // === Fault events (always contained) ===
    /// Work unit raised a fault; the run is recorded as incomplete.
    ///
    /// Sets:
    /// - `subject`: work name
    /// - `reason`: failure message
    /// - `at`, `seq`
    WorkFaulted,

    /// Final action raised a fault; the exit sequence still proceeds.
    ///
    /// Sets:
    /// - `subject`: final action name
    /// - `reason`: failure message
    /// - `at`, `seq`
    FinalActionFaulted,

    /// Graceful-shutdown hook raised a fault or panicked.
    ///
    /// Sets:
    /// - `reason`: failure message
    /// - `at`, `seq`
    CleanupFailed,

    /// A cancellation or exit hook raised a fault or panicked.
    ///
    /// Sets:
    /// - `subject`: hook name (`"on_cancellation"` / `"on_exit"`)
    /// - `reason`: failure message
    /// - `at`, `seq`
    HookFaulted,

    // === Interrupt path ===
    /// An operator interrupt was observed.
    ///
    /// Sets:
    /// - `at`, `seq`
    InterruptRequested,

    /// Interrupt signal listeners could not be registered; the interrupt
    /// branch is disarmed for this run.
    ///
    /// Sets:
    /// - `reason`: registration error
    /// - `at`, `seq`
    SignalBindFailed,

    // === Terminal classification ===
    /// Terminal: the run was interrupted (exit hook skipped).
    ///
    /// Sets:
    /// - `at`, `seq`
    RunInterrupted,

    /// Terminal: the work unit did not complete (exit hook skipped).
    ///
    /// Sets:
    /// - `at`, `seq`
    RunIncomplete,

    /// Terminal: the run completed and the exit sequence finished.
    ///
    /// Sets:
    /// - `at`, `seq`
    RunFinished,
}

impl EventKind {
    /// Returns the log level for this event kind.
    ///
    /// Severity discipline: critical for work faults and terminal failure
    /// classification, error for cancellation/exit hook and final-action
    /// faults, warning for the interrupt notice and cleanup hook faults,
    /// info for progress.
    pub fn severity(&self) -> Severity {
        match self {
            EventKind::RunStarting
            | EventKind::RunCompleted
            | EventKind::CleanupStarted
            | EventKind::RunFinished => Severity::Info,
            EventKind::InterruptRequested
            | EventKind::CleanupFailed
            | EventKind::SignalBindFailed => Severity::Warning,
            EventKind::FinalActionFaulted | EventKind::HookFaulted => Severity::Error,
            EventKind::WorkFaulted | EventKind::RunInterrupted | EventKind::RunIncomplete => {
                Severity::Critical
            }
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            EventKind::RunStarting => "run_starting",
            EventKind::RunCompleted => "run_completed",
            EventKind::CleanupStarted => "cleanup_started",
            EventKind::WorkFaulted => "work_faulted",
            EventKind::FinalActionFaulted => "final_action_faulted",
            EventKind::CleanupFailed => "cleanup_failed",
            EventKind::HookFaulted => "hook_faulted",
            EventKind::InterruptRequested => "interrupt_requested",
            EventKind::SignalBindFailed => "signal_bind_failed",
            EventKind::RunInterrupted => "run_interrupted",
            EventKind::RunIncomplete => "run_incomplete",
            EventKind::RunFinished => "run_finished",
        }
    }
}

/// Lifecycle event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Name of the work unit or hook this event concerns, if applicable.
    pub subject: Option<Arc<str>>,
    /// Human-readable fault reason (error message, panic payload).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with the current timestamp and
    /// next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            subject: None,
            reason: None,
        }
    }

    /// Attaches the work unit or hook name.
    #[inline]
    pub fn with_subject(mut self, subject: impl Into<Arc<str>>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Attaches a human-readable fault reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// True if this event marks the terminal classification of the run.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.kind,
            EventKind::RunInterrupted | EventKind::RunIncomplete | EventKind::RunFinished
        )
    }
}
