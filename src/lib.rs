//! # runguard
//!
//! **Runguard** is a lifecycle supervisor for one-shot scheduled tasks.
//!
//! It runs a caller-supplied unit of work while coordinating three
//! asynchronous termination sources — normal completion, an operator
//! interrupt (console break / service stop), and the unconditional
//! exit sequence every run must pass through — with the ordering and
//! idempotence discipline those paths require: interrupt and completion
//! can race, graceful-shutdown cleanup runs exactly once no matter which
//! path triggers it first, and no hook invoked during teardown can escape
//! as an unhandled fault.
//!
//! ## Architecture
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │   WorkRef    │   │ SignalSource │   │  Arc<Hooks>  │
//!     │ (user work)  │   │ (OS / manual)│   │ (extension)  │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────┐
//! │  Supervisor (one run per process)                             │
//! │  - RunState (atomic flags, CAS-guarded cleanup)               │
//! │  - races work / final action against the interrupt future    │
//! │  - interrupt path: cleanup → on_cancellation → terminating   │
//! │  - terminating path: cleanup → classify → on_exit            │
//! └──────────────────────────────┬────────────────────────────────┘
//!                                │ emit(Event)
//!                                ▼
//! ┌───────────────────────────────────────────────────────────────┐
//! │  SubscriberSet (bounded per-subscriber queues + workers)      │
//! └───────┬──────────────────────┬────────────────────────────────┘
//!         ▼                      ▼
//!     LogWriter              custom Subscribe impls
//!     (tracing)              (metrics, alerting, ...)
//! ```
//!
//! ## Lifecycle
//! ```text
//! run(signals, work, final_action)
//!   ├─► emit RunStarting
//!   ├─► select { work, interrupt }
//!   │       ├─ Ok    ─► completed = true, emit RunCompleted
//!   │       ├─ Err   ─► emit WorkFaulted (contained)
//!   │       └─ intr  ─► interrupt path
//!   ├─► select { final_action, interrupt }   (fault contained)
//!   ├─► terminating path (exactly once):
//!   │       ├─ cleanup (CAS-guarded, at most once per process)
//!   │       ├─ interrupted  ─► RunInterrupted, skip on_exit
//!   │       ├─ !completed   ─► RunIncomplete, skip on_exit
//!   │       └─ else         ─► on_exit (contained), RunFinished
//!   └─► drain subscriber queues (bounded by Config::grace)
//!         ─► RunReport { outcome, exit_code, ... }
//! ```
//!
//! ## Features
//! | Area            | Description                                             | Key types / traits            |
//! |-----------------|---------------------------------------------------------|-------------------------------|
//! | **Supervision** | Run one work unit with coordinated termination paths.   | [`Supervisor`], [`RunReport`] |
//! | **Work units**  | Define the task body as a trait impl or closure.        | [`Work`], [`WorkFn`]          |
//! | **Hooks**       | Extend cancellation/exit/cleanup, faults contained.     | [`Hooks`], [`NoopHooks`]      |
//! | **Signals**     | Injectable interrupt sources, OS or manual.             | [`SignalSource`], [`OsSignals`], [`ManualTrigger`] |
//! | **Events**      | Lifecycle events with severities, fan-out delivery.     | [`Event`], [`EventKind`], [`Subscribe`] |
//! | **Errors**      | Typed errors for work units and hooks.                  | [`WorkError`], [`HookError`]  |
//! | **Configuration** | Exit codes and the log-drain grace window.            | [`Config`]                    |
//!
//! ## Optional features
//! - `logging`: exports [`LogWriter`], a `tracing`-backed subscriber.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use runguard::{Config, NoopHooks, OsSignals, Supervisor, WorkError, WorkFn, WorkRef};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let sup = Supervisor::new(Config::default(), Arc::new(NoopHooks), Vec::new());
//!
//!     let work: WorkRef = WorkFn::arc("nightly-import", |ctx: CancellationToken| async move {
//!         if ctx.is_cancelled() {
//!             return Err(WorkError::Canceled);
//!         }
//!         // import things...
//!         Ok(())
//!     });
//!
//!     let report = sup.run(&OsSignals, work, None).await;
//!     # assert!(report.is_success());
//!     // In a real binary: report.exit()
//! }
//! ```

mod config;
mod core;
mod error;
mod events;
mod hooks;
mod signals;
mod subscribers;
mod work;

// ---- Public re-exports ----

pub use config::Config;
pub use core::{RunOutcome, RunReport, Supervisor};
pub use error::{HookError, WorkError};
pub use events::{Event, EventKind, Severity};
pub use hooks::{Hooks, NoopHooks};
pub use signals::{ManualTrigger, OsSignals, SignalSource};
pub use subscribers::{Subscribe, SubscriberSet};
pub use work::{Work, WorkFn, WorkRef};

// Optional: expose the built-in tracing-backed logging subscriber.
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
