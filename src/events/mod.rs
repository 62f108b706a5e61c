//! Lifecycle events: data model and severity classification.
//!
//! This module groups the event **data model** emitted by the supervisor
//! during a run. Events are fanned out to subscribers by the
//! [`SubscriberSet`](crate::subscribers::SubscriberSet); the built-in
//! [`LogWriter`](crate::subscribers::LogWriter) renders them as structured
//! log lines.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] — event classification and payload metadata
//! - [`Severity`] — log level attached to each kind
//!
//! ## Quick reference
//! - **Publisher**: [`Supervisor`](crate::Supervisor) (single publisher,
//!   one run per process).
//! - **Consumers**: subscriber workers owned by the
//!   [`SubscriberSet`](crate::subscribers::SubscriberSet).

mod event;

pub use event::{Event, EventKind, Severity};
