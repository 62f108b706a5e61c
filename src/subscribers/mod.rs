//! # Event subscribers for the run lifecycle.
//!
//! This module provides the [`Subscribe`] trait and the fan-out machinery
//! that delivers lifecycle events to sinks without blocking the supervisor.
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   Supervisor ── emit(Event) ──► SubscriberSet
//!                                     │
//!                                ┌────┴────┬─────────┐
//!                                ▼         ▼         ▼
//!                            LogWriter  Metrics   Custom ...
//! ```
//!
//! ## Subscriber types
//! - **Passive subscribers** — observe and react to events (logging,
//!   metrics, alerting)
//! - **Stateful subscribers** — accumulate state from events (used by the
//!   in-crate tests to record delivery order)
//!
//! ## Implementing custom subscribers
//! ```rust
//! use runguard::{Event, EventKind, Subscribe};
//! use async_trait::async_trait;
//!
//! struct FailureCounter;
//!
//! #[async_trait]
//! impl Subscribe for FailureCounter {
//!     async fn on_event(&self, event: &Event) {
//!         if event.kind == EventKind::WorkFaulted {
//!             // increment failure counter
//!         }
//!     }
//!     fn name(&self) -> &'static str {
//!         "failure-counter"
//!     }
//! }
//! ```

mod set;
mod subscriber;

#[cfg(feature = "logging")]
mod log;

pub use set::SubscriberSet;
pub use subscriber::Subscribe;

#[cfg(feature = "logging")]
pub use log::LogWriter;
