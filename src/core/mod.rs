//! Runtime core: run orchestration and lifecycle.
//!
//! This module contains the embedded implementation of the run lifecycle.
//! The public API from this module is [`Supervisor`], which executes the
//! work unit, races the interrupt notification, and drives the idempotent
//! shutdown sequence, plus the [`RunReport`]/[`RunOutcome`] types it
//! returns.
//!
//! Internal modules:
//! - [`supervisor`]: executes the run and the two termination paths;
//! - [`state`]: atomic run flags with the compare-and-swap cleanup guard;
//! - [`guard`]: fault/panic containment for hooks and work units;
//! - [`report`]: the outcome handed back to the embedding binary.

pub(crate) mod guard;
mod report;
mod state;
mod supervisor;

pub use report::{RunOutcome, RunReport};
pub use supervisor::Supervisor;
