//! Work units: the caller-supplied task body.
//!
//! This module defines the [`Work`] trait (async, cancelable) and a
//! function-backed implementation [`WorkFn`]. The common handle type is
//! [`WorkRef`], an `Arc<dyn Work>` suitable for handing to the supervisor.
//!
//! A work unit receives a [`CancellationToken`](tokio_util::sync::CancellationToken)
//! and should periodically check it to stop cooperatively when the run is
//! interrupted.

mod unit;
mod work_fn;

pub use unit::{Work, WorkRef};
pub use work_fn::WorkFn;
