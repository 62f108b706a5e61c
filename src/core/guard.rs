//! # Fault containment for hooks and work units.
//!
//! Nothing invoked during the run lifecycle is allowed to escape as an
//! unhandled fault: an unwinding hook during teardown would pollute the
//! host's crash reporting and mask the real failure. Every hook call and
//! work-unit future is wrapped here — returned errors and panics are both
//! flattened into a printable fault message for the event stream.

use std::panic::AssertUnwindSafe;

use crate::error::HookError;

/// Invokes a hook, containing both returned errors and panics.
///
/// Returns the fault message on failure; `Ok(())` means the hook ran to
/// completion.
pub(crate) fn contain_hook<F>(f: F) -> Result<(), String>
where
    F: FnOnce() -> Result<(), HookError>,
{
    match std::panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) => Err(err.to_string()),
        Err(payload) => Err(format!("panic: {}", panic_message(&*payload))),
    }
}

/// Extracts a printable message from a panic payload.
pub(crate) fn panic_message(err: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = err.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = err.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
