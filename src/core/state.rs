//! # Atomic run state.
//!
//! [`RunState`] is the single source of truth for the run's lifecycle
//! flags. It is mutated only by the [`Supervisor`](crate::Supervisor) and
//! read by both termination paths, which can execute on different threads
//! of the runtime — every field is atomic, and the cleanup guard is a
//! compare-and-swap rather than a check-then-set.
//!
//! ## Invariants
//! - `cleaned_up` transitions false→true at most once per process lifetime
//!   (the CAS in [`RunState::begin_cleanup`] has exactly one winner).
//! - `completed` and `interrupted` are write-once-per-direction: once true,
//!   never reset within a run.

use std::sync::atomic::{AtomicBool, Ordering};

/// Lifecycle flags for the single run this process executes.
#[derive(Debug, Default)]
pub(crate) struct RunState {
    /// Work unit returned without fault.
    completed: AtomicBool,
    /// An interrupt was observed.
    interrupted: AtomicBool,
    /// The graceful-shutdown hook has been invoked (not necessarily
    /// succeeded).
    cleaned_up: AtomicBool,
}

impl RunState {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Records that the work unit completed without fault.
    pub(crate) fn mark_completed(&self) {
        self.completed.store(true, Ordering::SeqCst);
    }

    /// Records that an interrupt was observed.
    pub(crate) fn mark_interrupted(&self) {
        self.interrupted.store(true, Ordering::SeqCst);
    }

    pub(crate) fn is_completed(&self) -> bool {
        self.completed.load(Ordering::SeqCst)
    }

    pub(crate) fn is_interrupted(&self) -> bool {
        self.interrupted.load(Ordering::SeqCst)
    }

    pub(crate) fn cleanup_invoked(&self) -> bool {
        self.cleaned_up.load(Ordering::SeqCst)
    }

    /// Claims the right to run the graceful-shutdown hook.
    ///
    /// Returns `true` for exactly one caller per process lifetime. The flag
    /// is set *before* the hook runs: "ran" means "was invoked", not
    /// "succeeded", so a failed cleanup is never retried by the other path.
    pub(crate) fn begin_cleanup(&self) -> bool {
        self.cleaned_up
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_flags_start_clear() {
        let state = RunState::new();
        assert!(!state.is_completed());
        assert!(!state.is_interrupted());
        assert!(!state.cleanup_invoked());
    }

    #[test]
    fn test_begin_cleanup_single_winner() {
        let state = RunState::new();
        assert!(state.begin_cleanup());
        assert!(!state.begin_cleanup());
        assert!(state.cleanup_invoked());
    }

    #[test]
    fn test_begin_cleanup_concurrent_single_winner() {
        let state = Arc::new(RunState::new());
        let mut handles = Vec::new();

        for _ in 0..16 {
            let state = Arc::clone(&state);
            handles.push(std::thread::spawn(move || state.begin_cleanup()));
        }

        let wins: usize = handles
            .into_iter()
            .map(|h| usize::from(h.join().unwrap()))
            .sum();
        assert_eq!(wins, 1);
    }

    #[test]
    fn test_marks_are_sticky() {
        let state = RunState::new();
        state.mark_completed();
        state.mark_interrupted();
        state.mark_completed();
        assert!(state.is_completed());
        assert!(state.is_interrupted());
    }
}
