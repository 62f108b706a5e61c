//! # Run outcome reporting.
//!
//! [`RunReport`] is what [`Supervisor::run`](crate::Supervisor::run) hands
//! back to the embedding binary: the classified outcome, a snapshot of the
//! final lifecycle flags, and the exit code the scheduler host should
//! observe. Success and failure are observable only through the exit code
//! and the logs — the run itself never returns an error.

/// Terminal classification of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Work completed without fault and no interrupt was observed.
    Completed,
    /// Work faulted (or never completed); no interrupt was observed.
    Faulted,
    /// An interrupt was observed; interrupted classification wins even if
    /// the work also completed.
    Interrupted,
}

impl RunOutcome {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            RunOutcome::Completed => "run_completed",
            RunOutcome::Faulted => "run_faulted",
            RunOutcome::Interrupted => "run_interrupted",
        }
    }
}

/// Final report for the single run this process executed.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Terminal classification.
    pub outcome: RunOutcome,
    /// Exit code the process should report.
    ///
    /// - `Some(code)` → report explicitly (always set for interrupted runs)
    /// - `None` → leave the host default (exit 0)
    pub exit_code: Option<i32>,
    /// Final value of the `completed` flag.
    pub completed: bool,
    /// Final value of the `interrupted` flag.
    pub interrupted: bool,
    /// Whether the graceful-shutdown hook was invoked.
    pub cleanup_invoked: bool,
    /// Whether all subscriber queues drained within the grace window.
    pub logs_flushed: bool,
}

impl RunReport {
    /// True if the run completed without fault or interrupt.
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, RunOutcome::Completed)
    }

    /// Terminates the process with the reported exit code.
    ///
    /// Scheduler hosts inspect exit codes, not return values, and the
    /// interrupt path in particular must end the process explicitly —
    /// on the original platform, leaving the interrupt handler without an
    /// explicit exit stalled shutdown. This is an operational workaround
    /// for that environment, not a general design recommendation; embedders
    /// that manage their own exit can read [`RunReport::exit_code`] instead.
    pub fn exit(self) -> ! {
        std::process::exit(self.exit_code.unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_labels() {
        assert_eq!(RunOutcome::Completed.as_label(), "run_completed");
        assert_eq!(RunOutcome::Faulted.as_label(), "run_faulted");
        assert_eq!(RunOutcome::Interrupted.as_label(), "run_interrupted");
    }

    #[test]
    fn test_success_predicate() {
        let report = RunReport {
            outcome: RunOutcome::Completed,
            exit_code: None,
            completed: true,
            interrupted: false,
            cleanup_invoked: true,
            logs_flushed: true,
        };
        assert!(report.is_success());
    }
}
