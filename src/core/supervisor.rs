//! # Supervisor: runs one work unit and coordinates its termination paths.
//!
//! The [`Supervisor`] owns the run state, the hook set, and the subscriber
//! fan-out. It executes the work unit while racing the interrupt
//! notification, then drives the shutdown sequence exactly once — from
//! whichever termination path gets there first.
//!
//! ## High-level flow
//! ```text
//! run(signals, work, final_action):
//!   emit RunStarting
//!   select { work ─► RunCompleted / WorkFaulted
//!          , interrupt ─► interrupt path }
//!   select { final_action ─► (FinalActionFaulted on fault)
//!          , interrupt ─► interrupt path }
//!   terminating path
//!   drain subscriber queues (bounded by Config::grace)
//!   ─► RunReport
//!
//! Interrupt path:                    Terminating path:
//!   mark interrupted                   cleanup (CAS-guarded)
//!   emit InterruptRequested            classify:
//!   cleanup (CAS-guarded)                interrupted ─► RunInterrupted
//!   on_cancellation (contained)          !completed  ─► RunIncomplete
//!   ─► terminating path                  else ─► on_exit (contained)
//!                                               emit RunFinished
//! ```
//!
//! ## Rules
//! - The terminating path runs **exactly once** per process, whichever
//!   path reaches it first.
//! - The cleanup hook is guarded by an atomic compare-and-swap: both paths
//!   may attempt it concurrently, exactly one invocation happens.
//! - Interrupted classification wins over completed (the flags can both be
//!   true when completion and interrupt race).
//! - No hook, work unit, or final action fault escapes `run` — errors and
//!   panics are contained and surface as events.
//! - The only delay is the final queue drain, bounded by [`Config::grace`].

use std::panic::AssertUnwindSafe;
use std::pin::pin;
use std::sync::Arc;

use futures::FutureExt;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::core::guard::{contain_hook, panic_message};
use crate::core::report::{RunOutcome, RunReport};
use crate::core::state::RunState;
use crate::error::WorkError;
use crate::events::{Event, EventKind};
use crate::hooks::Hooks;
use crate::signals::SignalSource;
use crate::subscribers::{Subscribe, SubscriberSet};
use crate::work::WorkRef;

/// Coordinates one work unit, the interrupt path, and the terminating path.
///
/// Constructed without any OS binding; the signal source is supplied to
/// [`run`](Supervisor::run) explicitly so the supervisor is testable with a
/// synthesized source.
pub struct Supervisor {
    cfg: Config,
    hooks: Arc<dyn Hooks>,
    subs: SubscriberSet,
    state: RunState,
}

impl Supervisor {
    /// Creates a supervisor with the given configuration, hook set, and
    /// subscribers.
    ///
    /// Pass [`NoopHooks`](crate::NoopHooks) for default hook behavior and
    /// an empty subscriber list to run without observability sinks.
    pub fn new(cfg: Config, hooks: Arc<dyn Hooks>, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        let subs = SubscriberSet::new(subscribers, cfg.queue_capacity_clamped());
        Self {
            cfg,
            hooks,
            subs,
            state: RunState::new(),
        }
    }

    /// Executes `work` (and then `final_action`, if supplied) while racing
    /// the interrupt notification, drives the shutdown sequence, flushes
    /// the subscriber queues, and reports the outcome.
    ///
    /// Consumes the supervisor: this process runs exactly one work unit.
    ///
    /// ### Behavior
    /// - Work faults are logged critical and contained; the run is then
    ///   classified incomplete.
    /// - A `final_action` fault is logged and contained; it never prevents
    ///   the terminating path.
    /// - An interrupt observed at any point before classification makes
    ///   the run interrupted, even if the work also completed.
    /// - Nothing here blocks indefinitely: the final drain is bounded by
    ///   [`Config::grace`].
    ///
    /// The caller turns the report into a process exit via
    /// [`RunReport::exit`].
    pub async fn run<S: SignalSource>(
        self,
        signals: &S,
        work: WorkRef,
        final_action: Option<WorkRef>,
    ) -> RunReport {
        let token = CancellationToken::new();

        let interrupted = {
            let mut interrupt = pin!(self.watch_interrupt(signals));
            let mut interrupted = false;

            self.emit(Event::new(EventKind::RunStarting).with_subject(work.name().to_string()));

            tokio::select! {
                res = Self::run_contained(&work, &token) => self.record_work(&work, res),
                _ = &mut interrupt => interrupted = true,
            }

            if !interrupted {
                if let Some(action) = final_action {
                    tokio::select! {
                        res = Self::run_contained(&action, &token) => {
                            self.record_final_action(&action, res);
                        }
                        _ = &mut interrupt => interrupted = true,
                    }
                }
            }

            interrupted
        };

        if interrupted {
            token.cancel();
            self.interrupt_sequence();
        } else {
            self.terminating();
        }

        self.finish().await
    }

    /// Resolves when the signal source reports an interrupt.
    ///
    /// A registration failure disarms this branch for the rest of the run:
    /// it is logged as a warning and the future never resolves, so the run
    /// proceeds as if no interrupt can arrive.
    async fn watch_interrupt<S: SignalSource>(&self, signals: &S) {
        if let Err(err) = signals.interrupted().await {
            self.emit(Event::new(EventKind::SignalBindFailed).with_reason(err.to_string()));
            std::future::pending::<()>().await;
        }
    }

    /// Runs one unit with panic containment, mirroring how subscriber
    /// workers isolate panics.
    async fn run_contained(unit: &WorkRef, token: &CancellationToken) -> Result<(), WorkError> {
        let fut = unit.run(token.child_token());
        match AssertUnwindSafe(fut).catch_unwind().await {
            Ok(res) => res,
            Err(payload) => Err(WorkError::fail(format!(
                "panic: {}",
                panic_message(&*payload)
            ))),
        }
    }

    /// Records the work unit's result: completion marks the flag, a fault
    /// is logged critical and swallowed so the shutdown sequence still
    /// runs.
    fn record_work(&self, work: &WorkRef, res: Result<(), WorkError>) {
        match res {
            Ok(()) => {
                self.state.mark_completed();
                self.emit(
                    Event::new(EventKind::RunCompleted).with_subject(work.name().to_string()),
                );
            }
            Err(err) => {
                self.emit(
                    Event::new(EventKind::WorkFaulted)
                        .with_subject(work.name().to_string())
                        .with_reason(err.as_message()),
                );
            }
        }
    }

    /// Records the final action's result; a fault must never prevent the
    /// process from reaching its exit sequence.
    fn record_final_action(&self, action: &WorkRef, res: Result<(), WorkError>) {
        if let Err(err) = res {
            self.emit(
                Event::new(EventKind::FinalActionFaulted)
                    .with_subject(action.name().to_string())
                    .with_reason(err.as_message()),
            );
        }
    }

    /// The interrupt path. Each step is best-effort and independently
    /// contained: a fault in one step never blocks the next.
    fn interrupt_sequence(&self) {
        self.state.mark_interrupted();
        self.emit(Event::new(EventKind::InterruptRequested));

        self.cleanup_once();

        if let Err(reason) = contain_hook(|| self.hooks.on_cancellation()) {
            self.emit(
                Event::new(EventKind::HookFaulted)
                    .with_subject("on_cancellation")
                    .with_reason(reason),
            );
        }

        self.terminating();
    }

    /// The terminating path. Reached exactly once per process: from the
    /// interrupt path, or directly after the work/final-action phase.
    fn terminating(&self) {
        self.cleanup_once();

        if self.state.is_interrupted() {
            self.emit(Event::new(EventKind::RunInterrupted));
            return;
        }
        if !self.state.is_completed() {
            self.emit(Event::new(EventKind::RunIncomplete));
            return;
        }

        if let Err(reason) = contain_hook(|| self.hooks.on_exit()) {
            self.emit(
                Event::new(EventKind::HookFaulted)
                    .with_subject("on_exit")
                    .with_reason(reason),
            );
        }

        self.emit(Event::new(EventKind::RunFinished));
    }

    /// Runs the graceful-shutdown hook at most once per process.
    ///
    /// Both termination paths call this; the CAS in `begin_cleanup` picks
    /// exactly one winner, and the flag records "was invoked", not
    /// "succeeded" — a failed cleanup is not retried by the other path.
    fn cleanup_once(&self) {
        if !self.state.begin_cleanup() {
            return;
        }

        self.emit(Event::new(EventKind::CleanupStarted));

        if let Err(reason) = contain_hook(|| self.hooks.on_graceful_shutdown()) {
            self.emit(Event::new(EventKind::CleanupFailed).with_reason(reason));
        }
    }

    /// Classifies the outcome, drains the subscriber queues within the
    /// grace window, and builds the report.
    async fn finish(self) -> RunReport {
        let completed = self.state.is_completed();
        let interrupted = self.state.is_interrupted();
        let cleanup_invoked = self.state.cleanup_invoked();

        let outcome = if interrupted {
            RunOutcome::Interrupted
        } else if completed {
            RunOutcome::Completed
        } else {
            RunOutcome::Faulted
        };

        let exit_code = match outcome {
            RunOutcome::Interrupted => Some(self.cfg.interrupt_exit_code),
            RunOutcome::Faulted => self.cfg.fault_exit_code,
            RunOutcome::Completed => None,
        };

        let logs_flushed = self.subs.drain(self.cfg.grace).await;

        RunReport {
            outcome,
            exit_code,
            completed,
            interrupted,
            cleanup_invoked,
            logs_flushed,
        }
    }

    fn emit(&self, ev: Event) {
        self.subs.emit(ev);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HookError;
    use crate::hooks::NoopHooks;
    use crate::signals::ManualTrigger;
    use crate::work::WorkFn;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    /// Hook set that counts invocations and can be configured to fault.
    #[derive(Default)]
    struct ProbeHooks {
        cancellation_calls: AtomicUsize,
        exit_calls: AtomicUsize,
        cleanup_calls: AtomicUsize,
        fail_cleanup: bool,
        fail_exit: bool,
        panic_cancellation: bool,
    }

    impl Hooks for ProbeHooks {
        fn on_cancellation(&self) -> Result<(), HookError> {
            self.cancellation_calls.fetch_add(1, Ordering::SeqCst);
            if self.panic_cancellation {
                panic!("cancellation hook exploded");
            }
            Ok(())
        }

        fn on_exit(&self) -> Result<(), HookError> {
            self.exit_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_exit {
                return Err(HookError::fail("exit hook refused"));
            }
            Ok(())
        }

        fn on_graceful_shutdown(&self) -> Result<(), HookError> {
            self.cleanup_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_cleanup {
                return Err(HookError::fail("cleanup hook refused"));
            }
            Ok(())
        }
    }

    /// Subscriber recording the order of delivered event kinds.
    struct Recorder {
        seen: Mutex<Vec<EventKind>>,
    }

    impl Recorder {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                seen: Mutex::new(Vec::new()),
            })
        }

        fn kinds(&self) -> Vec<EventKind> {
            self.seen.lock().unwrap().clone()
        }

        fn position(&self, kind: EventKind) -> Option<usize> {
            self.kinds().iter().position(|k| *k == kind)
        }
    }

    #[async_trait]
    impl Subscribe for Recorder {
        async fn on_event(&self, event: &Event) {
            self.seen.lock().unwrap().push(event.kind);
        }

        fn name(&self) -> &'static str {
            "recorder"
        }
    }

    fn supervisor_with(hooks: Arc<dyn Hooks>, recorder: Arc<Recorder>) -> Supervisor {
        Supervisor::new(Config::default(), hooks, vec![recorder])
    }

    #[tokio::test]
    async fn test_completed_run_fires_exit_hook_once() {
        let hooks = Arc::new(ProbeHooks::default());
        let recorder = Recorder::new();
        let sup = supervisor_with(hooks.clone(), recorder.clone());

        let work = WorkFn::arc("unit", |_ctx| async { Ok(()) });
        let report = sup.run(&ManualTrigger::new(), work, None).await;

        assert_eq!(report.outcome, RunOutcome::Completed);
        assert_eq!(report.exit_code, None);
        assert!(report.completed && !report.interrupted && report.cleanup_invoked);
        assert!(report.logs_flushed);

        assert_eq!(hooks.cleanup_calls.load(Ordering::SeqCst), 1);
        assert_eq!(hooks.exit_calls.load(Ordering::SeqCst), 1);
        assert_eq!(hooks.cancellation_calls.load(Ordering::SeqCst), 0);

        assert_eq!(
            recorder.kinds(),
            vec![
                EventKind::RunStarting,
                EventKind::RunCompleted,
                EventKind::CleanupStarted,
                EventKind::RunFinished,
            ]
        );
    }

    #[tokio::test]
    async fn test_interrupted_run_skips_exit_hook() {
        let hooks = Arc::new(ProbeHooks::default());
        let recorder = Recorder::new();
        let sup = supervisor_with(hooks.clone(), recorder.clone());

        // Interrupt already requested when the run begins; the work unit
        // would run forever otherwise.
        let trigger = ManualTrigger::new();
        trigger.trigger();

        let work = WorkFn::arc("unit", |ctx: CancellationToken| async move {
            ctx.cancelled().await;
            Err(WorkError::Canceled)
        });
        let report = sup.run(&trigger, work, None).await;

        assert_eq!(report.outcome, RunOutcome::Interrupted);
        assert_eq!(report.exit_code, Some(1));
        assert!(report.interrupted && !report.completed && report.cleanup_invoked);

        assert_eq!(hooks.cleanup_calls.load(Ordering::SeqCst), 1);
        assert_eq!(hooks.cancellation_calls.load(Ordering::SeqCst), 1);
        assert_eq!(hooks.exit_calls.load(Ordering::SeqCst), 0);

        assert_eq!(
            recorder.kinds(),
            vec![
                EventKind::RunStarting,
                EventKind::InterruptRequested,
                EventKind::CleanupStarted,
                EventKind::RunInterrupted,
            ]
        );
    }

    #[tokio::test]
    async fn test_faulted_run_still_runs_final_action() {
        let hooks = Arc::new(ProbeHooks::default());
        let recorder = Recorder::new();
        let sup = supervisor_with(hooks.clone(), recorder.clone());

        let final_ran = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&final_ran);

        let work = WorkFn::arc("unit", |_ctx| async { Err(WorkError::fail("boom")) });
        let action = WorkFn::arc("final", move |_ctx| {
            let flag = Arc::clone(&flag);
            async move {
                flag.store(true, Ordering::SeqCst);
                Ok(())
            }
        });

        let report = sup.run(&ManualTrigger::new(), work, Some(action)).await;

        assert_eq!(report.outcome, RunOutcome::Faulted);
        assert_eq!(report.exit_code, None);
        assert!(final_ran.load(Ordering::SeqCst));
        assert_eq!(hooks.exit_calls.load(Ordering::SeqCst), 0);

        assert_eq!(
            recorder.kinds(),
            vec![
                EventKind::RunStarting,
                EventKind::WorkFaulted,
                EventKind::CleanupStarted,
                EventKind::RunIncomplete,
            ]
        );
    }

    #[tokio::test]
    async fn test_final_action_fault_does_not_block_exit_sequence() {
        let hooks = Arc::new(ProbeHooks::default());
        let recorder = Recorder::new();
        let sup = supervisor_with(hooks.clone(), recorder.clone());

        let work = WorkFn::arc("unit", |_ctx| async { Ok(()) });
        let action = WorkFn::arc("final", |_ctx| async { Err(WorkError::fail("flush failed")) });

        let report = sup.run(&ManualTrigger::new(), work, Some(action)).await;

        assert_eq!(report.outcome, RunOutcome::Completed);
        assert_eq!(hooks.exit_calls.load(Ordering::SeqCst), 1);

        let kinds = recorder.kinds();
        assert!(kinds.contains(&EventKind::FinalActionFaulted));
        assert!(kinds.contains(&EventKind::RunFinished));
    }

    #[tokio::test]
    async fn test_interrupt_during_final_action_wins_classification() {
        let hooks = Arc::new(ProbeHooks::default());
        let recorder = Recorder::new();
        let sup = supervisor_with(hooks.clone(), recorder.clone());

        // The final action itself requests the interrupt, then parks: the
        // completion flag is already set, so interrupted must still win.
        let trigger = ManualTrigger::new();
        let fire = trigger.clone();

        let work = WorkFn::arc("unit", |_ctx| async { Ok(()) });
        let action = WorkFn::arc("final", move |ctx: CancellationToken| {
            let fire = fire.clone();
            async move {
                fire.trigger();
                ctx.cancelled().await;
                Err(WorkError::Canceled)
            }
        });

        let report = sup.run(&trigger, work, Some(action)).await;

        assert_eq!(report.outcome, RunOutcome::Interrupted);
        assert!(report.completed && report.interrupted);
        assert_eq!(hooks.exit_calls.load(Ordering::SeqCst), 0);
        assert_eq!(hooks.cancellation_calls.load(Ordering::SeqCst), 1);

        let kinds = recorder.kinds();
        assert!(kinds.contains(&EventKind::RunCompleted));
        assert!(kinds.contains(&EventKind::RunInterrupted));
        assert!(!kinds.contains(&EventKind::RunFinished));
    }

    #[tokio::test]
    async fn test_hook_faults_are_contained_and_steps_continue() {
        let hooks = Arc::new(ProbeHooks {
            fail_cleanup: true,
            panic_cancellation: true,
            ..Default::default()
        });
        let recorder = Recorder::new();
        let sup = supervisor_with(hooks.clone(), recorder.clone());

        let trigger = ManualTrigger::new();
        trigger.trigger();

        let work = WorkFn::arc("unit", |ctx: CancellationToken| async move {
            ctx.cancelled().await;
            Err(WorkError::Canceled)
        });
        let report = sup.run(&trigger, work, None).await;

        // Cleanup faulted and the cancellation hook panicked, yet every
        // step ran and the run still classified.
        assert_eq!(report.outcome, RunOutcome::Interrupted);
        assert_eq!(hooks.cleanup_calls.load(Ordering::SeqCst), 1);
        assert_eq!(hooks.cancellation_calls.load(Ordering::SeqCst), 1);

        let kinds = recorder.kinds();
        assert!(kinds.contains(&EventKind::CleanupFailed));
        assert!(kinds.contains(&EventKind::HookFaulted));
        assert!(kinds.contains(&EventKind::RunInterrupted));
    }

    #[tokio::test]
    async fn test_exit_hook_fault_still_logs_run_finished() {
        let hooks = Arc::new(ProbeHooks {
            fail_exit: true,
            ..Default::default()
        });
        let recorder = Recorder::new();
        let sup = supervisor_with(hooks.clone(), recorder.clone());

        let work = WorkFn::arc("unit", |_ctx| async { Ok(()) });
        let report = sup.run(&ManualTrigger::new(), work, None).await;

        assert_eq!(report.outcome, RunOutcome::Completed);

        let recorder_kinds = recorder.kinds();
        let faulted = recorder.position(EventKind::HookFaulted).unwrap();
        let finished = recorder.position(EventKind::RunFinished).unwrap();
        assert!(faulted < finished, "events: {recorder_kinds:?}");
    }

    #[tokio::test]
    async fn test_cleanup_runs_once_even_with_failed_first_attempt() {
        // A failed cleanup must not be retried by the terminating path:
        // "ran" means "was invoked", not "succeeded".
        let hooks = Arc::new(ProbeHooks {
            fail_cleanup: true,
            ..Default::default()
        });
        let sup = supervisor_with(hooks.clone(), Recorder::new());

        let trigger = ManualTrigger::new();
        trigger.trigger();

        let work = WorkFn::arc("unit", |ctx: CancellationToken| async move {
            ctx.cancelled().await;
            Err(WorkError::Canceled)
        });
        let report = sup.run(&trigger, work, None).await;

        assert!(report.cleanup_invoked);
        assert_eq!(hooks.cleanup_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_work_panic_is_contained() {
        let recorder = Recorder::new();
        let sup = supervisor_with(Arc::new(NoopHooks), recorder.clone());

        let work = WorkFn::arc("unit", |_ctx| async { panic!("work exploded") });
        let report = sup.run(&ManualTrigger::new(), work, None).await;

        assert_eq!(report.outcome, RunOutcome::Faulted);
        assert!(recorder.kinds().contains(&EventKind::WorkFaulted));
    }

    #[tokio::test]
    async fn test_fault_exit_code_is_configurable() {
        let mut cfg = Config::default();
        cfg.fault_exit_code = Some(2);
        let sup = Supervisor::new(cfg, Arc::new(NoopHooks), Vec::new());

        let work = WorkFn::arc("unit", |_ctx| async { Err(WorkError::fail("boom")) });
        let report = sup.run(&ManualTrigger::new(), work, None).await;

        assert_eq!(report.outcome, RunOutcome::Faulted);
        assert_eq!(report.exit_code, Some(2));
    }

    #[tokio::test]
    async fn test_signal_bind_failure_disarms_interrupt_branch() {
        struct BrokenSignals;

        #[async_trait]
        impl SignalSource for BrokenSignals {
            async fn interrupted(&self) -> std::io::Result<()> {
                Err(std::io::Error::other("no signal handler slots"))
            }
        }

        let recorder = Recorder::new();
        let sup = supervisor_with(Arc::new(NoopHooks), recorder.clone());

        let work = WorkFn::arc("unit", |_ctx| async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok(())
        });
        let report = sup.run(&BrokenSignals, work, None).await;

        assert_eq!(report.outcome, RunOutcome::Completed);
        assert!(recorder.kinds().contains(&EventKind::SignalBindFailed));
    }

    #[tokio::test]
    async fn test_interrupt_cancels_work_token() {
        let observed = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&observed);

        let sup = supervisor_with(Arc::new(NoopHooks), Recorder::new());
        let trigger = ManualTrigger::new();

        let fire = trigger.clone();
        let work = WorkFn::arc("unit", move |ctx: CancellationToken| {
            let fire = fire.clone();
            let flag = Arc::clone(&flag);
            async move {
                fire.trigger();
                ctx.cancelled().await;
                flag.store(true, Ordering::SeqCst);
                Err(WorkError::Canceled)
            }
        });

        let report = sup.run(&trigger, work, None).await;
        assert_eq!(report.outcome, RunOutcome::Interrupted);
        // The work future is abandoned at the select, not resumed; the
        // token cancellation is for cooperative observers that are polled
        // elsewhere. The flag must not have been set.
        assert!(!observed.load(Ordering::SeqCst));
    }
}
