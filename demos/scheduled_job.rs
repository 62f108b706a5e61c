//! # Demo: scheduled_job
//!
//! A scheduled batch job under supervision: an iteration loop with a
//! configurable random failure rate, a final action, and hooks for
//! cleanup and exit narration.
//!
//! Demonstrates how to:
//! - Define the job body with [`WorkFn`] and observe the cancellation token.
//! - Wire [`OsSignals`] so Ctrl-C / SIGTERM drive the interrupt path.
//! - Supply a [`Hooks`] implementation and watch the idempotent cleanup.
//! - Turn the [`RunReport`] into the process exit code.
//!
//! ## Flow
//! ```text
//! Supervisor::run()
//!   ├─► emit RunStarting
//!   ├─► job iterations (may fault or be interrupted)
//!   ├─► final action (runs regardless of job outcome)
//!   ├─► terminating path: cleanup → classification → on_exit
//!   └─► RunReport ─► report.exit()
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example scheduled_job --features logging
//! # interrupt it with Ctrl-C to watch the interrupt path
//! ```

use std::sync::Arc;
use std::time::Duration;

use runguard::{
    Config, HookError, Hooks, LogWriter, OsSignals, Supervisor, WorkError, WorkFn, WorkRef,
};
use tokio_util::sync::CancellationToken;

/// Hooks that narrate the teardown steps.
struct JobHooks;

impl Hooks for JobHooks {
    fn on_cancellation(&self) -> Result<(), HookError> {
        println!("[hooks] cancellation: releasing job lock");
        Ok(())
    }

    fn on_exit(&self) -> Result<(), HookError> {
        println!("[hooks] exit: recording successful run");
        Ok(())
    }

    fn on_graceful_shutdown(&self) -> Result<(), HookError> {
        println!("[hooks] graceful shutdown: flushing partial results");
        Ok(())
    }
}

/// Pseudo-random failure roll without pulling in an RNG crate: the
/// sub-millisecond part of the current time is uniform enough for a demo.
fn roll_failure(fail_percentage: u64) -> bool {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos() as u64)
        .unwrap_or(0);
    nanos % 100 < fail_percentage
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let mut cfg = Config::default();
    cfg.grace = Duration::from_secs(2);
    cfg.fault_exit_code = Some(2);

    let sup = Supervisor::new(cfg, Arc::new(JobHooks), vec![Arc::new(LogWriter::new())]);

    // 5 iterations, 25% failure chance per iteration — like a flaky
    // nightly import.
    let job: WorkRef = WorkFn::arc("nightly-import", |ctx: CancellationToken| async move {
        for iter in 1..=5u32 {
            if ctx.is_cancelled() {
                return Err(WorkError::Canceled);
            }
            tokio::time::sleep(Duration::from_secs(1)).await;
            println!("[job] iteration {iter}");
            if roll_failure(25) {
                return Err(WorkError::fail(format!("iteration {iter} failed")));
            }
        }
        Ok(())
    });

    let final_action: WorkRef = WorkFn::arc("report-upload", |_ctx| async {
        println!("[final] uploading run report");
        Ok(())
    });

    let report = sup.run(&OsSignals, job, Some(final_action)).await;
    println!(
        "[main] outcome={} exit_code={:?}",
        report.outcome.as_label(),
        report.exit_code
    );
    report.exit()
}
