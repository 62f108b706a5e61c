//! # Demo: manual_interrupt
//!
//! Drives the interrupt path without touching OS signals: a
//! [`ManualTrigger`] shared with a controller task fires mid-run, the
//! supervisor cancels the work token and walks the interrupt sequence.
//!
//! Shows how to:
//! - Inject a synthesized [`SignalSource`](runguard::SignalSource).
//! - Observe cooperative cancellation from inside the work unit.
//! - Verify the exit hook is skipped for interrupted runs.
//!
//! ## Run
//! ```bash
//! cargo run --example manual_interrupt --features logging
//! ```

use std::sync::Arc;
use std::time::Duration;

use runguard::{
    Config, HookError, Hooks, LogWriter, ManualTrigger, Supervisor, WorkError, WorkFn, WorkRef,
};
use tokio_util::sync::CancellationToken;

struct Narrator;

impl Hooks for Narrator {
    fn on_cancellation(&self) -> Result<(), HookError> {
        println!("[hooks] cancellation ran");
        Ok(())
    }

    fn on_exit(&self) -> Result<(), HookError> {
        println!("[hooks] exit ran (should not appear for interrupted runs)");
        Ok(())
    }

    fn on_graceful_shutdown(&self) -> Result<(), HookError> {
        println!("[hooks] graceful shutdown ran");
        Ok(())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt().init();

    let trigger = ManualTrigger::new();

    // Controller: let the job tick for two seconds, then interrupt.
    {
        let trigger = trigger.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(2)).await;
            println!("[controller] requesting interrupt");
            trigger.trigger();
        });
    }

    let job: WorkRef = WorkFn::arc("ticker", |ctx: CancellationToken| async move {
        let mut tick = 0u32;
        loop {
            if ctx.is_cancelled() {
                return Err(WorkError::Canceled);
            }
            tick += 1;
            println!("[job] tick #{tick}");
            tokio::time::sleep(Duration::from_millis(500)).await;
        }
    });

    let sup = Supervisor::new(
        Config::default(),
        Arc::new(Narrator),
        vec![Arc::new(LogWriter::new())],
    );

    let report = sup.run(&trigger, job, None).await;
    println!(
        "[main] outcome={} exit_code={:?}",
        report.outcome.as_label(),
        report.exit_code
    );
    report.exit()
}
