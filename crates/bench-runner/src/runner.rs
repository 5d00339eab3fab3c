//! Measure one command and report it

use std::io::Write;

use crate::error::RunnerError;
use crate::executor::{self, Measurement};
use crate::invocation::Invocation;
use crate::outcome::ExitOutcome;

/// Run the invocation, print its measurement to `out`, and classify the exit.
///
/// Diagnostics for launch and telemetry failures go to stderr. A failed
/// resource query drops the measurement but keeps the child's own outcome.
pub async fn run<W: Write>(invocation: &Invocation, out: &mut W) -> ExitOutcome {
    run_with(invocation, out, executor::children_peak_memory_kb).await
}

/// Same as [`run`], with the peak memory query supplied by the caller.
///
/// `query` is called once, after the child has been reaped.
pub async fn run_with<W, Q>(invocation: &Invocation, out: &mut W, query: Q) -> ExitOutcome
where
    W: Write,
    Q: FnOnce() -> Result<u64, RunnerError>,
{
    let execution = match executor::execute(invocation).await {
        Ok(execution) => execution,
        Err(e) => {
            eprintln!("{}", e);
            return ExitOutcome::LaunchFailure;
        }
    };

    let outcome = ExitOutcome::from_status(execution.status);
    tracing::debug!("{} {}", invocation.display_program(), outcome);

    match query() {
        Ok(peak_memory_kb) => {
            let measurement = Measurement {
                elapsed: execution.elapsed,
                peak_memory_kb,
            };
            if let Err(e) = writeln!(out, "{}", measurement).and_then(|_| out.flush()) {
                tracing::warn!("Failed to write measurement: {}", e);
            }
        }
        Err(e) => eprintln!("{}", e),
    }

    outcome
}
