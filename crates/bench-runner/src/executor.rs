//! Child process execution and resource measurement

use std::ffi::c_long;
use std::process::{ExitStatus, Stdio};
use std::time::{Duration, Instant};

use nix::sys::resource::{getrusage, UsageWho};
use tokio::process::{Child, Command};

use crate::error::RunnerError;
use crate::invocation::Invocation;

/// Wall clock and memory figures for one measured command
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// Time between spawning the child and reaping it
    pub elapsed: Duration,
    /// Peak resident set size of waited-on children, in KiB
    pub peak_memory_kb: u64,
}

impl std::fmt::Display for Measurement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Time: {:.5}s", self.elapsed.as_secs_f64())?;
        write!(f, "Peak Memory: {} KB", self.peak_memory_kb)
    }
}

/// A child that ran to completion
#[derive(Debug)]
pub struct Execution {
    pub status: ExitStatus,
    pub elapsed: Duration,
}

/// Spawn the invocation and block until it exits.
///
/// The child shares the runner's stdin, stdout and stderr. The clock covers
/// process creation as well as the child's own run time.
pub async fn execute(invocation: &Invocation) -> Result<Execution, RunnerError> {
    let start = Instant::now();

    let mut child = Command::new(invocation.program())
        .args(invocation.args())
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|source| RunnerError::Spawn {
            program: invocation.display_program(),
            source,
        })?;

    tracing::debug!(
        pid = child.id(),
        program = %invocation.display_program(),
        "Spawned child process"
    );

    let status = wait_for_exit(&mut child).await?;
    let elapsed = start.elapsed();

    tracing::debug!(?status, elapsed_ms = elapsed.as_millis() as u64, "Child exited");

    Ok(Execution { status, elapsed })
}

/// Wait for the child, riding out Ctrl-C.
///
/// The terminal delivers SIGINT to the whole foreground process group, so the
/// child sees it too. The runner stays alive to reap it and report.
async fn wait_for_exit(child: &mut Child) -> Result<ExitStatus, RunnerError> {
    loop {
        let interrupt = tokio::select! {
            status = child.wait() => return status.map_err(RunnerError::Wait),
            interrupt = tokio::signal::ctrl_c() => interrupt,
        };

        match interrupt {
            Ok(()) => tracing::warn!("Interrupt received, waiting for child to exit"),
            Err(e) => {
                tracing::warn!("Failed to listen for interrupts: {}", e);
                break;
            }
        }
    }

    child.wait().await.map_err(RunnerError::Wait)
}

/// Peak RSS across all terminated, waited-on children of this process.
///
/// RUSAGE_CHILDREN accumulates over every child reaped so far; with a single
/// child per runner this is that child's peak.
pub fn children_peak_memory_kb() -> Result<u64, RunnerError> {
    let usage = getrusage(UsageWho::RUSAGE_CHILDREN).map_err(RunnerError::ResourceQuery)?;
    Ok(max_rss_kb(usage.max_rss()))
}

#[cfg(target_os = "macos")]
fn max_rss_kb(raw: c_long) -> u64 {
    // macOS reports bytes
    u64::try_from(raw).unwrap_or(0) / 1024
}

#[cfg(not(target_os = "macos"))]
fn max_rss_kb(raw: c_long) -> u64 {
    u64::try_from(raw).unwrap_or(0)
}
