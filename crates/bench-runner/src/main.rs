//! bench_runner - wall clock and peak memory of a single command
//!
//! Runs `bench_runner <command> [args...]`, lets the command write to the
//! terminal as usual, then prints how long it took and the peak resident
//! memory the OS recorded for it. Exits with the command's own exit code.

mod config;
mod error;
mod executor;
mod invocation;
mod outcome;
mod runner;

use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::invocation::Invocation;
use crate::outcome::ExitOutcome;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let config = Config::from_env();

    // Logs share stderr with the child; stdout carries only the report
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let invocation = match Invocation::parse(std::env::args_os()) {
        Ok(invocation) => invocation,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(ExitOutcome::LaunchFailure.exit_code(config.signal_exit));
        }
    };

    tracing::debug!(?invocation, signal_exit = ?config.signal_exit, "Starting measurement");

    let outcome = runner::run(&invocation, &mut std::io::stdout()).await;

    ExitCode::from(outcome.exit_code(config.signal_exit))
}
