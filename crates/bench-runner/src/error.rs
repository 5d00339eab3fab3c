//! Error types for the runner

use thiserror::Error;

/// Failures the runner can hit while measuring a command.
#[derive(Error, Debug)]
pub enum RunnerError {
    /// No command was supplied
    #[error("Usage: {0} <command> [args...]")]
    Usage(String),

    /// The child process could not be created
    #[error("Failed to launch '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Waiting on the child failed
    #[error("Failed to wait for child process: {0}")]
    Wait(#[source] std::io::Error),

    /// getrusage(RUSAGE_CHILDREN) failed after the child exited
    #[error("Failed to get resource usage: {0}")]
    ResourceQuery(#[source] nix::errno::Errno),
}
