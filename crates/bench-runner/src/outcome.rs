//! Exit outcome of a measured command and how it maps to the runner's own exit code

use std::process::ExitStatus;
use std::str::FromStr;

use nix::sys::signal::Signal;

/// How a child killed by a signal is reported in the runner's exit code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignalExitPolicy {
    /// Signal termination exits 0, same as a clean exit
    #[default]
    Zero,
    /// Signal termination exits 128 + signal, as POSIX shells report it
    Shell,
}

impl FromStr for SignalExitPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zero" => Ok(SignalExitPolicy::Zero),
            "shell" => Ok(SignalExitPolicy::Shell),
            other => Err(format!("unknown signal exit policy '{}'", other)),
        }
    }
}

/// Final outcome of one runner invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    /// Child exited with code 0
    Success,
    /// Child exited normally with a non-zero code
    ChildNonZero(i32),
    /// Child was terminated by a signal
    Signaled(i32),
    /// No command given, or the child could not be launched or waited on
    LaunchFailure,
}

impl ExitOutcome {
    /// Classify a child's wait status
    pub fn from_status(status: ExitStatus) -> Self {
        use std::os::unix::process::ExitStatusExt;

        match status.code() {
            Some(0) => ExitOutcome::Success,
            Some(code) => ExitOutcome::ChildNonZero(code),
            None => match status.signal() {
                Some(signal) => ExitOutcome::Signaled(signal),
                // Stopped/continued statuses never come out of a blocking wait
                None => ExitOutcome::Success,
            },
        }
    }

    /// Exit code for the runner process
    pub fn exit_code(&self, policy: SignalExitPolicy) -> u8 {
        match self {
            ExitOutcome::Success => 0,
            ExitOutcome::ChildNonZero(code) => u8::try_from(*code).unwrap_or(1),
            ExitOutcome::Signaled(signal) => match policy {
                SignalExitPolicy::Zero => 0,
                SignalExitPolicy::Shell => {
                    128u8.saturating_add(u8::try_from(*signal).unwrap_or(u8::MAX))
                }
            },
            ExitOutcome::LaunchFailure => 1,
        }
    }

    /// Short human readable description for logs
    pub fn describe(&self) -> String {
        match self {
            ExitOutcome::Success => "exited with code 0".to_string(),
            ExitOutcome::ChildNonZero(code) => format!("exited with code {}", code),
            ExitOutcome::Signaled(signal) => match Signal::try_from(*signal) {
                Ok(sig) => format!("killed by {}", sig.as_str()),
                Err(_) => format!("killed by signal {}", signal),
            },
            ExitOutcome::LaunchFailure => "failed to launch".to_string(),
        }
    }
}

impl std::fmt::Display for ExitOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.describe())
    }
}
