//! Configuration for the benchmark runner

use std::env;

use crate::outcome::SignalExitPolicy;

/// Runner configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Default tracing filter, used when RUST_LOG is unset
    pub log_filter: String,

    /// Exit code mapping for children killed by a signal
    pub signal_exit: SignalExitPolicy,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            log_filter: lookup("BENCH_RUNNER_LOG")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| "bench_runner=warn".to_string()),
            signal_exit: lookup("BENCH_RUNNER_SIGNAL_EXIT")
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
        }
    }
}
