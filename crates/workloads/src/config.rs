//! Workload parameters loaded from environment variables

use std::env;
use std::str::FromStr;

/// Largest Fibonacci index whose value fits in an i64
pub const MAX_FIB_N: i64 = 92;

/// Sizes of the synthetic workloads
#[derive(Debug, Clone)]
pub struct Config {
    /// Default tracing filter, used when RUST_LOG is unset
    pub log_filter: String,

    /// Iterations of the tight counting loop
    pub tight_loop_iterations: i64,

    /// Fibonacci index computed by naive recursion, at most [`MAX_FIB_N`]
    pub fib_n: i64,

    /// Upper bound (exclusive) of the summing loop
    pub sum_loop_limit: i64,

    /// Recursion depth of the stack dive. The accumulators start at 1..=8 and
    /// grow with depth, so depths within 8 of i64::MAX would overflow them.
    pub stack_dive_depth: i64,

    /// Stack size of the stack dive thread, in MiB
    pub stack_dive_stack_mb: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            log_filter: lookup("WORKLOAD_LOG")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| "workloads=warn".to_string()),
            tight_loop_iterations: parse_or(&lookup, "TIGHT_LOOP_ITERATIONS", 1_000_000),
            fib_n: Some(parse_or(&lookup, "FIB_N", 50))
                .filter(|n| *n <= MAX_FIB_N)
                .unwrap_or(50),
            sum_loop_limit: parse_or(&lookup, "SUM_LOOP_LIMIT", 10_000_000_000),
            stack_dive_depth: parse_or(&lookup, "STACK_DIVE_DEPTH", 10_000_000),
            stack_dive_stack_mb: parse_or(&lookup, "STACK_DIVE_STACK_MB", 2048),
        }
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    lookup(key)
        .and_then(|v| v.replace('_', "").parse().ok())
        .unwrap_or(default)
}
