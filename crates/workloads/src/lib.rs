//! Synthetic workloads used as bench_runner targets
//!
//! - `tight_loop`: a counting loop the optimizer cannot fold away
//! - `recursion_stress`: naive Fibonacci, a long summing loop, and a deep
//!   tail-shaped recursion

pub mod config;

use std::hint::black_box;
use std::thread;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

/// Initialize tracing for a workload binary. Logs go to stderr.
pub fn init_tracing(config: &Config) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Count from 0 to `limit` one increment at a time
pub fn count_up(limit: i64) -> i64 {
    let mut counter: i64 = 0;
    let mut i: i64 = 0;
    while i < limit {
        counter = black_box(counter + 1);
        i += 1;
    }
    counter
}

/// Naive doubly recursive Fibonacci
pub fn fib(n: i64) -> i64 {
    if n < 2 {
        return n;
    }
    fib(n - 1) + fib(n - 2)
}

/// Sum of `0..limit`, wrapping on i64 overflow
pub fn wrapping_sum_below(limit: i64) -> i64 {
    let mut sum: i64 = 0;
    let mut i: i64 = 0;
    while i < limit {
        sum = black_box(sum.wrapping_add(i));
        i += 1;
    }
    sum
}

/// Tail-shaped recursion carrying eight accumulators. Returns `depth` once it
/// reaches `limit`.
#[allow(clippy::too_many_arguments)]
pub fn consume_stack(
    limit: i64,
    depth: i64,
    a: i64,
    b: i64,
    c: i64,
    e: i64,
    f: i64,
    g: i64,
    h: i64,
    i: i64,
) -> i64 {
    if depth >= limit {
        return depth;
    }
    consume_stack(
        limit,
        depth + 1,
        a + 1,
        b + 1,
        c + 1,
        e + 1,
        f + 1,
        g + 1,
        h + 1,
        i + 1,
    )
}

/// Run `consume_stack` to `depth` on a thread with a `stack_mb` MiB stack.
///
/// A panic in the thread is returned as an error. Exhausting the stack is not
/// a panic and aborts the process.
pub fn stack_dive(depth: i64, stack_mb: usize) -> Result<i64> {
    let handle = thread::Builder::new()
        .name("stack-dive".to_string())
        .stack_size(stack_mb.saturating_mul(1024 * 1024))
        .spawn(move || consume_stack(depth, 0, 1, 2, 3, 4, 5, 6, 7, 8))
        .with_context(|| format!("failed to spawn stack dive thread with {} MiB stack", stack_mb))?;

    handle
        .join()
        .map_err(|_| anyhow!("stack dive thread panicked"))
}
