//! Recursion, loop and deep recursion stress test

use anyhow::Result;
use workloads::config::Config;

fn main() -> Result<()> {
    let config = Config::from_env();
    workloads::init_tracing(&config);

    tracing::debug!(?config, "Starting recursion stress test");

    println!("Fib({}):", config.fib_n);
    println!("{}", workloads::fib(config.fib_n));

    println!("Loop {}:", loop_label(config.sum_loop_limit));
    println!("{}", workloads::wrapping_sum_below(config.sum_loop_limit));

    println!("TCO Stack Dive ({} depth):", depth_label(config.stack_dive_depth));
    let depth = workloads::stack_dive(config.stack_dive_depth, config.stack_dive_stack_mb)?;
    println!("{}", depth);

    Ok(())
}

fn loop_label(limit: i64) -> String {
    match limit {
        10_000_000_000 => "10 Billion".to_string(),
        n => n.to_string(),
    }
}

fn depth_label(depth: i64) -> String {
    if depth >= 1_000_000 && depth % 1_000_000 == 0 {
        format!("{}M", depth / 1_000_000)
    } else {
        depth.to_string()
    }
}
