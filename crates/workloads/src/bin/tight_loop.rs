//! Tight counting loop, timed from the inside

use std::time::Instant;

use anyhow::Result;
use workloads::config::Config;

fn main() -> Result<()> {
    let config = Config::from_env();
    workloads::init_tracing(&config);

    tracing::debug!(iterations = config.tight_loop_iterations, "Starting tight loop");

    let start = Instant::now();
    let count = workloads::count_up(config.tight_loop_iterations);
    let elapsed = start.elapsed();

    tracing::debug!(count, "Tight loop finished");
    println!("Tight loop  : {:.4} ms", elapsed.as_secs_f64() * 1000.0);
    Ok(())
}
