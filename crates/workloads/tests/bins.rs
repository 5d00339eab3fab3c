//! Run the workload binaries with small sizes

use std::process::Command;

#[test]
fn test_tight_loop_reports_milliseconds() {
    let output = Command::new(env!("CARGO_BIN_EXE_tight_loop"))
        .env("TIGHT_LOOP_ITERATIONS", "1000")
        .env_remove("RUST_LOG")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let line = stdout.trim_end();
    let ms = line
        .strip_prefix("Tight loop  : ")
        .and_then(|rest| rest.strip_suffix(" ms"))
        .unwrap();
    assert!(ms.parse::<f64>().unwrap() >= 0.0);
}

#[test]
fn test_recursion_stress_phases() {
    let output = Command::new(env!("CARGO_BIN_EXE_recursion_stress"))
        .env("FIB_N", "20")
        .env("SUM_LOOP_LIMIT", "1000")
        .env("STACK_DIVE_DEPTH", "2000000")
        .env("STACK_DIVE_STACK_MB", "1024")
        .env_remove("RUST_LOG")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Fib(20):",
            "6765",
            "Loop 1000:",
            "499500",
            "TCO Stack Dive (2M depth):",
            "2000000",
        ]
    );
}
