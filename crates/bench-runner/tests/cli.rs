//! End-to-end checks of the bench_runner binary

use std::process::{Command, Output};

fn bench_runner() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_bench_runner"));
    cmd.env_remove("RUST_LOG")
        .env_remove("BENCH_RUNNER_LOG")
        .env_remove("BENCH_RUNNER_SIGNAL_EXIT");
    cmd
}

fn run(args: &[&str]) -> Output {
    bench_runner()
        .args(args)
        .output()
        .expect("failed to run bench_runner")
}

/// Parsed summary lines from the runner's stdout
struct Report {
    seconds: f64,
    time_decimals: usize,
    peak_kb: u64,
}

fn report(output: &Output) -> Option<Report> {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let time = stdout
        .lines()
        .find_map(|l| l.strip_prefix("Time: "))?
        .strip_suffix('s')?;
    let peak = stdout
        .lines()
        .find_map(|l| l.strip_prefix("Peak Memory: "))?
        .strip_suffix(" KB")?;

    Some(Report {
        seconds: time.parse().ok()?,
        time_decimals: time.split('.').nth(1)?.len(),
        peak_kb: peak.parse().ok()?,
    })
}

#[test]
fn test_no_command_is_usage_error() {
    let output = run(&[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage:"));
}

#[test]
fn test_missing_program_is_launch_failure() {
    let output = run(&["/nonexistent/bench-runner-target", "--flag"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(report(&output).is_none());
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to launch"));
    assert!(stderr.contains("/nonexistent/bench-runner-target"));
}

#[test]
fn test_non_executable_file_is_launch_failure() {
    let script = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(script.path(), "#!/bin/sh\nexit 0\n").unwrap();

    let output = run(&[script.path().to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(report(&output).is_none());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to launch"));
}

#[test]
fn test_echo_output_precedes_report() {
    let output = run(&["echo", "hello"]);
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "hello");
    assert!(lines[1].starts_with("Time: "));
    assert!(lines[2].starts_with("Peak Memory: "));

    let report = report(&output).unwrap();
    assert_eq!(report.time_decimals, 5);
    assert!(report.seconds >= 0.0);
}

#[test]
fn test_false_reports_and_exits_one() {
    let output = run(&["false"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(report(&output).is_some());
    assert!(output.stderr.is_empty());
}

#[test]
fn test_child_exit_code_is_propagated() {
    for code in [0, 2, 42, 255] {
        let script = format!("exit {}", code);
        let output = run(&["sh", "-c", &script]);
        assert_eq!(output.status.code(), Some(code), "child exited with {}", code);
        assert!(report(&output).is_some());
    }
}

#[test]
fn test_signaled_child_exits_zero_by_default() {
    let output = run(&["sh", "-c", "kill -KILL $$"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(report(&output).is_some());
}

#[test]
fn test_signaled_child_with_shell_policy() {
    let output = bench_runner()
        .env("BENCH_RUNNER_SIGNAL_EXIT", "shell")
        .args(["sh", "-c", "kill -TERM $$"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(128 + 15));
    assert!(report(&output).is_some());
}

#[test]
fn test_elapsed_time_tracks_sleep() {
    let output = run(&["sleep", "1"]);
    assert_eq!(output.status.code(), Some(0));

    let report = report(&output).unwrap();
    assert!(report.seconds >= 1.0, "elapsed {}", report.seconds);
    assert!(report.seconds < 1.5, "elapsed {}", report.seconds);
}

#[test]
fn test_peak_memory_covers_large_buffer() {
    // The shell holds ~50 MiB in a variable before exiting
    let output = run(&[
        "sh",
        "-c",
        "x=$(head -c 52428800 /dev/zero | tr '\\0' 'a'); echo ${#x}",
    ]);
    assert_eq!(output.status.code(), Some(0));

    let report = report(&output).unwrap();
    assert!(report.peak_kb >= 50 * 1024, "peak {} KB", report.peak_kb);
}

#[test]
fn test_logs_stay_off_stdout() {
    let output = bench_runner()
        .env("RUST_LOG", "bench_runner=debug")
        .args(["true"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 2);
    assert!(String::from_utf8_lossy(&output.stderr).contains("Spawned child process"));
}
