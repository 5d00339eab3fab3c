//! Command line handed to the runner

use std::ffi::{OsStr, OsString};

use crate::error::RunnerError;

/// Program name used in the usage message when argv[0] is missing
const DEFAULT_RUNNER_NAME: &str = "bench_runner";

/// The command to execute: a program plus its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: OsString,
    args: Vec<OsString>,
}

impl Invocation {
    /// Build an invocation from the runner's full argv.
    ///
    /// argv[0] is the runner itself and is only used for the usage message;
    /// argv[1] is the program to run and the rest are passed through verbatim.
    pub fn parse<I>(argv: I) -> Result<Self, RunnerError>
    where
        I: IntoIterator<Item = OsString>,
    {
        let mut argv = argv.into_iter();
        let runner = argv
            .next()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_RUNNER_NAME.to_string());

        let program = argv.next().ok_or(RunnerError::Usage(runner))?;

        Ok(Self {
            program,
            args: argv.collect(),
        })
    }

    /// Program to execute, resolved through PATH by the OS
    pub fn program(&self) -> &OsStr {
        &self.program
    }

    /// Arguments following the program
    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Program name for diagnostics
    pub fn display_program(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }
}
