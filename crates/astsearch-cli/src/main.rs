//! Entrypoint for the `astsearch` binary.
//!
//! All work is delegated to [`astsearch_cli::run`] so the runtime can be
//! exercised from tests with in-memory streams.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    astsearch_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
