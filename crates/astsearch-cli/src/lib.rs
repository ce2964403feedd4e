//! Command-line runtime for astsearch.
//!
//! The runtime splits configuration flags from the search arguments, loads
//! [`astsearch_config::Config`], installs telemetry, compiles the pattern
//! and prints every match under the search path. It is exercised both from
//! the binary entrypoint and from tests with in-memory streams.

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use astsearch_syntax::Pattern;
use clap::Parser;
use tracing::debug;

mod cli;
mod config;
mod discovery;
mod errors;
mod render;
mod search;
mod telemetry;

use cli::Cli;
use config::{ConfigLoader, OrthoConfigLoader, split_config_arguments};
use discovery::SearchRoot;
use errors::AppError;

/// CLI flags recognised by the configuration loader.
///
/// MAINTENANCE: keep in sync with the fields of `astsearch_config::Config`.
const CONFIG_CLI_FLAGS: &[&str] = &[
    "--config-path",
    "--log-filter",
    "--log-format",
    "--extensions",
    "--excluded-dirs",
];

/// Runs the CLI using the provided arguments and IO handles.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    run_with_loader(args, stdout, stderr, &OrthoConfigLoader)
}

fn run_with_loader<I, W, E, L>(args: I, stdout: &mut W, stderr: &mut E, loader: &L) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    let args: Vec<OsString> = args.into_iter().collect();
    match execute(&args, stdout, stderr, loader) {
        Ok(()) => ExitCode::SUCCESS,
        Err(AppError::CliUsage(error)) => report_usage(&error, stdout, stderr),
        Err(error) => {
            if writeln!(stderr, "astsearch: {error}").is_err() {
                debug!(%error, "failed to report error");
            }
            ExitCode::FAILURE
        }
    }
}

fn execute<W, E, L>(
    args: &[OsString],
    stdout: &mut W,
    stderr: &mut E,
    loader: &L,
) -> Result<(), AppError>
where
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    let split = split_config_arguments(args);
    let cli = Cli::try_parse_from(&split.search_arguments).map_err(AppError::CliUsage)?;
    let config = loader.load(&split.config_arguments)?;
    telemetry::initialise(&config)?;

    let pattern = Pattern::compile(&cli.pattern)?;
    if cli.debug {
        writeln!(stdout, "{pattern}").map_err(AppError::WriteOutput)?;
    }

    let root = SearchRoot::resolve(&cli.path)?;
    let outcome = search::search(&pattern, &root, &config.source_filter(), stdout, stderr)?;
    debug!(
        matches = outcome.matches,
        skipped = outcome.skipped,
        "search complete"
    );
    stdout.flush().map_err(AppError::WriteOutput)
}

/// Prints clap's rendering of a usage error, or of `--help`/`--version`,
/// and maps it to clap's exit status.
fn report_usage<W, E>(error: &clap::Error, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    W: Write,
    E: Write,
{
    let rendered = error.render();
    let written = if error.use_stderr() {
        write!(stderr, "{rendered}")
    } else {
        write!(stdout, "{rendered}")
    };
    if written.is_err() {
        return ExitCode::FAILURE;
    }
    u8::try_from(error.exit_code()).map_or(ExitCode::FAILURE, ExitCode::from)
}

#[cfg(test)]
mod tests;
