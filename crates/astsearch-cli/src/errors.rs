//! Error types for the CLI runtime.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use astsearch_syntax::SyntaxError;
use thiserror::Error;

use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error("No such file or directory: {}", .0.display())]
    MissingPath(PathBuf),
    #[error("failed to read {}: {source}", path.display())]
    ReadSource { path: PathBuf, source: io::Error },
    #[error("{}: {source}", path.display())]
    UnparsableSource { path: PathBuf, source: SyntaxError },
    #[error("failed to write results: {0}")]
    WriteOutput(#[source] io::Error),
}
