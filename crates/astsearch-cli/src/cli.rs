//! Command-line argument definitions.

use std::path::PathBuf;

use clap::Parser;

/// Searches Python source for code matching a structural pattern.
///
/// Configuration flags (`--config-path`, `--log-filter`, `--log-format`,
/// `--extensions`, `--excluded-dirs`) are read before the pattern.
#[derive(Parser, Debug)]
#[command(name = "astsearch", version)]
pub(crate) struct Cli {
    /// Pattern to search for: Python code where `?` stands for any single
    /// element and `??` for any number of them.
    #[arg(value_name = "PATTERN", allow_hyphen_values = true)]
    pub(crate) pattern: String,
    /// File or directory to search.
    #[arg(value_name = "PATH", default_value = ".")]
    pub(crate) path: PathBuf,
    /// Prints the compiled pattern before searching.
    #[arg(long, hide = true)]
    pub(crate) debug: bool,
}
