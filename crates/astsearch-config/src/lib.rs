//! Configuration for the astsearch command-line tool.
//!
//! [`Config`] is layered by `ortho_config`: built-in defaults, then an
//! optional configuration file (`--config-path`), then `ASTSEARCH_*`
//! environment variables, then command-line flags.

mod defaults;
mod filter;
mod logging;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_EXCLUDED_DIRS, DEFAULT_EXTENSIONS, DEFAULT_LOG_FILTER, default_excluded_dirs,
    default_extensions, default_log_filter, default_log_filter_string, default_log_format,
};
pub use filter::SourceFilter;
pub use logging::{LogFormat, LogFormatParseError};

/// Resolved configuration for a search run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "ASTSEARCH")]
pub struct Config {
    /// `tracing` filter directive, e.g. `warn` or `astsearch_syntax=debug`.
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Log output format.
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
    /// File extensions to search when walking a directory.
    #[ortho_config(default = default_extensions())]
    pub extensions: Vec<String>,
    /// Directory names never descended into.
    #[ortho_config(default = default_excluded_dirs())]
    pub excluded_dirs: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            extensions: default_extensions(),
            excluded_dirs: default_excluded_dirs(),
        }
    }
}

impl Config {
    /// Returns the file selection rules for directory walks.
    #[must_use]
    pub fn source_filter(&self) -> SourceFilter {
        SourceFilter::new(&self.extensions, &self.excluded_dirs)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn defaults_search_python_files_outside_build() {
        let config = Config::default();
        assert_eq!(config.log_filter, "error");
        assert_eq!(config.log_format, LogFormat::Compact);

        let filter = config.source_filter();
        assert!(filter.accepts_file(Path::new("a/b.py")));
        assert!(filter.accepts_file(Path::new("a/b.pyw")));
        assert!(!filter.accepts_dir(Path::new("a/build")));
    }

    #[test]
    fn custom_lists_replace_the_filter_rules() {
        let config = Config {
            extensions: vec!["pyi".to_owned()],
            excluded_dirs: vec!["vendor".to_owned()],
            ..Config::default()
        };
        let filter = config.source_filter();
        assert!(filter.accepts_file(Path::new("stubs/mod.pyi")));
        assert!(!filter.accepts_file(Path::new("src/mod.py")));
        assert!(filter.accepts_dir(Path::new("build")));
        assert!(!filter.accepts_dir(Path::new("vendor")));
    }
}
