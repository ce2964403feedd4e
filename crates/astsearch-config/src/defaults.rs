use crate::logging::LogFormat;

/// Default log filter expression.
///
/// Skipped source units are reported by the command line itself, so library
/// warnings stay quiet unless asked for.
pub const DEFAULT_LOG_FILTER: &str = "error";

/// File extensions searched by default.
pub const DEFAULT_EXTENSIONS: &[&str] = &["py", "pyw"];

/// Directory names skipped by default when walking a tree.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &["build"];

/// Default log filter expression used by the binary.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binary.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

/// Default searched file extensions, without leading dots.
#[must_use]
pub fn default_extensions() -> Vec<String> {
    to_owned_list(DEFAULT_EXTENSIONS)
}

/// Default excluded directory names.
#[must_use]
pub fn default_excluded_dirs() -> Vec<String> {
    to_owned_list(DEFAULT_EXCLUDED_DIRS)
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_owned()).collect()
}
