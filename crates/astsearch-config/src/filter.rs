//! Selection of the files and directories a search visits.

use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::path::Path;

/// Decides which directories to descend into and which files to search.
///
/// Directory exclusion matches the final path component exactly. Extension
/// matching ignores ASCII case, so `MODULE.PY` is searched like `module.py`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFilter {
    extensions: BTreeSet<String>,
    excluded_dirs: BTreeSet<String>,
}

impl SourceFilter {
    /// Builds a filter from extensions (with or without a leading dot) and
    /// excluded directory names.
    #[must_use]
    pub fn new<E, D>(extensions: E, excluded_dirs: D) -> Self
    where
        E: IntoIterator,
        E::Item: AsRef<str>,
        D: IntoIterator,
        D::Item: AsRef<str>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|ext| ext.as_ref().trim_start_matches('.').to_ascii_lowercase())
                .filter(|ext| !ext.is_empty())
                .collect(),
            excluded_dirs: excluded_dirs
                .into_iter()
                .map(|dir| dir.as_ref().to_owned())
                .collect(),
        }
    }

    /// Returns whether a directory should be walked.
    #[must_use]
    pub fn accepts_dir(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(OsStr::to_str)
            .is_none_or(|name| !self.excluded_dirs.contains(name))
    }

    /// Returns whether a file should be searched.
    #[must_use]
    pub fn accepts_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(OsStr::to_str)
            .is_some_and(|ext| self.extensions.contains(&ext.to_ascii_lowercase()))
    }
}
