//! Resolution of the search path into source files.

use std::fs;
use std::path::{Path, PathBuf};

use astsearch_config::SourceFilter;
use ignore::{DirEntry, WalkBuilder};
use tracing::{debug, warn};

use crate::AppError;

/// What the search path points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SearchRoot {
    /// A single file, searched regardless of its extension.
    File(PathBuf),
    /// A directory, walked for files the [`SourceFilter`] accepts.
    Directory(PathBuf),
}

impl SearchRoot {
    pub(crate) fn resolve(path: &Path) -> Result<Self, AppError> {
        match fs::metadata(path) {
            Ok(metadata) if metadata.is_dir() => Ok(Self::Directory(path.to_path_buf())),
            Ok(_) => Ok(Self::File(path.to_path_buf())),
            Err(_) => Err(AppError::MissingPath(path.to_path_buf())),
        }
    }

    /// Returns the files to search, sorted by path.
    pub(crate) fn source_files(&self, filter: &SourceFilter) -> Vec<PathBuf> {
        match self {
            Self::File(path) => vec![path.clone()],
            Self::Directory(root) => walk_directory(root, filter),
        }
    }
}

fn walk_directory(root: &Path, filter: &SourceFilter) -> Vec<PathBuf> {
    let dir_filter = filter.clone();
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .filter_entry(move |entry| {
            entry.depth() == 0 || !is_directory(entry) || dir_filter.accepts_dir(entry.path())
        })
        .build();

    let mut files = Vec::new();
    for walked in walker {
        match walked {
            Ok(entry) if !is_directory(&entry) && filter.accepts_file(entry.path()) => {
                files.push(entry.into_path());
            }
            Ok(_) => {}
            Err(error) => warn!(%error, "skipping unreadable directory entry"),
        }
    }
    files.sort();
    debug!(root = %root.display(), files = files.len(), "walked search directory");
    files
}

fn is_directory(entry: &DirEntry) -> bool {
    entry.file_type().is_some_and(|file_type| file_type.is_dir())
}

#[cfg(test)]
mod tests {
    use astsearch_config::Config;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    use super::*;

    #[fixture]
    fn tree() -> TempDir {
        let dir = TempDir::new().expect("temp dir");
        let root = dir.path();
        for sub in ["pkg", "pkg/build", "build", "docs"] {
            fs::create_dir_all(root.join(sub)).expect("create dir");
        }
        for file in [
            "z.py",
            "a.py",
            "pkg/mod.py",
            "pkg/gui.pyw",
            "pkg/build/generated.py",
            "build/out.py",
            "docs/notes.txt",
        ] {
            fs::write(root.join(file), "pass\n").expect("write file");
        }
        dir
    }

    fn relative(root: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|file| {
                file.strip_prefix(root)
                    .expect("file under root")
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[rstest]
    fn directories_are_walked_in_sorted_order(tree: TempDir) {
        let root = SearchRoot::resolve(tree.path()).expect("resolve");
        let files = root.source_files(&Config::default().source_filter());
        assert_eq!(
            relative(tree.path(), &files),
            ["a.py", "pkg/gui.pyw", "pkg/mod.py", "z.py"]
        );
    }

    #[rstest]
    fn excluded_directories_follow_the_filter(tree: TempDir) {
        let filter = SourceFilter::new(["py"], ["pkg"]);
        let root = SearchRoot::resolve(tree.path()).expect("resolve");
        assert_eq!(
            relative(tree.path(), &root.source_files(&filter)),
            ["a.py", "build/out.py", "z.py"]
        );
    }

    #[rstest]
    fn an_excluded_root_is_still_walked(tree: TempDir) {
        let build = tree.path().join("build");
        let root = SearchRoot::resolve(&build).expect("resolve");
        let files = root.source_files(&Config::default().source_filter());
        assert_eq!(relative(&build, &files), ["out.py"]);
    }

    #[rstest]
    fn a_file_is_searched_whatever_its_extension(tree: TempDir) {
        let path = tree.path().join("docs/notes.txt");
        let root = SearchRoot::resolve(&path).expect("resolve");
        assert_eq!(root, SearchRoot::File(path.clone()));
        assert_eq!(root.source_files(&Config::default().source_filter()), [path]);
    }

    #[rstest]
    fn missing_paths_are_reported(tree: TempDir) {
        let path = tree.path().join("absent.py");
        let error = SearchRoot::resolve(&path).expect_err("missing path");
        assert_eq!(
            error.to_string(),
            format!("No such file or directory: {}", path.display())
        );
    }
}
