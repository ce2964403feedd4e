//! Running a compiled pattern over the files of a search root.
//!
//! A directory search keeps going past files that cannot be read or
//! parsed, reporting each as a `warning:` line on stderr. A single-file
//! search fails on the first such problem instead.

use std::cell::RefCell;
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use astsearch_config::SourceFilter;
use astsearch_syntax::{Pattern, ScanEvent, SourceUnit, scan_many};
use tracing::debug;

use crate::AppError;
use crate::discovery::SearchRoot;
use crate::render::Report;

/// Totals for one search run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SearchOutcome {
    pub(crate) matches: usize,
    pub(crate) skipped: usize,
}

/// A file that has been read, shared by every event of its unit.
pub(crate) struct SourceFile {
    index: usize,
    path: PathBuf,
    text: String,
}

impl fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// Files that could not be read, waiting to be reported.
type Unread = RefCell<Vec<AppError>>;

/// Reads a file as UTF-8, replacing invalid byte sequences.
fn read_source(path: &Path) -> io::Result<String> {
    fs::read(path).map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
}

/// Turns paths into source units, reading each file only when the scanner
/// asks for it. Read failures are queued in `unread`.
pub(crate) fn read_units(
    paths: Vec<PathBuf>,
    unread: &Unread,
) -> impl Iterator<Item = SourceUnit<Rc<SourceFile>>> + '_ {
    paths
        .into_iter()
        .enumerate()
        .filter_map(move |(index, path)| match read_source(&path) {
            Ok(text) => {
                let file = Rc::new(SourceFile {
                    index,
                    path,
                    text: text.clone(),
                });
                Some(SourceUnit::new(file, text))
            }
            Err(source) => {
                unread
                    .borrow_mut()
                    .push(AppError::ReadSource { path, source });
                None
            }
        })
}

/// Handles a file that was not searched: fatal for a single-file search,
/// a warning otherwise.
fn skip<E: Write>(
    problem: AppError,
    single_file: bool,
    stderr: &mut E,
    outcome: &mut SearchOutcome,
) -> Result<(), AppError> {
    if single_file {
        return Err(problem);
    }
    writeln!(stderr, "warning: skipping {problem}").map_err(AppError::WriteOutput)?;
    outcome.skipped += 1;
    Ok(())
}

fn drain_unread<E: Write>(
    unread: &Unread,
    single_file: bool,
    stderr: &mut E,
    outcome: &mut SearchOutcome,
) -> Result<(), AppError> {
    let problems = unread.take();
    for problem in problems {
        skip(problem, single_file, stderr, outcome)?;
    }
    Ok(())
}

pub(crate) fn search<W, E>(
    pattern: &Pattern,
    root: &SearchRoot,
    filter: &SourceFilter,
    stdout: &mut W,
    stderr: &mut E,
) -> Result<SearchOutcome, AppError>
where
    W: Write,
    E: Write,
{
    let single_file = matches!(root, SearchRoot::File(_));
    let paths = root.source_files(filter);
    let files = paths.len();
    let unread = Unread::default();
    let mut outcome = SearchOutcome::default();
    let mut report = Report::new(stdout, !single_file);

    for event in scan_many(pattern, read_units(paths, &unread))? {
        drain_unread(&unread, single_file, stderr, &mut outcome)?;
        match event {
            ScanEvent::Match { unit, node } => {
                report
                    .write_match(unit.index, &unit.path, &unit.text, node.line())
                    .map_err(AppError::WriteOutput)?;
                outcome.matches += 1;
            }
            ScanEvent::Skipped { unit, error } => {
                let problem = AppError::UnparsableSource {
                    path: unit.path.clone(),
                    source: error,
                };
                skip(problem, single_file, stderr, &mut outcome)?;
            }
        }
    }
    drain_unread(&unread, single_file, stderr, &mut outcome)?;

    debug!(
        files,
        matches = outcome.matches,
        skipped = outcome.skipped,
        "search finished"
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use astsearch_config::Config;
    use tempfile::TempDir;

    use super::*;

    fn compile(pattern: &str) -> Pattern {
        Pattern::compile(pattern).expect("pattern")
    }

    fn run_search(pattern: &str, path: &Path) -> (Result<SearchOutcome, AppError>, String, String) {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let result = SearchRoot::resolve(path).and_then(|root| {
            search(
                &compile(pattern),
                &root,
                &Config::default().source_filter(),
                &mut stdout,
                &mut stderr,
            )
        });
        (
            result,
            String::from_utf8(stdout).expect("utf-8 stdout"),
            String::from_utf8(stderr).expect("utf-8 stderr"),
        )
    }

    #[test]
    fn broken_files_in_a_directory_are_skipped() {
        let dir = TempDir::new().expect("temp dir");
        fs::write(dir.path().join("a.py"), "f(1)\n").expect("write");
        fs::write(dir.path().join("b.py"), "def broken(:\n").expect("write");
        fs::write(dir.path().join("c.py"), "x = 1\nf(1, 2)\n").expect("write");

        let (result, stdout, stderr) = run_search("f(1, ??)", dir.path());
        let outcome = result.expect("search");
        assert_eq!(outcome, SearchOutcome { matches: 2, skipped: 1 });
        assert!(stdout.contains("   1|f(1)\n"), "{stdout}");
        assert!(stdout.contains("   2|f(1, 2)\n"), "{stdout}");
        assert!(stderr.starts_with("warning: skipping "), "{stderr}");
        assert!(stderr.contains("b.py"), "{stderr}");
    }

    #[test]
    fn a_broken_single_file_fails_the_search() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("broken.py");
        fs::write(&path, "def broken(:\n").expect("write");

        let (result, stdout, _) = run_search("f(?)", &path);
        let error = result.expect_err("syntax error");
        assert!(matches!(error, AppError::UnparsableSource { .. }), "{error:?}");
        assert!(stdout.is_empty());
    }

    #[test]
    fn files_are_read_only_when_the_scanner_reaches_them() {
        let dir = TempDir::new().expect("temp dir");
        let first = dir.path().join("a.py");
        let second = dir.path().join("b.py");
        fs::write(&first, "f(1)\n").expect("write");
        fs::write(&second, "f(2)\n").expect("write");

        let unread = Unread::default();
        let mut units = read_units(vec![first, second.clone()], &unread);
        let unit = units.next().expect("first unit");
        assert_eq!(unit.text, "f(1)\n");

        fs::remove_file(&second).expect("remove");
        assert!(units.next().is_none());
        let problems = unread.take();
        let [AppError::ReadSource { path, .. }] = problems.as_slice() else {
            panic!("expected one read failure, got {problems:?}");
        };
        assert_eq!(*path, second);
    }

    #[test]
    fn invalid_utf8_is_replaced_rather_than_rejected() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("latin1.py");
        fs::write(&path, b"s = '\xe9'\nprint(s)\n").expect("write");

        let (result, stdout, _) = run_search("print(?)", &path);
        assert_eq!(result.expect("search").matches, 1);
        assert_eq!(stdout, "   2|print(s)\n");
    }
}
