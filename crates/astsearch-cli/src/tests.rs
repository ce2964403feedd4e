//! Unit tests for the CLI runtime with an injected configuration loader.

use std::cell::RefCell;
use std::ffi::OsString;
use std::fs;

use astsearch_config::Config;
use rstest::{fixture, rstest};
use tempfile::TempDir;

use super::*;

/// Loader that records the arguments it receives and returns a fixed
/// configuration.
struct RecordingLoader {
    config: Config,
    seen: RefCell<Vec<OsString>>,
}

impl RecordingLoader {
    fn new(config: Config) -> Self {
        Self {
            config,
            seen: RefCell::new(Vec::new()),
        }
    }
}

impl ConfigLoader for RecordingLoader {
    fn load(&self, args: &[OsString]) -> Result<Config, AppError> {
        self.seen.borrow_mut().extend_from_slice(args);
        Ok(self.config.clone())
    }
}

struct Outcome {
    code: ExitCode,
    stdout: String,
    stderr: String,
}

fn invoke(args: &[&str], loader: &RecordingLoader) -> Outcome {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let code = run_with_loader(
        args.iter().map(OsString::from),
        &mut stdout,
        &mut stderr,
        loader,
    );
    Outcome {
        code,
        stdout: String::from_utf8(stdout).expect("utf-8 stdout"),
        stderr: String::from_utf8(stderr).expect("utf-8 stderr"),
    }
}

#[fixture]
fn project() -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    fs::create_dir_all(dir.path().join("pkg")).expect("create pkg");
    fs::write(dir.path().join("a.py"), "1/2\nx = 3//4\n").expect("write a.py");
    fs::write(dir.path().join("pkg/b.py"), "\ndef f(x, y):\n    return x/y\n")
        .expect("write b.py");
    fs::write(dir.path().join("pkg/c.pyi"), "a/b\n").expect("write c.pyi");
    dir
}

fn path_arg(dir: &TempDir) -> String {
    dir.path().to_string_lossy().into_owned()
}

#[rstest]
fn directory_search_groups_matches_by_file(project: TempDir) {
    let loader = RecordingLoader::new(Config::default());
    let root = path_arg(&project);
    let outcome = invoke(&["astsearch", "?/?", &root], &loader);

    assert_eq!(outcome.code, ExitCode::SUCCESS);
    let a_path = project.path().join("a.py");
    let b_path = project.path().join("pkg").join("b.py");
    assert_eq!(
        outcome.stdout,
        format!(
            "{}\n   1|1/2\n\n{}\n   3|    return x/y\n",
            a_path.display(),
            b_path.display()
        )
    );
    assert!(outcome.stderr.is_empty(), "{}", outcome.stderr);
}

#[rstest]
fn configured_extensions_change_the_files_searched(project: TempDir) {
    let loader = RecordingLoader::new(Config {
        extensions: vec!["pyi".to_owned()],
        ..Config::default()
    });
    let root = path_arg(&project);
    let outcome = invoke(&["astsearch", "?/?", &root], &loader);

    let c_path = project.path().join("pkg").join("c.pyi");
    assert_eq!(outcome.stdout, format!("{}\n   1|a/b\n", c_path.display()));
}

#[rstest]
fn file_search_prints_rows_without_a_header(project: TempDir) {
    let loader = RecordingLoader::new(Config::default());
    let file = project.path().join("a.py").to_string_lossy().into_owned();
    let outcome = invoke(&["astsearch", "?//?", &file], &loader);

    assert_eq!(outcome.code, ExitCode::SUCCESS);
    assert_eq!(outcome.stdout, "   2|x = 3//4\n");
}

#[rstest]
fn debug_prints_the_compiled_pattern_first(project: TempDir) {
    let loader = RecordingLoader::new(Config::default());
    let file = project.path().join("a.py").to_string_lossy().into_owned();
    let outcome = invoke(&["astsearch", "--debug", "1/2", &file], &loader);

    let mut lines = outcome.stdout.lines();
    let dump = lines.next().expect("pattern dump");
    assert!(dump.starts_with("BinOp("), "{dump}");
    assert_eq!(lines.next(), Some("   1|1/2"));
}

#[rstest]
fn configuration_flags_reach_the_loader(project: TempDir) {
    let loader = RecordingLoader::new(Config::default());
    let root = path_arg(&project);
    let outcome = invoke(
        &["astsearch", "--log-filter", "warn", "?/?", &root],
        &loader,
    );

    assert_eq!(outcome.code, ExitCode::SUCCESS);
    assert_eq!(
        *loader.seen.borrow(),
        ["astsearch", "--log-filter", "warn"].map(OsString::from)
    );
}

#[test]
fn missing_paths_fail_with_the_path_named() {
    let loader = RecordingLoader::new(Config::default());
    let outcome = invoke(&["astsearch", "f(?)", "no/such/dir"], &loader);

    assert_eq!(outcome.code, ExitCode::FAILURE);
    assert_eq!(
        outcome.stderr,
        "astsearch: No such file or directory: no/such/dir\n"
    );
    assert!(outcome.stdout.is_empty());
}

#[test]
fn invalid_patterns_fail_before_searching() {
    let loader = RecordingLoader::new(Config::default());
    let outcome = invoke(&["astsearch", "f(??, ??)"], &loader);

    assert_eq!(outcome.code, ExitCode::FAILURE);
    assert!(
        outcome.stderr.contains("invalid pattern at 1:7"),
        "{}",
        outcome.stderr
    );
}

#[test]
fn missing_pattern_is_a_usage_error() {
    let loader = RecordingLoader::new(Config::default());
    let outcome = invoke(&["astsearch"], &loader);

    assert_eq!(outcome.code, ExitCode::from(2));
    assert!(outcome.stderr.contains("<PATTERN>"), "{}", outcome.stderr);
    assert!(loader.seen.borrow().is_empty());
}

#[test]
fn help_goes_to_stdout_and_succeeds() {
    let loader = RecordingLoader::new(Config::default());
    let outcome = invoke(&["astsearch", "--help"], &loader);

    assert_eq!(outcome.code, ExitCode::SUCCESS);
    assert!(outcome.stdout.contains("Usage: astsearch"), "{}", outcome.stdout);
    assert!(outcome.stderr.is_empty());
}
