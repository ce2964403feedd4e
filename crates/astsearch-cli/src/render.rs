//! Plain-text rendering of search results.
//!
//! Each matching file contributes a block of `line|source` rows. When a
//! directory is searched the block is headed by the file path, and blocks
//! are separated by a blank line.

use std::io::{self, Write};
use std::path::Path;

/// Formats one result row: the right-aligned line number, a bar, and the
/// source line without trailing whitespace.
pub(crate) fn format_match(line: u32, source: &str) -> String {
    let text = usize::try_from(line.saturating_sub(1))
        .ok()
        .and_then(|index| source.lines().nth(index))
        .unwrap_or_default();
    format!("{line:>4}|{}", text.trim_end())
}

/// Streams result rows, starting a new block whenever the file changes.
pub(crate) struct Report<'w, W: Write> {
    out: &'w mut W,
    show_paths: bool,
    current: Option<usize>,
}

impl<'w, W: Write> Report<'w, W> {
    pub(crate) const fn new(out: &'w mut W, show_paths: bool) -> Self {
        Self {
            out,
            show_paths,
            current: None,
        }
    }

    /// Writes the row for a match on `line` of file number `unit`.
    pub(crate) fn write_match(
        &mut self,
        unit: usize,
        path: &Path,
        source: &str,
        line: u32,
    ) -> io::Result<()> {
        if self.current != Some(unit) {
            if self.show_paths {
                if self.current.is_some() {
                    writeln!(self.out)?;
                }
                writeln!(self.out, "{}", path.display())?;
            }
            self.current = Some(unit);
        }
        writeln!(self.out, "{}", format_match(line, source))
    }
}
