//! Insert a line at a 1-based position in a file.

use std::io::Write;
use std::path::Path;

use crate::config::Config;
use crate::display;
use crate::error::{Error, Result};
use crate::fileops;
use crate::journal::{EditKind, EditRecorder, JournalStore};

pub struct Inserter {
    recorder: EditRecorder,
}

impl Inserter {
    pub fn new(config: &Config) -> Self {
        Self {
            recorder: EditRecorder::new(JournalStore::new(&config.journal_root)),
        }
    }

    /// Insert with the line number still in string form, as the CLI receives
    /// it.
    pub fn insert<W: Write>(
        &self,
        w: &mut W,
        path: &Path,
        insert_line: &str,
        new_str: &str,
        opts: super::DisplayOpts,
    ) -> Result<()> {
        let line_num = parse_line_number(insert_line)?;
        self.insert_at(w, path, line_num, new_str, opts)
    }

    /// Insert `new_str` as a new line at `line_num` (1-based; one past the
    /// last line appends). The write lands first, then the edit is journaled;
    /// a journaling failure surfaces as [`Error::Record`].
    pub fn insert_at<W: Write>(
        &self,
        w: &mut W,
        path: &Path,
        line_num: usize,
        new_str: &str,
        opts: super::DisplayOpts,
    ) -> Result<()> {
        if line_num < 1 {
            return Err(Error::InvalidLineNumber(format!(
                "line number must be >= 1, got {line_num}"
            )));
        }

        let (original, _metadata) = fileops::read_for_operation(path, "insert line in")?;

        let modified = insert_line(&original, line_num, new_str)?;

        if opts.show_changes {
            display::show_insert_diff(w, path, &original, &modified, line_num)?;
        }

        fileops::write_preserving_mode(path, &modified).map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })?;

        if opts.show_result {
            display::show_result(w, path, &modified)?;
        }

        self.recorder
            .record(path, EditKind::Insert, "", new_str, line_num as i64)
            .map_err(Error::Record)?;

        writeln!(
            w,
            "Inserted line at position {} in {}",
            line_num,
            path.display()
        )?;
        Ok(())
    }
}

fn parse_line_number(insert_line: &str) -> Result<usize> {
    let line_num: i64 = insert_line
        .trim()
        .parse()
        .map_err(|_| Error::InvalidLineNumber(insert_line.to_string()))?;

    if line_num < 1 {
        return Err(Error::InvalidLineNumber(format!(
            "line number must be >= 1, got {line_num}"
        )));
    }

    Ok(line_num as usize)
}

/// Splice a new line into the content, trailing-newline-aware. An empty file
/// becomes the new line plus a newline; a position one past the last line
/// appends.
fn insert_line(content: &str, line_num: usize, new_str: &str) -> Result<String> {
    if content.is_empty() {
        return Ok(format!("{new_str}\n"));
    }

    let has_trailing_newline = content.ends_with('\n');
    let mut lines: Vec<&str> = content.split('\n').collect();
    if has_trailing_newline && !lines.is_empty() {
        lines.pop();
    }

    if line_num > lines.len() + 1 {
        return Err(Error::LineBeyondEof {
            line: line_num,
            lines: lines.len(),
        });
    }

    lines.insert(line_num - 1, new_str);

    let mut joined = lines.join("\n");
    if has_trailing_newline {
        joined.push('\n');
    }

    Ok(joined)
}
