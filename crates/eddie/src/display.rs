//! Terminal rendering for operation output.
//!
//! Pure presentation: every function writes to an injected writer so the CLI
//! can hand over stdout while the batch dispatcher and the MCP server capture
//! into buffers.

use std::io::{self, Write};
use std::path::Path;

/// Print the full content of a file after an operation.
pub fn show_result<W: Write>(w: &mut W, path: &Path, content: &str) -> io::Result<()> {
    writeln!(w, "\nResult of {}:", path.display())?;
    writeln!(w, "{content}")
}

/// Print a simple line diff between two versions of a file. Lines that differ
/// are shown with `-`/`+` prefixes; unchanged lines are omitted.
pub fn show_diff<W: Write>(w: &mut W, path: &Path, before: &str, after: &str) -> io::Result<()> {
    writeln!(w, "\nChanges in {}:", path.display())?;
    writeln!(w, "--- Before")?;
    writeln!(w, "+++ After")?;

    let before_lines: Vec<&str> = before.split('\n').collect();
    let after_lines: Vec<&str> = after.split('\n').collect();
    let max_lines = before_lines.len().max(after_lines.len());

    for i in 0..max_lines {
        let before_line = before_lines.get(i).copied().unwrap_or("");
        let after_line = after_lines.get(i).copied().unwrap_or("");

        if before_line != after_line {
            if !before_line.is_empty() {
                writeln!(w, "-{before_line}")?;
            }
            if !after_line.is_empty() {
                writeln!(w, "+{after_line}")?;
            }
        }
    }
    writeln!(w)
}

/// Print the content of a freshly created file, every line prefixed with `+`.
pub fn show_new_file_content<W: Write>(w: &mut W, path: &Path, content: &str) -> io::Result<()> {
    writeln!(w, "\nContent of {}:", path.display())?;
    writeln!(w, "--- New file")?;
    for line in content.split('\n') {
        writeln!(w, "+{line}")?;
    }
    writeln!(w)
}

/// Print an insert diff: the inserted line with a `+` prefix plus up to three
/// lines of surrounding context.
pub fn show_insert_diff<W: Write>(
    w: &mut W,
    path: &Path,
    original: &str,
    modified: &str,
    line_num: usize,
) -> io::Result<()> {
    writeln!(w, "\nChanges in {}:", path.display())?;
    writeln!(w, "--- Before")?;
    writeln!(w, "+++ After")?;

    let orig_lines: Vec<&str> = original.split('\n').collect();
    let mod_lines: Vec<&str> = modified.split('\n').collect();

    let start = line_num.saturating_sub(3).max(1);
    let end = (line_num + 3).min(mod_lines.len());

    for i in start..=end {
        if i == line_num {
            if i <= mod_lines.len() {
                writeln!(w, "+{}", mod_lines[i - 1])?;
            }
        } else {
            // Lines after the insertion point shift down by one in the
            // modified file; index the original accordingly.
            let orig_idx = if i > line_num { i - 1 } else { i };
            if orig_idx >= 1 && orig_idx <= orig_lines.len() {
                writeln!(w, " {}", orig_lines[orig_idx - 1])?;
            }
        }
    }
    writeln!(w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_show_result() {
        let path = PathBuf::from("a.txt");
        let out = render(|w| show_result(w, &path, "hello"));
        assert_eq!(out, "\nResult of a.txt:\nhello\n");
    }

    #[test]
    fn test_show_diff_marks_changed_lines() {
        let path = PathBuf::from("a.txt");
        let out = render(|w| show_diff(w, &path, "one\ntwo\n", "one\n2\n"));
        assert!(out.contains("--- Before"));
        assert!(out.contains("+++ After"));
        assert!(out.contains("-two"));
        assert!(out.contains("+2"));
        assert!(!out.contains("-one"));
    }

    #[test]
    fn test_show_new_file_content_prefixes_lines() {
        let path = PathBuf::from("new.txt");
        let out = render(|w| show_new_file_content(w, &path, "a\nb"));
        assert!(out.contains("+a\n"));
        assert!(out.contains("+b\n"));
    }

    #[test]
    fn test_show_insert_diff_marks_inserted_line() {
        let path = PathBuf::from("a.txt");
        let original = "line1\nline3\n";
        let modified = "line1\nline2\nline3\n";
        let out = render(|w| show_insert_diff(w, &path, original, modified, 2));
        assert!(out.contains("+line2"));
        assert!(out.contains(" line1"));
        assert!(out.contains(" line3"));
    }
}
