//! Reverse-edit algorithms.
//!
//! Pure functions computing the file content that existed before an edit was
//! applied. The inverse is derived on demand from the record; nothing here
//! touches the filesystem.

use super::error::UndoError;

/// Undo a replace-all by substituting every occurrence of `new` back to
/// `old`.
///
/// Fails with [`UndoError::NothingToReverse`] when `new` no longer occurs in
/// the content, which means the recorded edit does not match the file's
/// current state. Reversal is by global content matching, not by the original
/// occurrence positions: if the same `new` text later appears in the file for
/// unrelated reasons, those occurrences are reversed too.
pub fn reverse_replace(content: &str, old: &str, new: &str) -> Result<String, UndoError> {
    if !content.contains(new) {
        return Err(UndoError::NothingToReverse(new.to_string()));
    }

    Ok(content.replace(new, old))
}

/// Undo a line insert by removing the line at `line_number` (1-based).
///
/// Splitting is trailing-newline-aware, matching the insert operation's own
/// convention: the empty fragment produced by a final `\n` is not counted as
/// a line, and the trailing newline is restored after the removal.
pub fn reverse_insert(content: &str, line_number: i64) -> Result<String, UndoError> {
    let has_trailing_newline = content.ends_with('\n');
    let mut lines: Vec<&str> = content.split('\n').collect();

    if has_trailing_newline && !lines.is_empty() {
        lines.pop();
    }

    if line_number < 1 || line_number as usize > lines.len() {
        return Err(UndoError::LineOutOfRange {
            line: line_number,
            max: lines.len(),
        });
    }

    lines.remove(line_number as usize - 1);

    let mut joined = lines.join("\n");
    if has_trailing_newline {
        joined.push('\n');
    }

    Ok(joined)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_replace_restores_old_text() {
        let reversed = reverse_replace("hi world\nline2\n", "hello", "hi").unwrap();
        assert_eq!(reversed, "hello world\nline2\n");
    }

    #[test]
    fn test_reverse_replace_reverses_every_occurrence() {
        let reversed = reverse_replace("b a b", "a", "b").unwrap();
        assert_eq!(reversed, "a a a");
    }

    #[test]
    fn test_reverse_replace_missing_replacement() {
        let result = reverse_replace("unchanged text", "old", "new");
        assert!(matches!(result, Err(UndoError::NothingToReverse(_))));
    }

    #[test]
    fn test_reverse_insert_middle_line() {
        let reversed = reverse_insert("line1\nline2\nline3\n", 2).unwrap();
        assert_eq!(reversed, "line1\nline3\n");
    }

    #[test]
    fn test_reverse_insert_first_line() {
        let reversed = reverse_insert("new\nline1\nline2\n", 1).unwrap();
        assert_eq!(reversed, "line1\nline2\n");
    }

    #[test]
    fn test_reverse_insert_last_line() {
        let reversed = reverse_insert("line1\nline2\nnew\n", 3).unwrap();
        assert_eq!(reversed, "line1\nline2\n");
    }

    #[test]
    fn test_reverse_insert_without_trailing_newline() {
        let reversed = reverse_insert("line1\nline2", 2).unwrap();
        assert_eq!(reversed, "line1");
    }

    #[test]
    fn test_reverse_insert_line_out_of_range() {
        let result = reverse_insert("line1\nline2\n", 3);
        assert!(matches!(
            result,
            Err(UndoError::LineOutOfRange { line: 3, max: 2 })
        ));

        let result = reverse_insert("line1\nline2\n", 0);
        assert!(matches!(result, Err(UndoError::LineOutOfRange { .. })));
    }

    #[test]
    fn test_reverse_insert_single_line_file() {
        let reversed = reverse_insert("only\n", 1).unwrap();
        assert_eq!(reversed, "\n");
    }
}
