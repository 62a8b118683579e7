//! The edit journal: a per-file, on-disk log of reversible edits.
//!
//! Every mutating operation appends an [`EditRecord`] to the journal for the
//! file it touched (see [`EditRecorder`]). The [`UndoEngine`] walks the
//! journal from the most recent record backwards, computing the pre-edit
//! content for each record and writing it back, while the recorded
//! modification time guards against undoing across changes the journal never
//! saw.
//!
//! Journals are stored as pretty-printed JSON under a configurable cache
//! root, one file per edited path, named by [`safe_name::safe_file_name`].
//! An empty journal is never written: undoing the last record deletes the
//! journal file.

pub mod error;
pub mod recorder;
pub mod reverse;
pub mod safe_name;
pub mod store;
pub mod undo;

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use error::{StoreError, UndoError};
pub use recorder::EditRecorder;
pub use store::JournalStore;
pub use undo::{UndoEngine, UndoReport};

/// Sentinel stored in [`EditRecord::position`] for edits that are not
/// line-addressed.
pub const NO_POSITION: i64 = -1;

/// The kind of a recorded edit, which selects the reverse algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditKind {
    /// All occurrences of one string were replaced with another.
    StrReplace,
    /// A single line was inserted at a 1-based position.
    Insert,
}

impl fmt::Display for EditKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditKind::StrReplace => f.write_str("str_replace"),
            EditKind::Insert => f.write_str("insert"),
        }
    }
}

/// One reversible mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditRecord {
    /// Which edit was applied.
    pub edit_type: EditKind,
    /// For `str_replace`: the string that was searched for. Empty for
    /// `insert`.
    pub old_content: String,
    /// For `str_replace`: the replacement string. For `insert`: the line
    /// that was inserted.
    pub new_content: String,
    /// 1-based line number for `insert`; [`NO_POSITION`] for `str_replace`.
    pub position: i64,
    /// When the edit was recorded. Informational only.
    pub timestamp: DateTime<Utc>,
    /// The target file's modification time immediately after this edit was
    /// written. This is the record's concurrency token: undo refuses to run
    /// when the file's actual mtime no longer matches the last record.
    pub file_mod_time: DateTime<Utc>,
}

/// The per-file journal: an append-ordered sequence of edits. Order is
/// significant; the last record is the first one undone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditHistory {
    pub file_path: PathBuf,
    pub edits: Vec<EditRecord>,
}

impl EditHistory {
    /// Start a fresh, empty history for a file.
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            edits: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_kind_serializes_to_wire_names() {
        assert_eq!(
            serde_json::to_string(&EditKind::StrReplace).unwrap(),
            "\"str_replace\""
        );
        assert_eq!(serde_json::to_string(&EditKind::Insert).unwrap(), "\"insert\"");
    }

    #[test]
    fn test_edit_kind_display() {
        assert_eq!(EditKind::StrReplace.to_string(), "str_replace");
        assert_eq!(EditKind::Insert.to_string(), "insert");
    }

    #[test]
    fn test_history_round_trips_through_json() {
        let history = EditHistory {
            file_path: PathBuf::from("/tmp/a.txt"),
            edits: vec![EditRecord {
                edit_type: EditKind::Insert,
                old_content: String::new(),
                new_content: "line2".to_string(),
                position: 2,
                timestamp: Utc::now(),
                file_mod_time: Utc::now(),
            }],
        };

        let json = serde_json::to_string_pretty(&history).unwrap();
        let parsed: EditHistory = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.file_path, history.file_path);
        assert_eq!(parsed.edits.len(), 1);
        assert_eq!(parsed.edits[0].edit_type, EditKind::Insert);
        assert_eq!(parsed.edits[0].position, 2);
        assert_eq!(parsed.edits[0].file_mod_time, history.edits[0].file_mod_time);
    }
}
