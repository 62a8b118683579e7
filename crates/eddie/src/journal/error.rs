//! Journal and undo error types.

use std::io;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Failures reading or writing a journal file itself.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The journal file does not exist.
    #[error("journal not found")]
    NotFound,

    /// The journal file exists but is not valid JSON for an edit history.
    #[error("parse journal: {0}")]
    Parse(#[from] serde_json::Error),

    /// Reading, writing, or deleting the journal file failed.
    #[error("{0}")]
    Io(#[from] io::Error),
}

impl StoreError {
    /// Whether this failure means "there is no usable journal for the file".
    /// Both a missing file and an unparsable one qualify; callers recording a
    /// new edit start a fresh history in either case.
    pub fn is_no_journal(&self) -> bool {
        matches!(self, StoreError::NotFound | StoreError::Parse(_))
    }
}

/// Failures recording or undoing edits.
///
/// Every precondition of [`UndoEngine::undo`](super::UndoEngine::undo) maps
/// to its own variant so callers can tell rejection reasons apart.
#[derive(Debug, Error)]
pub enum UndoError {
    /// The requested undo count was zero or negative.
    #[error("count must be greater than 0, got {0}")]
    InvalidCount(i64),

    /// The target file does not exist.
    #[error("file does not exist: {}", .0.display())]
    FileNotFound(PathBuf),

    /// No journal exists for the file, or it holds no records.
    #[error("no edit records found for {}", .0.display())]
    NoHistory(PathBuf),

    /// More undos were requested than records exist. Nothing was undone.
    #[error("cannot undo {requested} edits, only {available} edits available")]
    InsufficientHistory { requested: usize, available: usize },

    /// The file was modified by something other than a recorded edit since
    /// the last record was written.
    #[error(
        "file has been modified since last tracked edit (expected: {}, actual: {})",
        expected.to_rfc3339(),
        actual.to_rfc3339()
    )]
    StaleEdit {
        expected: DateTime<Utc>,
        actual: DateTime<Utc>,
    },

    /// Reverse replace found no occurrences of the recorded replacement in
    /// the current content; the recorded edit no longer matches the file.
    #[error("no occurrences of {0:?} found to reverse")]
    NothingToReverse(String),

    /// Reverse insert was asked to remove a line the file does not have.
    #[error("line number {line} is out of range (1-{max})")]
    LineOutOfRange { line: i64, max: usize },

    /// The journal file could not be read, written, or deleted.
    #[error("edit journal for {}: {source}", path.display())]
    Journal {
        path: PathBuf,
        #[source]
        source: StoreError,
    },

    /// Reading, writing, or stat'ing the target file failed.
    #[error("{}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_no_journal() {
        assert!(StoreError::NotFound.is_no_journal());
        let parse_err = serde_json::from_str::<u32>("not json").unwrap_err();
        assert!(StoreError::Parse(parse_err).is_no_journal());
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        assert!(!StoreError::Io(io_err).is_no_journal());
    }

    #[test]
    fn test_insufficient_history_message() {
        let err = UndoError::InsufficientHistory {
            requested: 5,
            available: 2,
        };
        assert_eq!(err.to_string(), "cannot undo 5 edits, only 2 edits available");
    }

    #[test]
    fn test_invalid_count_message() {
        assert_eq!(
            UndoError::InvalidCount(0).to_string(),
            "count must be greater than 0, got 0"
        );
    }

    #[test]
    fn test_stale_edit_mentions_both_times() {
        let expected = Utc::now();
        let actual = expected + chrono::Duration::seconds(5);
        let msg = UndoError::StaleEdit { expected, actual }.to_string();
        assert!(msg.contains("modified since last tracked edit"));
        assert!(msg.contains(&expected.to_rfc3339()));
        assert!(msg.contains(&actual.to_rfc3339()));
    }
}
