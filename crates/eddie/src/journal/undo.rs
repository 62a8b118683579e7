//! The undo engine.
//!
//! Validates preconditions, walks the journal from the most recent record
//! backwards, reverses each edit, and keeps the journal consistent with what
//! is actually on disk.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::debug;

use super::error::UndoError;
use super::reverse::{reverse_insert, reverse_replace};
use super::store::JournalStore;
use super::{EditKind, EditRecord};
use crate::fileops::write_preserving_mode;

/// What an undo call actually did, for the front end to render.
#[derive(Debug)]
pub struct UndoReport {
    /// The file that was restored.
    pub path: PathBuf,
    /// The records that were undone, most recent first.
    pub undone: Vec<EditRecord>,
    /// File content before the first reversal.
    pub before: String,
    /// File content after the last reversal.
    pub after: String,
}

/// Reverses recorded edits, newest first.
#[derive(Debug, Clone)]
pub struct UndoEngine {
    store: JournalStore,
}

impl UndoEngine {
    pub fn new(store: JournalStore) -> Self {
        Self { store }
    }

    /// Undo the last `count` recorded edits on `path`.
    ///
    /// Preconditions are checked in order, each with its own error: the
    /// count must be positive (checked before any I/O), the file must exist,
    /// a non-empty journal must exist, the count must not exceed the number
    /// of records (no partial undo), and the last record's modification time
    /// must match the file's actual mtime. The staleness check runs once,
    /// against the file's state before any reversal in this call.
    ///
    /// Each undone record costs one file write. The journal itself is read
    /// once and written (or deleted) at most once, after all reversals
    /// succeed; a failure partway through leaves the journal untouched on
    /// disk, so already-applied file writes from this call are the only
    /// residue.
    pub fn undo(&self, path: &Path, count: i64) -> Result<UndoReport, UndoError> {
        if count <= 0 {
            return Err(UndoError::InvalidCount(count));
        }

        let metadata = match fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(UndoError::FileNotFound(path.to_path_buf()))
            }
            Err(source) => {
                return Err(UndoError::File {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let journal_path = self.store.locate(path).map_err(|source| UndoError::File {
            path: path.to_path_buf(),
            source,
        })?;

        let mut history = match self.store.load(&journal_path) {
            Ok(history) => history,
            Err(e) if e.is_no_journal() => {
                return Err(UndoError::NoHistory(path.to_path_buf()))
            }
            Err(source) => {
                return Err(UndoError::Journal {
                    path: journal_path,
                    source,
                })
            }
        };

        if history.edits.is_empty() {
            return Err(UndoError::NoHistory(path.to_path_buf()));
        }

        let requested = count as usize;
        let available = history.edits.len();
        if requested > available {
            return Err(UndoError::InsufficientHistory {
                requested,
                available,
            });
        }

        let actual: DateTime<Utc> = metadata
            .modified()
            .map_err(|source| UndoError::File {
                path: path.to_path_buf(),
                source,
            })?
            .into();
        let expected = history.edits[available - 1].file_mod_time;
        if expected != actual {
            return Err(UndoError::StaleEdit { expected, actual });
        }

        let mut undone = Vec::with_capacity(requested);
        let mut before = String::new();
        let mut after = String::new();

        for i in 0..requested {
            let record = match history.edits.pop() {
                Some(record) => record,
                None => break,
            };

            let content = fs::read_to_string(path).map_err(|source| UndoError::File {
                path: path.to_path_buf(),
                source,
            })?;
            if i == 0 {
                before = content.clone();
            }

            let reversed = match record.edit_type {
                EditKind::StrReplace => {
                    reverse_replace(&content, &record.old_content, &record.new_content)?
                }
                EditKind::Insert => reverse_insert(&content, record.position)?,
            };

            write_preserving_mode(path, &reversed).map_err(|source| UndoError::File {
                path: path.to_path_buf(),
                source,
            })?;

            after = reversed;
            undone.push(record);
        }

        if history.edits.is_empty() {
            self.store
                .delete(&journal_path)
                .map_err(|source| UndoError::Journal {
                    path: journal_path.clone(),
                    source,
                })?;
        } else {
            // Re-anchor the concurrency token: the undo writes above moved
            // the file's mtime, and the next undo must compare against the
            // state this call left behind.
            let new_mtime: DateTime<Utc> = fs::metadata(path)
                .and_then(|m| m.modified())
                .map_err(|source| UndoError::File {
                    path: path.to_path_buf(),
                    source,
                })?
                .into();
            if let Some(last) = history.edits.last_mut() {
                last.file_mod_time = new_mtime;
            }
            self.store
                .save(&journal_path, &history)
                .map_err(|source| UndoError::Journal {
                    path: journal_path.clone(),
                    source,
                })?;
        }

        debug!(
            path = %path.display(),
            undone = undone.len(),
            remaining = history.edits.len(),
            "undid edits"
        );

        Ok(UndoReport {
            path: path.to_path_buf(),
            undone,
            before,
            after,
        })
    }
}
