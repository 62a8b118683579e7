//! Appending edits to the journal.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::debug;

use super::error::UndoError;
use super::store::JournalStore;
use super::{EditHistory, EditKind, EditRecord};

/// Records one edit per mutating operation.
///
/// Must be called strictly after the file write it describes has landed on
/// disk: the record's `file_mod_time` is the post-write modification time,
/// and the undo engine compares it against the file before reversing
/// anything.
#[derive(Debug, Clone)]
pub struct EditRecorder {
    store: JournalStore,
}

impl EditRecorder {
    pub fn new(store: JournalStore) -> Self {
        Self { store }
    }

    /// Append an edit record for `path`. If the file cannot be stat'd (for
    /// example it was deleted between the write and this call) the record is
    /// not written and the edit is simply not undoable; the error is loud so
    /// callers can surface it.
    pub fn record(
        &self,
        path: &Path,
        edit_type: EditKind,
        old_content: &str,
        new_content: &str,
        position: i64,
    ) -> Result<(), UndoError> {
        let journal_path = self.store.locate(path).map_err(|source| UndoError::File {
            path: path.to_path_buf(),
            source,
        })?;

        let metadata = fs::metadata(path).map_err(|source| UndoError::File {
            path: path.to_path_buf(),
            source,
        })?;
        let file_mod_time: DateTime<Utc> = metadata
            .modified()
            .map_err(|source| UndoError::File {
                path: path.to_path_buf(),
                source,
            })?
            .into();

        let mut history = match self.store.load(&journal_path) {
            Ok(history) => history,
            Err(e) if e.is_no_journal() => EditHistory::new(path.to_path_buf()),
            Err(source) => {
                return Err(UndoError::Journal {
                    path: journal_path,
                    source,
                })
            }
        };

        history.edits.push(EditRecord {
            edit_type,
            old_content: old_content.to_string(),
            new_content: new_content.to_string(),
            position,
            timestamp: Utc::now(),
            file_mod_time,
        });

        self.store
            .save(&journal_path, &history)
            .map_err(|source| UndoError::Journal {
                path: journal_path.clone(),
                source,
            })?;

        debug!(
            path = %path.display(),
            %edit_type,
            edits = history.edits.len(),
            "recorded edit"
        );
        Ok(())
    }
}
