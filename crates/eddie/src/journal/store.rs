//! On-disk journal storage.
//!
//! Translates between a target file path and its journal file, and
//! serializes [`EditHistory`] as pretty-printed JSON so journals stay
//! human-diffable.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::StoreError;
use super::safe_name::safe_file_name;
use super::EditHistory;

/// Extension appended to every journal file.
const JOURNAL_SUFFIX: &str = "json";

/// Reads and writes per-file journals under a fixed root directory.
///
/// The root is injected at construction; the store itself never consults the
/// environment, which keeps it testable against a temporary directory.
#[derive(Debug, Clone)]
pub struct JournalStore {
    root: PathBuf,
}

impl JournalStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory this store keeps journals in.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Compute the journal path for a target file. Relative targets are
    /// resolved against the current working directory first so that the
    /// recorder and the undo engine agree on the name regardless of how the
    /// caller spelled the path.
    pub fn locate(&self, path: &Path) -> io::Result<PathBuf> {
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            env::current_dir()?.join(path)
        };

        let mut file_name = safe_file_name(&absolute);
        file_name.push('.');
        file_name.push_str(JOURNAL_SUFFIX);

        Ok(self.root.join(file_name))
    }

    /// Load a journal. A missing file is [`StoreError::NotFound`] and a
    /// corrupt one is [`StoreError::Parse`]; callers treat both as "no
    /// journal for this file".
    pub fn load(&self, journal_path: &Path) -> Result<EditHistory, StoreError> {
        let data = fs::read_to_string(journal_path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                StoreError::NotFound
            } else {
                StoreError::Io(e)
            }
        })?;

        let history = serde_json::from_str(&data)?;
        Ok(history)
    }

    /// Persist a journal, creating the journal directory on first write.
    pub fn save(&self, journal_path: &Path, history: &EditHistory) -> Result<(), StoreError> {
        if let Some(parent) = journal_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let data = serde_json::to_string_pretty(history)?;
        fs::write(journal_path, data)?;

        debug!(
            journal = %journal_path.display(),
            edits = history.edits.len(),
            "saved edit journal"
        );
        Ok(())
    }

    /// Remove a journal file. Called once a history has no records left; an
    /// empty history is never written to disk.
    pub fn delete(&self, journal_path: &Path) -> Result<(), StoreError> {
        fs::remove_file(journal_path)?;
        debug!(journal = %journal_path.display(), "deleted empty edit journal");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::{EditKind, EditRecord, NO_POSITION};
    use chrono::Utc;
    use tempfile::TempDir;

    fn store() -> (TempDir, JournalStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = JournalStore::new(temp_dir.path());
        (temp_dir, store)
    }

    fn sample_record() -> EditRecord {
        EditRecord {
            edit_type: EditKind::StrReplace,
            old_content: "hello".to_string(),
            new_content: "hi".to_string(),
            position: NO_POSITION,
            timestamp: Utc::now(),
            file_mod_time: Utc::now(),
        }
    }

    #[test]
    fn test_locate_is_stable_for_absolute_paths() {
        let (_tmp, store) = store();
        let a = store.locate(Path::new("/tmp/a.txt")).unwrap();
        let b = store.locate(Path::new("/tmp/a.txt")).unwrap();
        assert_eq!(a, b);
        assert!(a.to_string_lossy().ends_with(".json"));
        assert!(a.starts_with(store.root()));
    }

    #[test]
    fn test_locate_absolutizes_relative_paths() {
        let (_tmp, store) = store();
        let relative = store.locate(Path::new("a.txt")).unwrap();
        let absolute = store
            .locate(&env::current_dir().unwrap().join("a.txt"))
            .unwrap();
        assert_eq!(relative, absolute);
    }

    #[test]
    fn test_load_missing_is_not_found() {
        let (_tmp, store) = store();
        let result = store.load(Path::new("/nonexistent/journal.json"));
        assert!(matches!(result, Err(StoreError::NotFound)));
    }

    #[test]
    fn test_load_corrupt_is_parse_error() {
        let (tmp, store) = store();
        let journal_path = tmp.path().join("bad.json");
        fs::write(&journal_path, "{ not json").unwrap();

        let result = store.load(&journal_path);
        assert!(matches!(result, Err(StoreError::Parse(_))));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let (tmp, store) = store();
        let journal_path = tmp.path().join("nested").join("a.json");

        let mut history = EditHistory::new("/tmp/a.txt");
        history.edits.push(sample_record());

        store.save(&journal_path, &history).unwrap();
        let loaded = store.load(&journal_path).unwrap();

        assert_eq!(loaded.file_path, history.file_path);
        assert_eq!(loaded.edits.len(), 1);
        assert_eq!(loaded.edits[0].new_content, "hi");
        assert_eq!(loaded.edits[0].file_mod_time, history.edits[0].file_mod_time);
    }

    #[test]
    fn test_saved_journal_is_pretty_json() {
        let (tmp, store) = store();
        let journal_path = tmp.path().join("a.json");
        let mut history = EditHistory::new("/tmp/a.txt");
        history.edits.push(sample_record());

        store.save(&journal_path, &history).unwrap();
        let raw = fs::read_to_string(&journal_path).unwrap();
        assert!(raw.contains("\"file_path\""));
        assert!(raw.contains('\n'));
    }

    #[test]
    fn test_delete_removes_journal() {
        let (tmp, store) = store();
        let journal_path = tmp.path().join("a.json");
        store
            .save(&journal_path, &EditHistory::new("/tmp/a.txt"))
            .unwrap();

        store.delete(&journal_path).unwrap();
        assert!(!journal_path.exists());
    }
}
