//! The undo_edit command front end.
//!
//! Thin wrapper over [`UndoEngine`]: runs the undo, then renders the
//! before/after capture and the summary line.

use std::io::Write;
use std::path::Path;

use crate::config::Config;
use crate::display;
use crate::error::Result;
use crate::journal::{JournalStore, UndoEngine};

pub struct UndoEditor {
    engine: UndoEngine,
}

impl UndoEditor {
    pub fn new(config: &Config) -> Self {
        Self {
            engine: UndoEngine::new(JournalStore::new(&config.journal_root)),
        }
    }

    /// Undo the last `count` recorded edits on `path`.
    pub fn undo_edit<W: Write>(
        &self,
        w: &mut W,
        path: &Path,
        opts: super::DisplayOpts,
        count: i64,
    ) -> Result<()> {
        let report = self.engine.undo(path, count)?;

        if opts.show_changes {
            display::show_diff(w, path, &report.before, &report.after)?;
        }
        if opts.show_result {
            display::show_result(w, path, &report.after)?;
        }

        match report.undone.as_slice() {
            [record] => writeln!(
                w,
                "Undid {} edit in {}",
                record.edit_type,
                path.display()
            )?,
            records => writeln!(w, "Undid {} edits in {}", records.len(), path.display())?,
        }
        Ok(())
    }
}
