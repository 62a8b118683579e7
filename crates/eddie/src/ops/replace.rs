//! Replace all occurrences of a string in a file.

use std::io::Write;
use std::path::Path;

use crate::config::Config;
use crate::display;
use crate::error::{Error, Result};
use crate::fileops;
use crate::journal::{EditKind, EditRecorder, JournalStore, NO_POSITION};

pub struct Replacer {
    recorder: EditRecorder,
}

impl Replacer {
    pub fn new(config: &Config) -> Self {
        Self {
            recorder: EditRecorder::new(JournalStore::new(&config.journal_root)),
        }
    }

    /// Replace every occurrence of `old_str` with `new_str` in `path`.
    ///
    /// When nothing matches, the file is left untouched and no edit is
    /// recorded. Otherwise the new content is written first and the edit is
    /// journaled after the write; a journaling failure is surfaced as
    /// [`Error::Record`] while the file change stands.
    pub fn str_replace<W: Write>(
        &self,
        w: &mut W,
        path: &Path,
        old_str: &str,
        new_str: &str,
        opts: super::DisplayOpts,
    ) -> Result<()> {
        let (original, _metadata) = fileops::read_for_operation(path, "replace strings in")?;

        let modified = original.replace(old_str, new_str);
        if original == modified {
            writeln!(
                w,
                "No occurrences of {:?} found in {}",
                old_str,
                path.display()
            )?;
            return Ok(());
        }

        if opts.show_changes {
            display::show_diff(w, path, &original, &modified)?;
        }

        fileops::write_preserving_mode(path, &modified).map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })?;

        if opts.show_result {
            display::show_result(w, path, &modified)?;
        }

        self.recorder
            .record(path, EditKind::StrReplace, old_str, new_str, NO_POSITION)
            .map_err(Error::Record)?;

        let count = original.matches(old_str).count();
        writeln!(
            w,
            "Replaced {} occurrence(s) of {:?} with {:?} in {}",
            count,
            old_str,
            new_str,
            path.display()
        )?;
        Ok(())
    }
}
