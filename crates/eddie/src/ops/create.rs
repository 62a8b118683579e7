//! Create a new file.

use std::io::Write;
use std::path::Path;

use crate::display;
use crate::error::Result;
use crate::fileops;

/// Creates files. Creation is not a reversible edit, so nothing is journaled.
#[derive(Debug, Default)]
pub struct Creator;

impl Creator {
    pub fn new() -> Self {
        Self
    }

    /// Write a new file, creating parent directories as needed. Refuses to
    /// overwrite an existing file.
    pub fn create<W: Write>(
        &self,
        w: &mut W,
        path: &Path,
        file_text: &str,
        opts: super::DisplayOpts,
    ) -> Result<()> {
        fileops::create_file(path, file_text)?;

        if opts.show_changes {
            display::show_new_file_content(w, path, file_text)?;
        }

        if opts.show_result {
            display::show_result(w, path, file_text)?;
        }

        writeln!(
            w,
            "Created file: {} ({} bytes)",
            path.display(),
            file_text.len()
        )?;
        Ok(())
    }
}
