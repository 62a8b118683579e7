//! List directory entries.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::{Error, Result};

#[derive(Debug, Default)]
pub struct Lister;

impl Lister {
    pub fn new() -> Self {
        Self
    }

    /// Print the entries of a directory, one name per line, sorted.
    pub fn ls<W: Write>(&self, w: &mut W, path: &Path) -> Result<()> {
        let read_dir = fs::read_dir(path).map_err(|source| Error::ReadDir {
            path: path.to_path_buf(),
            source,
        })?;

        let mut names: Vec<String> = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|source| Error::ReadDir {
                path: path.to_path_buf(),
                source,
            })?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();

        for name in names {
            writeln!(w, "{name}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ls_lists_sorted_names() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("b.txt"), "x").unwrap();
        fs::write(temp_dir.path().join("a.txt"), "x").unwrap();
        fs::create_dir(temp_dir.path().join("sub")).unwrap();

        let mut out = Vec::new();
        Lister::new().ls(&mut out, temp_dir.path()).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "a.txt\nb.txt\nsub\n");
    }

    #[test]
    fn test_ls_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let mut out = Vec::new();
        let result = Lister::new().ls(&mut out, &temp_dir.path().join("gone"));
        assert!(matches!(result, Err(Error::ReadDir { .. })));
    }
}
