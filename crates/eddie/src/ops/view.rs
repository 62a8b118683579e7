//! View file contents or list a directory.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::{Error, Result};

/// An optional 1-based inclusive line range. `end` of `-1` reads to EOF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ViewRange {
    start: usize,
    end: Option<usize>,
}

#[derive(Debug, Default)]
pub struct Viewer;

impl Viewer {
    pub fn new() -> Self {
        Self
    }

    /// Print a file's lines (optionally restricted to `start,end`) or, for a
    /// directory, its entries with a `/` suffix on subdirectories.
    pub fn view<W: Write>(&self, w: &mut W, path: &Path, view_range: Option<&str>) -> Result<()> {
        let metadata = fs::metadata(path).map_err(|source| Error::Stat {
            path: path.to_path_buf(),
            source,
        })?;

        if metadata.is_dir() {
            self.view_dir(w, path)
        } else {
            self.view_file(w, path, view_range)
        }
    }

    fn view_dir<W: Write>(&self, w: &mut W, path: &Path) -> Result<()> {
        let mut entries: Vec<(String, bool)> = Vec::new();
        let read_dir = fs::read_dir(path).map_err(|source| Error::ReadDir {
            path: path.to_path_buf(),
            source,
        })?;

        for entry in read_dir {
            let entry = entry.map_err(|source| Error::ReadDir {
                path: path.to_path_buf(),
                source,
            })?;
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            entries.push((entry.file_name().to_string_lossy().into_owned(), is_dir));
        }
        entries.sort();

        for (name, is_dir) in entries {
            if is_dir {
                writeln!(w, "{name}/")?;
            } else {
                writeln!(w, "{name}")?;
            }
        }
        Ok(())
    }

    fn view_file<W: Write>(&self, w: &mut W, path: &Path, view_range: Option<&str>) -> Result<()> {
        let range = parse_range(view_range)?;

        let content = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;

        for (idx, line) in content.lines().enumerate() {
            let line_num = idx + 1;
            if let Some(range) = range {
                if line_num < range.start {
                    continue;
                }
                if let Some(end) = range.end {
                    if line_num > end {
                        break;
                    }
                }
            }
            writeln!(w, "{line}")?;
        }
        Ok(())
    }
}

fn parse_range(view_range: Option<&str>) -> Result<Option<ViewRange>> {
    let raw = match view_range {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Ok(None),
    };

    let parts: Vec<&str> = raw.split(',').collect();
    if parts.len() != 2 {
        return Err(Error::InvalidRange(
            "invalid range format, expected start,end".to_string(),
        ));
    }

    let start: usize = parts[0]
        .trim()
        .parse()
        .map_err(|_| Error::InvalidRange(format!("invalid start: {}", parts[0].trim())))?;

    let end_str = parts[1].trim();
    if end_str == "-1" {
        return Ok(Some(ViewRange { start, end: None }));
    }

    let end: usize = end_str
        .parse()
        .map_err(|_| Error::InvalidRange(format!("invalid end: {end_str}")))?;

    if start > end {
        return Err(Error::InvalidRange(
            "start cannot be greater than end".to_string(),
        ));
    }

    Ok(Some(ViewRange {
        start,
        end: Some(end),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn view_to_string(path: &Path, range: Option<&str>) -> Result<String> {
        let mut out = Vec::new();
        Viewer::new().view(&mut out, path, range)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_view_whole_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("a.txt");
        fs::write(&file, "one\ntwo\nthree\n").unwrap();

        assert_eq!(view_to_string(&file, None).unwrap(), "one\ntwo\nthree\n");
    }

    #[test]
    fn test_view_range() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("a.txt");
        fs::write(&file, "one\ntwo\nthree\nfour\n").unwrap();

        assert_eq!(view_to_string(&file, Some("2,3")).unwrap(), "two\nthree\n");
    }

    #[test]
    fn test_view_range_to_eof() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("a.txt");
        fs::write(&file, "one\ntwo\nthree\n").unwrap();

        assert_eq!(view_to_string(&file, Some("2,-1")).unwrap(), "two\nthree\n");
    }

    #[test]
    fn test_view_invalid_ranges() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("a.txt");
        fs::write(&file, "one\n").unwrap();

        assert!(matches!(
            view_to_string(&file, Some("3,1")),
            Err(Error::InvalidRange(_))
        ));
        assert!(matches!(
            view_to_string(&file, Some("1")),
            Err(Error::InvalidRange(_))
        ));
        assert!(matches!(
            view_to_string(&file, Some("a,b")),
            Err(Error::InvalidRange(_))
        ));
    }

    #[test]
    fn test_view_directory_lists_entries() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("file.txt"), "x").unwrap();
        fs::create_dir(temp_dir.path().join("sub")).unwrap();

        let out = view_to_string(temp_dir.path(), None).unwrap();
        assert_eq!(out, "file.txt\nsub/\n");
    }

    #[test]
    fn test_view_missing_path() {
        let temp_dir = TempDir::new().unwrap();
        let result = view_to_string(&temp_dir.path().join("gone.txt"), None);
        assert!(matches!(result, Err(Error::Stat { .. })));
    }
}
