//! Shared filesystem helpers used by the file operations.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Read a file for a mutating operation, validating that the path exists and
/// is not a directory. Returns the content together with the file metadata so
/// callers can preserve the permission bits on write-back.
pub fn read_for_operation(path: &Path, operation: &str) -> Result<(String, fs::Metadata)> {
    let metadata = fs::metadata(path).map_err(|source| Error::Stat {
        path: path.to_path_buf(),
        source,
    })?;

    if metadata.is_dir() {
        return Err(Error::IsDirectory {
            operation: operation.to_string(),
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;

    Ok((content, metadata))
}

/// Overwrite `path` with `content`, keeping the file's existing permission
/// bits.
pub fn write_preserving_mode(path: &Path, content: &str) -> std::io::Result<()> {
    let permissions = fs::metadata(path)?.permissions();
    fs::write(path, content)?;
    fs::set_permissions(path, permissions)
}

/// Create a new file with the given content, creating parent directories as
/// needed. Refuses to overwrite an existing file.
pub fn create_file(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        return Err(Error::AlreadyExists {
            path: path.to_path_buf(),
        });
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| Error::CreateDirs {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    fs::write(path, content).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}
