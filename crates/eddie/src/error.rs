//! Operation error types.
//!
//! All operations return `Result<T, Error>`. Journal and undo failures have
//! their own type, [`UndoError`](crate::journal::UndoError), which converts
//! into [`Error`] transparently.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::journal::UndoError;

/// Errors produced by file operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Stat failed on the target path.
    #[error("stat {}: {source}", path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The operation only applies to regular files.
    #[error("cannot {operation} directory: {}", path.display())]
    IsDirectory { operation: String, path: PathBuf },

    /// Reading the target file failed.
    #[error("read file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing the target file failed.
    #[error("write file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Listing a directory failed.
    #[error("read dir {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// `create` refuses to overwrite.
    #[error("file already exists: {}", path.display())]
    AlreadyExists { path: PathBuf },

    /// Creating parent directories failed.
    #[error("create directories {}: {source}", path.display())]
    CreateDirs {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A line number argument did not parse or was non-positive.
    #[error("parse line number: {0}")]
    InvalidLineNumber(String),

    /// Insert position past the end of the file.
    #[error("line number {line} exceeds file length ({lines} lines)")]
    LineBeyondEof { line: usize, lines: usize },

    /// A `start,end` view range did not parse.
    #[error("parse range: {0}")]
    InvalidRange(String),

    /// A glob pattern did not parse.
    #[error("glob {pattern}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// A tree-sitter query was rejected by the grammar.
    #[error("invalid query for {}: {message}", path.display())]
    Query { path: PathBuf, message: String },

    /// The edit was applied and written, but appending it to the journal
    /// failed. The file change stands; it is just not undoable.
    #[error("record edit: {0}")]
    Record(#[source] UndoError),

    /// Journal or undo failure.
    #[error(transparent)]
    Undo(#[from] UndoError),

    /// Batch input could not be parsed.
    #[error("parse batch input: {0}")]
    BatchInput(String),

    /// Writer or other I/O failure outside the target file.
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_exists_message() {
        let err = Error::AlreadyExists {
            path: PathBuf::from("/tmp/out.txt"),
        };
        assert_eq!(err.to_string(), "file already exists: /tmp/out.txt");
    }

    #[test]
    fn test_line_beyond_eof_message() {
        let err = Error::LineBeyondEof { line: 12, lines: 4 };
        assert_eq!(err.to_string(), "line number 12 exceeds file length (4 lines)");
    }

    #[test]
    fn test_io_conversion() {
        let io_err = io::Error::new(io::ErrorKind::Other, "boom");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
