//! Filesystem-safe journal names.
//!
//! Both the recorder and the undo engine derive the journal filename from the
//! target path independently, so this must be a pure function of the path.

use sha2::{Digest, Sha256};
use std::path::Path;

/// Characters above this length switch to the hashed form.
const MAX_PLAIN_LEN: usize = 200;

/// Length of the hashed fallback name, prefix included.
const HASHED_LEN: usize = 50;

/// Map an absolute file path to a filesystem-safe journal base name.
///
/// Path separators, colons, spaces, and dots become underscores. Distinct
/// paths below the length threshold never collide because the replacement is
/// injective over the characters that appear in absolute paths. Longer paths
/// fall back to a truncated hex digest of the original path, prefixed with
/// `file_` to keep the two forms apart.
pub fn safe_file_name(path: &Path) -> String {
    let raw = path.to_string_lossy();
    let safe: String = raw
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | ' ' | '.' => '_',
            other => other,
        })
        .collect();

    if safe.len() > MAX_PLAIN_LEN {
        let digest = Sha256::digest(raw.as_bytes());
        let mut hashed = format!("file_{}", hex::encode(digest));
        hashed.truncate(HASHED_LEN);
        hashed
    } else {
        safe
    }
}
