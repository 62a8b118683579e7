//! Find files with glob patterns.
//!
//! Pattern matching is delegated to the `glob` crate, which handles `*`,
//! `**`, `?`, and character classes. Matches are printed newest first.

use std::cmp::Reverse;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use glob::glob as glob_match;
use tracing::warn;

use crate::error::{Error, Result};

#[derive(Debug, Default)]
pub struct Globber;

impl Globber {
    pub fn new() -> Self {
        Self
    }

    /// Print every path matching `pattern` under `path` (default: the current
    /// directory), sorted by modification time, newest first. An empty match
    /// set prints nothing and succeeds.
    pub fn glob<W: Write>(&self, w: &mut W, pattern: &str, path: Option<&str>) -> Result<()> {
        let base = path.filter(|p| !p.is_empty()).unwrap_or(".");

        let full_pattern = if pattern.starts_with('/') || pattern.starts_with("./") {
            pattern.to_string()
        } else {
            format!("{}/{}", base.trim_end_matches('/'), pattern)
        };

        let paths = glob_match(&full_pattern).map_err(|source| Error::Pattern {
            pattern: full_pattern.clone(),
            source,
        })?;

        let mut matches: Vec<(PathBuf, Option<SystemTime>)> = Vec::new();
        for entry in paths {
            match entry {
                Ok(path) => {
                    let mtime = fs::symlink_metadata(&path)
                        .and_then(|m| m.modified())
                        .ok();
                    matches.push((path, mtime));
                }
                Err(e) => {
                    warn!("glob entry error: {e}");
                }
            }
        }

        matches.sort_by(|a, b| match (&a.1, &b.1) {
            (Some(a_time), Some(b_time)) => Reverse(a_time).cmp(&Reverse(b_time)),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });

        for (path, _) in matches {
            writeln!(w, "{}", path.display())?;
        }
        Ok(())
    }
}
