//! Runtime configuration.
//!
//! The journal root is resolved once at the binary edge and passed down
//! explicitly; nothing below this module reads the environment.

use std::env;
use std::path::PathBuf;

/// Configuration shared by every operation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the per-file edit journals.
    pub journal_root: PathBuf,
}

impl Config {
    /// Resolve configuration from the environment: `$XDG_CACHE_HOME`, else
    /// `~/.cache`, then `eddie/edits` underneath.
    pub fn from_env() -> Self {
        Self {
            journal_root: default_journal_root(),
        }
    }

    /// Use an explicit journal root. Tests inject a temporary directory here.
    pub fn with_journal_root(root: impl Into<PathBuf>) -> Self {
        Self {
            journal_root: root.into(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

/// The default journal location: `$XDG_CACHE_HOME/eddie/edits`, falling back
/// to `~/.cache/eddie/edits`.
pub fn default_journal_root() -> PathBuf {
    let cache_dir = env::var_os("XDG_CACHE_HOME")
        .map(PathBuf::from)
        .filter(|p| !p.as_os_str().is_empty())
        .or_else(|| dirs::home_dir().map(|home| home.join(".cache")))
        .unwrap_or_else(|| PathBuf::from(".cache"));

    cache_dir.join("eddie").join("edits")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_root_ends_with_eddie_edits() {
        let root = default_journal_root();
        assert!(root.ends_with("eddie/edits"));
    }

    #[test]
    fn test_with_journal_root() {
        let config = Config::with_journal_root("/tmp/journals");
        assert_eq!(config.journal_root, PathBuf::from("/tmp/journals"));
    }
}
