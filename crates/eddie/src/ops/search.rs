//! Structural search with tree-sitter queries.
//!
//! The parser grammar is chosen by file extension; files with no grammar are
//! skipped silently. Each query capture prints as
//! `file:line:col: @capture: line-content`.

use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::warn;
use tree_sitter::{Language, Parser, Query, QueryCursor};

use crate::error::{Error, Result};

#[derive(Debug, Default)]
pub struct Searcher;

fn language_for(path: &Path) -> Option<Language> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "go" => Some(tree_sitter_go::language()),
        "java" => Some(tree_sitter_java::language()),
        "js" | "mjs" | "jsx" => Some(tree_sitter_javascript::language()),
        "py" | "pyi" => Some(tree_sitter_python::language()),
        "rs" => Some(tree_sitter_rust::language()),
        _ => None,
    }
}

impl Searcher {
    pub fn new() -> Self {
        Self
    }

    /// Run a tree-sitter query against a file, or against every supported
    /// file under a directory.
    pub fn search<W: Write>(&self, w: &mut W, path: &Path, query: &str) -> Result<()> {
        let metadata = fs::metadata(path).map_err(|source| Error::Stat {
            path: path.to_path_buf(),
            source,
        })?;

        if metadata.is_dir() {
            self.search_dir(w, path, query)
        } else {
            self.search_file(w, path, query)
        }
    }

    fn search_dir<W: Write>(&self, w: &mut W, dir: &Path, query: &str) -> Result<()> {
        let walker = ignore::WalkBuilder::new(dir)
            .standard_filters(false)
            .build();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("walk error: {e}");
                    continue;
                }
            };

            let path = entry.path();
            if entry.file_type().map(|t| t.is_dir()).unwrap_or(true) {
                continue;
            }
            if language_for(path).is_none() {
                continue;
            }

            self.search_file(w, path, query)?;
        }
        Ok(())
    }

    fn search_file<W: Write>(&self, w: &mut W, path: &Path, query_str: &str) -> Result<()> {
        let language = match language_for(path) {
            Some(language) => language,
            None => return Ok(()),
        };

        let mut parser = Parser::new();
        parser
            .set_language(&language)
            .map_err(|e| Error::Query {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let query = Query::new(&language, query_str).map_err(|e| Error::Query {
            path: path.to_path_buf(),
            message: e.message.clone(),
        })?;

        let content = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let tree = match parser.parse(&content, None) {
            Some(tree) => tree,
            None => {
                return Err(Error::Query {
                    path: path.to_path_buf(),
                    message: "parse failed".to_string(),
                })
            }
        };

        let lines: Vec<&str> = content.split('\n').collect();
        let capture_names = query.capture_names();

        let mut cursor = QueryCursor::new();
        for m in cursor.matches(&query, tree.root_node(), content.as_bytes()) {
            for capture in m.captures {
                let start = capture.node.start_position();
                let line_content = lines.get(start.row).map(|l| l.trim()).unwrap_or("");
                let capture_name = capture_names
                    .get(capture.index as usize)
                    .copied()
                    .unwrap_or("");

                writeln!(
                    w,
                    "{}:{}:{}: @{}: {}",
                    path.display(),
                    start.row + 1,
                    start.column + 1,
                    capture_name,
                    line_content
                )?;
            }
        }
        Ok(())
    }
}
