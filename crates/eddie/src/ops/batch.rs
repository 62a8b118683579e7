//! Execute multiple operations in sequence from JSON input.
//!
//! The dispatcher is pure plumbing: parse a request, run each operation with
//! its output captured, and serialize a per-operation result. Execution
//! always continues past failures.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::ops::{Creator, DisplayOpts, Inserter, Lister, Replacer, Searcher, UndoEditor, Viewer};

/// One operation in a batch request. Unused fields stay empty and are
/// omitted when the operation echoes back in the response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Operation {
    #[serde(rename = "type")]
    pub op_type: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub path: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub view_range: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub old_str: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub new_str: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub show_changes: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub show_result: bool,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content: String,

    #[serde(default, skip_serializing_if = "is_zero")]
    pub insert_line: i64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub count: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tree_sitter_query: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub pattern: String,
}

fn is_zero(n: &i64) -> bool {
    *n == 0
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchRequest {
    pub operations: Vec<Operation>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchResponse {
    pub results: Vec<OperationResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationResult {
    pub operation: Operation,
    pub success: bool,
    pub output: String,
    pub error: Option<String>,
}

/// Runs batch requests against the configured toolkit.
pub struct Processor {
    config: Config,
}

impl Processor {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Execute every operation in order, capturing each one's output.
    pub fn process_batch(&self, req: &BatchRequest) -> BatchResponse {
        let results = req
            .operations
            .iter()
            .map(|op| self.process_operation(op))
            .collect();
        BatchResponse { results }
    }

    fn process_operation(&self, op: &Operation) -> OperationResult {
        let mut out = Vec::new();
        let outcome = self.dispatch(op, &mut out);

        debug!(op = %op.op_type, success = outcome.is_ok(), "batch operation");

        OperationResult {
            operation: op.clone(),
            success: outcome.is_ok(),
            output: String::from_utf8_lossy(&out).into_owned(),
            error: outcome.err().map(|e| e.to_string()),
        }
    }

    fn dispatch(&self, op: &Operation, out: &mut Vec<u8>) -> Result<()> {
        let path = Path::new(&op.path);
        let opts = DisplayOpts::new(op.show_changes, op.show_result);

        match op.op_type.as_str() {
            "view" => {
                let range = (!op.view_range.is_empty()).then_some(op.view_range.as_str());
                Viewer::new().view(out, path, range)
            }
            "str_replace" => Replacer::new(&self.config)
                .str_replace(out, path, &op.old_str, &op.new_str, opts),
            "create" => Creator::new().create(out, path, &op.content, opts),
            "insert" => {
                let line = usize::try_from(op.insert_line)
                    .map_err(|_| Error::InvalidLineNumber(op.insert_line.to_string()))?;
                Inserter::new(&self.config).insert_at(out, path, line, &op.new_str, opts)
            }
            "undo_edit" => {
                let count = if op.count == 0 { 1 } else { op.count };
                UndoEditor::new(&self.config).undo_edit(out, path, opts, count)
            }
            "ls" => Lister::new().ls(out, path),
            "search" => Searcher::new().search(out, path, &op.tree_sitter_query),
            other => Err(Error::BatchInput(format!("unknown operation type: {other}"))),
        }
    }
}

/// Parse a batch request from standard input.
pub fn parse_from_stdin() -> Result<BatchRequest> {
    let mut data = String::new();
    std::io::stdin()
        .read_to_string(&mut data)
        .map_err(|e| Error::BatchInput(format!("read stdin: {e}")))?;
    parse_from_json(&data)
}

/// Parse a batch request from a JSON file.
pub fn parse_from_file(path: &Path) -> Result<BatchRequest> {
    let data = std::fs::read_to_string(path)
        .map_err(|e| Error::BatchInput(format!("read file {}: {e}", path.display())))?;
    parse_from_json(&data)
}

/// Parse a batch request from a JSON string.
pub fn parse_from_json(json: &str) -> Result<BatchRequest> {
    serde_json::from_str(json).map_err(|e| Error::BatchInput(format!("parse JSON: {e}")))
}

/// Parse a batch request from repeated `--op type,arg1,arg2,...` flags.
pub fn parse_from_ops(ops: &[String]) -> Result<BatchRequest> {
    let mut operations = Vec::with_capacity(ops.len());

    for op in ops {
        let parts: Vec<&str> = op.split(',').collect();
        if parts.len() < 2 {
            return Err(Error::BatchInput(format!("invalid operation format: {op}")));
        }

        let mut operation = Operation {
            op_type: parts[0].to_string(),
            path: parts[1].to_string(),
            ..Default::default()
        };

        match parts[0] {
            "view" => {
                if parts.len() > 2 {
                    operation.view_range = parts[2..].join(",");
                }
            }
            "str_replace" => {
                if parts.len() < 4 {
                    return Err(Error::BatchInput(format!(
                        "str_replace requires old_str and new_str: {op}"
                    )));
                }
                operation.old_str = parts[2].to_string();
                operation.new_str = parts[3].to_string();
            }
            "create" => {
                if parts.len() < 3 {
                    return Err(Error::BatchInput(format!("create requires content: {op}")));
                }
                operation.content = parts[2].to_string();
            }
            "insert" => {
                if parts.len() < 4 {
                    return Err(Error::BatchInput(format!(
                        "insert requires line number and content: {op}"
                    )));
                }
                operation.insert_line = parts[2]
                    .parse()
                    .map_err(|_| Error::BatchInput(format!("invalid line number in insert: {op}")))?;
                operation.new_str = parts[3].to_string();
            }
            "undo_edit" | "ls" => {}
            "search" => {
                if parts.len() < 3 {
                    return Err(Error::BatchInput(format!(
                        "search requires tree-sitter query: {op}"
                    )));
                }
                operation.tree_sitter_query = parts[2..].join(",");
            }
            other => {
                return Err(Error::BatchInput(format!("unknown operation type: {other}")));
            }
        }

        operations.push(operation);
    }

    Ok(BatchRequest { operations })
}
