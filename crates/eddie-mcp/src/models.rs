//! MCP request types.
//!
//! One request struct per tool, mirroring the CLI parameters.

use rmcp::schemars;
use serde::Deserialize;

/// View file contents or list a directory.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ViewRequest {
    #[schemars(description = "The path to the file or directory to view")]
    pub path: String,
    #[schemars(
        description = "Range of lines to view in format \"start,end\". If \"end\" is -1, reads to end of file. Ignored for directories."
    )]
    pub range: Option<String>,
}

/// Replace all occurrences of a string in a file.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct StrReplaceRequest {
    #[schemars(description = "The path to the file to modify")]
    pub path: String,
    #[schemars(description = "The string to search for and replace")]
    pub old_str: String,
    #[schemars(description = "The string to replace old_str with")]
    pub new_str: String,
    #[serde(default)]
    #[schemars(description = "Show the changes made to the file")]
    pub show_changes: bool,
    #[serde(default)]
    #[schemars(description = "Show the new content after the edit operation")]
    pub show_result: bool,
}

/// Create a new file with the given content.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CreateRequest {
    #[schemars(description = "The path where the new file should be created")]
    pub path: String,
    #[schemars(description = "The content to write to the new file")]
    pub content: String,
    #[serde(default)]
    #[schemars(description = "Show the content of the created file")]
    pub show_changes: bool,
    #[serde(default)]
    #[schemars(description = "Show the new content after the file creation")]
    pub show_result: bool,
}

/// Insert a new line at a 1-based line number.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct InsertRequest {
    #[schemars(description = "The path to the file to modify")]
    pub path: String,
    #[schemars(description = "The line number where the new line should be inserted (1-based)")]
    pub line: u32,
    #[schemars(description = "The content of the new line to insert")]
    pub content: String,
    #[serde(default)]
    #[schemars(description = "Show the changes made to the file")]
    pub show_changes: bool,
    #[serde(default)]
    #[schemars(description = "Show the new content after the edit operation")]
    pub show_result: bool,
}

/// Undo recorded edits on a file.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UndoEditRequest {
    #[schemars(description = "The path to the file whose edits should be undone")]
    pub path: String,
    #[serde(default)]
    #[schemars(description = "Show the changes made during the undo operation")]
    pub show_changes: bool,
    #[serde(default)]
    #[schemars(description = "Show the new content after the undo operation")]
    pub show_result: bool,
    #[schemars(description = "Number of edits to undo (default: 1)")]
    pub count: Option<i64>,
}

/// Find files with a glob pattern.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GlobRequest {
    #[schemars(description = "The glob pattern to match files against")]
    pub pattern: String,
    #[schemars(
        description = "The directory to search in. If not specified, the current working directory will be used."
    )]
    pub path: Option<String>,
}

/// List directory contents.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LsRequest {
    #[schemars(description = "The path to the directory to list")]
    pub path: String,
}

/// Run a tree-sitter query against a file or directory.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchRequest {
    #[schemars(description = "The path to the file or directory to search")]
    pub path: String,
    #[schemars(description = "The tree-sitter query to run")]
    pub query: String,
}

/// Execute multiple operations in sequence.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct BatchToolRequest {
    #[schemars(
        description = "JSON string containing operations array: {\"operations\": [{\"type\": \"view\", \"path\": \"file.txt\"}, ...]}"
    )]
    pub operations: String,
}
