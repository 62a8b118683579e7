//! MCP server exposing the eddie file-editing toolkit.
//!
//! Every eddie operation becomes an MCP tool over stdio, so protocol clients
//! (Claude Code and friends) drive the same operations as the CLI. Operation
//! failures are wrapped into error tool results, never transport faults, and
//! logging stays on stderr because stdout carries the protocol.

mod models;

use std::path::Path;

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    transport::stdio,
    ErrorData as McpError, ServerHandler, ServiceExt,
};

use eddie::ops::{
    self, Creator, DisplayOpts, Globber, Inserter, Lister, Processor, Replacer, Searcher,
    UndoEditor, Viewer,
};
use eddie::Config;

pub use models::*;

/// MCP server for the eddie toolkit.
#[derive(Clone)]
pub struct EddieMcp {
    config: Config,
    tool_router: ToolRouter<Self>,
}

impl EddieMcp {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            tool_router: Self::tool_router(),
        }
    }

    /// Wrap an operation outcome into a tool result: captured output on
    /// success, the error text in an error envelope on failure.
    fn tool_result(out: Vec<u8>, outcome: eddie::Result<()>) -> Result<CallToolResult, McpError> {
        match outcome {
            Ok(()) => Ok(CallToolResult::success(vec![Content::text(
                String::from_utf8_lossy(&out).into_owned(),
            )])),
            Err(e) => Ok(CallToolResult::error(vec![Content::text(format!(
                "Error: {e}"
            ))])),
        }
    }
}

#[tool_router]
impl EddieMcp {
    #[tool(description = "View file contents or list directory contents")]
    fn view(&self, Parameters(req): Parameters<ViewRequest>) -> Result<CallToolResult, McpError> {
        let mut out = Vec::new();
        let outcome = Viewer::new().view(&mut out, Path::new(&req.path), req.range.as_deref());
        Self::tool_result(out, outcome)
    }

    #[tool(description = "Replace all occurrences of a string in a file")]
    fn str_replace(
        &self,
        Parameters(req): Parameters<StrReplaceRequest>,
    ) -> Result<CallToolResult, McpError> {
        let mut out = Vec::new();
        let outcome = Replacer::new(&self.config).str_replace(
            &mut out,
            Path::new(&req.path),
            &req.old_str,
            &req.new_str,
            DisplayOpts::new(req.show_changes, req.show_result),
        );
        Self::tool_result(out, outcome)
    }

    #[tool(description = "Create a new file with specified content")]
    fn create(
        &self,
        Parameters(req): Parameters<CreateRequest>,
    ) -> Result<CallToolResult, McpError> {
        let mut out = Vec::new();
        let outcome = Creator::new().create(
            &mut out,
            Path::new(&req.path),
            &req.content,
            DisplayOpts::new(req.show_changes, req.show_result),
        );
        Self::tool_result(out, outcome)
    }

    #[tool(description = "Insert a new line at specified line number")]
    fn insert(
        &self,
        Parameters(req): Parameters<InsertRequest>,
    ) -> Result<CallToolResult, McpError> {
        let mut out = Vec::new();
        let outcome = Inserter::new(&self.config).insert_at(
            &mut out,
            Path::new(&req.path),
            req.line as usize,
            &req.content,
            DisplayOpts::new(req.show_changes, req.show_result),
        );
        Self::tool_result(out, outcome)
    }

    #[tool(description = "Undo the last edit operation on a file")]
    fn undo_edit(
        &self,
        Parameters(req): Parameters<UndoEditRequest>,
    ) -> Result<CallToolResult, McpError> {
        let mut out = Vec::new();
        let outcome = UndoEditor::new(&self.config).undo_edit(
            &mut out,
            Path::new(&req.path),
            DisplayOpts::new(req.show_changes, req.show_result),
            req.count.unwrap_or(1),
        );
        Self::tool_result(out, outcome)
    }

    #[tool(description = "Fast file pattern matching tool that works with any codebase size")]
    fn glob(&self, Parameters(req): Parameters<GlobRequest>) -> Result<CallToolResult, McpError> {
        let mut out = Vec::new();
        let outcome = Globber::new().glob(&mut out, &req.pattern, req.path.as_deref());
        Self::tool_result(out, outcome)
    }

    #[tool(description = "List directory contents")]
    fn ls(&self, Parameters(req): Parameters<LsRequest>) -> Result<CallToolResult, McpError> {
        let mut out = Vec::new();
        let outcome = Lister::new().ls(&mut out, Path::new(&req.path));
        Self::tool_result(out, outcome)
    }

    #[tool(description = "Search files using tree-sitter queries for structural code matching")]
    fn search(
        &self,
        Parameters(req): Parameters<SearchRequest>,
    ) -> Result<CallToolResult, McpError> {
        let mut out = Vec::new();
        let outcome = Searcher::new().search(&mut out, Path::new(&req.path), &req.query);
        Self::tool_result(out, outcome)
    }

    #[tool(description = "Execute multiple eddie operations in sequence from JSON input")]
    fn batch(
        &self,
        Parameters(req): Parameters<BatchToolRequest>,
    ) -> Result<CallToolResult, McpError> {
        let batch_req = match ops::batch::parse_from_json(&req.operations) {
            Ok(batch_req) => batch_req,
            Err(e) => {
                return Ok(CallToolResult::error(vec![Content::text(format!(
                    "Error parsing batch operations: {e}"
                ))]))
            }
        };

        let response = Processor::new(self.config.clone()).process_batch(&batch_req);
        match serde_json::to_string(&response) {
            Ok(json) => Ok(CallToolResult::success(vec![Content::text(json)])),
            Err(e) => Ok(CallToolResult::error(vec![Content::text(format!(
                "Error marshaling response: {e}"
            ))])),
        }
    }
}

#[tool_handler]
impl ServerHandler for EddieMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Eddie MCP server. A text editor designed for AI agents: view, create, \
                 and edit files, search with glob patterns or tree-sitter queries, batch \
                 operations, and undo recorded edits."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Serve the toolkit over stdio until the client disconnects.
pub async fn serve_stdio(config: Config) -> anyhow::Result<()> {
    let service = EddieMcp::new(config)
        .serve(stdio())
        .await
        .inspect_err(|e| {
            tracing::error!("MCP server error: {e:?}");
        })?;

    tracing::info!("eddie-mcp server ready");
    service.waiting().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn server() -> (TempDir, EddieMcp) {
        let journal_dir = TempDir::new().unwrap();
        let server = EddieMcp::new(Config::with_journal_root(journal_dir.path()));
        (journal_dir, server)
    }

    fn result_text(result: &CallToolResult) -> String {
        result
            .content
            .iter()
            .filter_map(|c| c.as_text().map(|t| t.text.clone()))
            .collect()
    }

    #[test]
    fn test_view_tool_returns_file_content() {
        let (_j, server) = server();
        let work_dir = TempDir::new().unwrap();
        let file = work_dir.path().join("a.txt");
        fs::write(&file, "one\ntwo\n").unwrap();

        let result = server
            .view(Parameters(ViewRequest {
                path: file.to_string_lossy().into_owned(),
                range: None,
            }))
            .unwrap();

        assert_ne!(result.is_error, Some(true));
        assert_eq!(result_text(&result), "one\ntwo\n");
    }

    #[test]
    fn test_str_replace_tool_edits_and_undo_tool_reverts() {
        let (_j, server) = server();
        let work_dir = TempDir::new().unwrap();
        let file = work_dir.path().join("a.txt");
        fs::write(&file, "hello world\n").unwrap();
        let path = file.to_string_lossy().into_owned();

        let result = server
            .str_replace(Parameters(StrReplaceRequest {
                path: path.clone(),
                old_str: "hello".to_string(),
                new_str: "hi".to_string(),
                show_changes: false,
                show_result: false,
            }))
            .unwrap();
        assert_ne!(result.is_error, Some(true));
        assert_eq!(fs::read_to_string(&file).unwrap(), "hi world\n");

        let result = server
            .undo_edit(Parameters(UndoEditRequest {
                path,
                show_changes: false,
                show_result: false,
                count: None,
            }))
            .unwrap();
        assert_ne!(result.is_error, Some(true));
        assert!(result_text(&result).contains("Undid str_replace edit"));
        assert_eq!(fs::read_to_string(&file).unwrap(), "hello world\n");
    }

    #[test]
    fn test_tool_failure_is_error_envelope() {
        let (_j, server) = server();
        let work_dir = TempDir::new().unwrap();

        let result = server
            .view(Parameters(ViewRequest {
                path: work_dir
                    .path()
                    .join("missing.txt")
                    .to_string_lossy()
                    .into_owned(),
                range: None,
            }))
            .unwrap();

        assert_eq!(result.is_error, Some(true));
        assert!(result_text(&result).starts_with("Error: "));
    }

    #[test]
    fn test_batch_tool_reports_per_operation_results() {
        let (_j, server) = server();
        let work_dir = TempDir::new().unwrap();
        let file = work_dir.path().join("a.txt");
        fs::write(&file, "content\n").unwrap();

        let operations = serde_json::json!({
            "operations": [
                {"type": "view", "path": file.to_string_lossy()},
                {"type": "view", "path": work_dir.path().join("gone.txt").to_string_lossy()},
            ]
        });

        let result = server
            .batch(Parameters(BatchToolRequest {
                operations: operations.to_string(),
            }))
            .unwrap();

        assert_ne!(result.is_error, Some(true));
        let response: eddie::ops::BatchResponse =
            serde_json::from_str(&result_text(&result)).unwrap();
        assert_eq!(response.results.len(), 2);
        assert!(response.results[0].success);
        assert!(!response.results[1].success);
    }

    #[test]
    fn test_batch_tool_rejects_bad_json() {
        let (_j, server) = server();
        let result = server
            .batch(Parameters(BatchToolRequest {
                operations: "not json".to_string(),
            }))
            .unwrap();
        assert_eq!(result.is_error, Some(true));
    }
}
