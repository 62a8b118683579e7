//! File operations.
//!
//! One module per operation, mirroring the subcommands of the `eddie`
//! binary. Every operation writes its human-readable output to an injected
//! writer; the CLI hands over stdout, while the batch dispatcher and the MCP
//! server capture into buffers.

pub mod batch;
pub mod create;
pub mod glob;
pub mod insert;
pub mod ls;
pub mod replace;
pub mod search;
pub mod undo;
pub mod view;

pub use batch::{BatchRequest, BatchResponse, Operation, OperationResult, Processor};
pub use create::Creator;
pub use glob::Globber;
pub use insert::Inserter;
pub use ls::Lister;
pub use replace::Replacer;
pub use search::Searcher;
pub use undo::UndoEditor;
pub use view::Viewer;

/// Which extra output an operation should render besides its summary line.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplayOpts {
    /// Show a before/after diff of the change.
    pub show_changes: bool,
    /// Show the full file content after the operation.
    pub show_result: bool,
}

impl DisplayOpts {
    pub fn new(show_changes: bool, show_result: bool) -> Self {
        Self {
            show_changes,
            show_result,
        }
    }
}
