//! The `eddie` binary.
//!
//! One subcommand per operation. Errors print to stderr with a red `Error:`
//! prefix and exit non-zero; all operation output goes to stdout.

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

use eddie::ops::{
    self, Creator, DisplayOpts, Globber, Inserter, Lister, Processor, Replacer, Searcher,
    UndoEditor, Viewer,
};
use eddie::Config;

#[derive(Parser)]
#[command(name = "eddie")]
#[command(about = "A text editor designed for AI Agents (e.g. `claude` code), not humans.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// View file contents or list directory contents.
    #[command(long_about = "View file contents or list directory contents.\n\n\
        For files, an optional range restricts the lines shown, in the form\n\
        \"start,end\" (1-based, inclusive). An end of -1 reads to the end of\n\
        the file. The range is ignored for directories.")]
    View {
        /// The path to the file or directory to view.
        path: PathBuf,
        /// Range of lines to view in format "start,end".
        view_range: Option<String>,
    },

    /// Replace all occurrences of a string in a file.
    #[command(name = "str_replace")]
    StrReplace {
        /// The path to the file to modify.
        path: PathBuf,
        /// The string to search for and replace.
        old_str: String,
        /// The string to replace old_str with.
        new_str: String,
        #[command(flatten)]
        display: DisplayArgs,
    },

    /// Create a new file with the specified content.
    Create {
        /// The path where the new file should be created.
        path: PathBuf,
        /// The content to write to the new file.
        file_text: String,
        #[command(flatten)]
        display: DisplayArgs,
    },

    /// Insert a new line at the specified line number in a file.
    #[command(long_about = "Insert a new line at the specified line number in a file.\n\n\
        The line number is 1-based; a line number one past the last line\n\
        appends to the file.")]
    Insert {
        /// The path to the file to modify.
        path: PathBuf,
        /// The line number where the new line should be inserted (1-based).
        insert_line: String,
        /// The content of the new line to insert.
        new_str: String,
        #[command(flatten)]
        display: DisplayArgs,
    },

    /// Undo the most recent recorded edits on a file.
    #[command(name = "undo_edit")]
    #[command(long_about = "Undo the most recent recorded edits on a file.\n\n\
        Edits made by str_replace and insert are journaled; undo_edit walks\n\
        the journal backwards, restoring the file one edit at a time. If the\n\
        file was modified by anything else since the last recorded edit, the\n\
        undo is refused.")]
    UndoEdit {
        /// The path to the file whose edits should be undone.
        path: PathBuf,
        /// Number of edits to undo.
        #[arg(long, default_value_t = 1)]
        count: i64,
        #[command(flatten)]
        display: DisplayArgs,
    },

    /// List directory contents.
    Ls {
        /// The directory to list.
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Find files matching a glob pattern, newest first.
    Glob {
        /// The glob pattern to match files against.
        pattern: String,
        /// The directory to search in.
        path: Option<String>,
    },

    /// Search files using tree-sitter queries.
    Search {
        /// The file or directory to search.
        path: PathBuf,
        /// The tree-sitter query to run.
        #[arg(long = "tree-sitter-query")]
        query: String,
    },

    /// Execute multiple eddie operations in sequence from JSON input.
    #[command(long_about = "Execute multiple eddie operations in sequence from JSON input.\n\n\
        Input methods (exactly one):\n\
        - stdin:        echo '{\"operations\":[...]}' | eddie batch\n\
        - file:         eddie batch --file operations.json\n\
        - JSON string:  eddie batch --json '{\"operations\":[...]}'\n\
        - flags:        eddie batch --op view,file.txt --op str_replace,file.txt,old,new\n\n\
        Execution always continues on errors; the response reports a\n\
        success/error status for every operation.")]
    Batch {
        /// Read operations from a JSON file.
        #[arg(long)]
        file: Option<PathBuf>,
        /// Operations as a JSON string.
        #[arg(long)]
        json: Option<String>,
        /// Individual operation (repeatable): type,arg1,arg2,...
        #[arg(long = "op")]
        ops: Vec<String>,
    },

    /// Start eddie as an MCP (Model Context Protocol) server on stdio.
    Mcp,
}

#[derive(clap::Args)]
struct DisplayArgs {
    /// Show the changes made to the file.
    #[arg(long)]
    show_changes: bool,
    /// Show the new content after the operation.
    #[arg(long)]
    show_result: bool,
}

impl From<&DisplayArgs> for DisplayOpts {
    fn from(args: &DisplayArgs) -> Self {
        DisplayOpts::new(args.show_changes, args.show_result)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", style("Error:").red());
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> anyhow::Result<()> {
    let config = Config::from_env();
    let mut stdout = io::stdout().lock();

    match command {
        Command::View { path, view_range } => {
            Viewer::new().view(&mut stdout, &path, view_range.as_deref())?;
        }
        Command::StrReplace {
            path,
            old_str,
            new_str,
            display,
        } => {
            Replacer::new(&config).str_replace(
                &mut stdout,
                &path,
                &old_str,
                &new_str,
                (&display).into(),
            )?;
        }
        Command::Create {
            path,
            file_text,
            display,
        } => {
            Creator::new().create(&mut stdout, &path, &file_text, (&display).into())?;
        }
        Command::Insert {
            path,
            insert_line,
            new_str,
            display,
        } => {
            Inserter::new(&config).insert(
                &mut stdout,
                &path,
                &insert_line,
                &new_str,
                (&display).into(),
            )?;
        }
        Command::UndoEdit {
            path,
            count,
            display,
        } => {
            UndoEditor::new(&config).undo_edit(&mut stdout, &path, (&display).into(), count)?;
        }
        Command::Ls { path } => {
            Lister::new().ls(&mut stdout, &path)?;
        }
        Command::Glob { pattern, path } => {
            Globber::new().glob(&mut stdout, &pattern, path.as_deref())?;
        }
        Command::Search { path, query } => {
            Searcher::new().search(&mut stdout, &path, &query)?;
        }
        Command::Batch { file, json, ops } => {
            run_batch(&mut stdout, &config, file.as_deref(), json.as_deref(), &ops)?;
        }
        Command::Mcp => {
            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?
                .block_on(eddie_mcp::serve_stdio(config))?;
        }
    }
    Ok(())
}

fn run_batch<W: io::Write>(
    w: &mut W,
    config: &Config,
    file: Option<&Path>,
    json: Option<&str>,
    ops: &[String],
) -> anyhow::Result<()> {
    let input_count =
        usize::from(file.is_some()) + usize::from(json.is_some()) + usize::from(!ops.is_empty());
    if input_count > 1 {
        anyhow::bail!("only one input method allowed");
    }

    let request = match (file, json, ops) {
        (Some(path), _, _) => ops::batch::parse_from_file(path)?,
        (_, Some(json), _) => ops::batch::parse_from_json(json)?,
        (_, _, flags) if !flags.is_empty() => ops::batch::parse_from_ops(flags)?,
        _ => ops::batch::parse_from_stdin()?,
    };

    let response = Processor::new(config.clone()).process_batch(&request);
    write!(w, "{}", serde_json::to_string(&response)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_cli_parses() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_batch_rejects_multiple_input_methods() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::with_journal_root(temp_dir.path());
        let mut out = Vec::new();

        let result = run_batch(
            &mut out,
            &config,
            Some(Path::new("ops.json")),
            Some("{}"),
            &[],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_batch_from_json_runs_operations() {
        let journal_dir = TempDir::new().unwrap();
        let work_dir = TempDir::new().unwrap();
        let file = work_dir.path().join("a.txt");
        fs::write(&file, "content\n").unwrap();

        let config = Config::with_journal_root(journal_dir.path());
        let json = format!(
            r#"{{"operations":[{{"type":"view","path":"{}"}}]}}"#,
            file.display()
        );

        let mut out = Vec::new();
        run_batch(&mut out, &config, None, Some(&json), &[]).unwrap();

        let response: eddie::ops::BatchResponse =
            serde_json::from_slice(&out).unwrap();
        assert_eq!(response.results.len(), 1);
        assert!(response.results[0].success);
        assert_eq!(response.results[0].output, "content\n");
    }
}
