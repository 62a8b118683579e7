//! Eddie - a text editor designed for AI agents, not humans.
//!
//! This crate provides the core functionality behind the `eddie` binary:
//! primitive file edits (replace, insert, create, view), filesystem search,
//! batch execution, and the edit journal that makes mutating edits undoable.
//!
//! The journal lives in [`journal`]: every mutating operation appends a
//! reversible [`journal::EditRecord`] to a per-file journal on disk, and the
//! [`journal::UndoEngine`] walks that journal backwards to restore earlier
//! file states, refusing to undo across modifications it did not make.

pub mod config;
pub mod display;
pub mod error;
pub mod fileops;
pub mod journal;
pub mod ops;

pub use config::Config;
pub use error::{Error, Result};
