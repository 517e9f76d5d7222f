//! Workspace domain module.
//!
//! The workspace is the in-memory authority over every project and task.
//! All mutations go through it, either by calling its methods directly or by
//! handing it a [`WorkspaceCommand`].
//!
//! # Module Structure
//!
//! - `state`: the `Workspace` itself and its operations
//! - `command`: the command/outcome pair accepted by `Workspace::apply`

mod command;
mod state;

pub use command::{CommandOutcome, WorkspaceCommand};
pub use state::Workspace;
