//! Task domain module.
//!
//! This module contains the task entity, its workflow status and priority.
//!
//! # Usage
//!
//! ```ignore
//! use chief_core::task::{Priority, Task, TaskDraft, TaskStatus};
//! ```

mod model;

// Re-export public API
pub use model::{Priority, Task, TaskDraft, TaskStatus};
