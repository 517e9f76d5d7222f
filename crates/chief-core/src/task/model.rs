//! Task domain model.
//!
//! A task is the atomic unit of work on a project board. Tasks are created by
//! the workspace (which assigns the id) and only ever replaced as a whole.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::{ChiefError, Result};

/// Workflow status of a task.
///
/// The workflow is ordered `Todo` → `InProgress` → `Done`; no other value is
/// representable.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Not started yet.
    Todo,
    /// Someone is working on it.
    InProgress,
    /// Finished.
    Done,
}

impl TaskStatus {
    /// Parses a wire value (`TODO`, `IN_PROGRESS`, `DONE`).
    ///
    /// Matching is case-insensitive and accepts `-` or space in place of `_`.
    /// Anything outside the three workflow states is a validation error.
    pub fn parse(value: &str) -> Result<Self> {
        let normalized = value.trim().to_uppercase().replace(['-', ' '], "_");
        normalized.parse::<TaskStatus>().map_err(|_| {
            ChiefError::validation(format!(
                "Invalid task status '{value}'. Expected one of TODO, IN_PROGRESS, DONE."
            ))
        })
    }

    /// Column heading used by the board.
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Done => "Done",
        }
    }
}

/// Priority of a task.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// A unit of work owned by exactly one project.
///
/// `id` is only unique inside the owning project; use `(project_id, id)` to
/// address a task across the workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Per-project identifier assigned by the workspace.
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: Priority,
    /// Display name of the person doing the work (not validated).
    pub assignee: String,
    pub due_date: NaiveDate,
}

impl Task {
    /// Builds the task the workspace stores for `draft` under `id`.
    pub fn from_draft(id: impl Into<String>, draft: TaskDraft) -> Self {
        Self {
            id: id.into(),
            title: draft.title,
            description: draft.description,
            status: draft.status,
            priority: draft.priority,
            assignee: draft.assignee,
            due_date: draft.due_date,
        }
    }

    /// Returns a copy with `status` replaced and every other field unchanged.
    pub fn with_status(&self, status: TaskStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }

    pub fn is_done(&self) -> bool {
        self.status == TaskStatus::Done
    }
}

/// Everything needed to create a task except its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: Priority,
    pub assignee: String,
    pub due_date: NaiveDate,
}

impl TaskDraft {
    /// A `TODO` draft with medium priority.
    pub fn new(title: impl Into<String>, assignee: impl Into<String>, due_date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            status: TaskStatus::Todo,
            priority: Priority::Medium,
            assignee: assignee.into(),
            due_date,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }
}
