//! Project domain model.
//!
//! A project is a named container of tasks with membership and scheduling
//! metadata. Projects are owned by the workspace and replaced as a whole.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::task::Task;

/// Lifecycle label of a project.
///
/// `Active` is the only value the reports treat specially; any other label is
/// kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProjectStatus {
    #[default]
    Active,
    Other(String),
}

impl From<String> for ProjectStatus {
    fn from(value: String) -> Self {
        if value == "Active" {
            ProjectStatus::Active
        } else {
            ProjectStatus::Other(value)
        }
    }
}

impl From<&str> for ProjectStatus {
    fn from(value: &str) -> Self {
        ProjectStatus::from(value.to_string())
    }
}

impl From<ProjectStatus> for String {
    fn from(status: ProjectStatus) -> Self {
        status.to_string()
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectStatus::Active => f.write_str("Active"),
            ProjectStatus::Other(label) => f.write_str(label),
        }
    }
}

/// A project and the tasks it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Identifier assigned by the workspace.
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    pub due_date: NaiveDate,
    /// Display names of the people on the project (informational only).
    pub members: Vec<String>,
    /// Tasks in creation order.
    pub tasks: Vec<Task>,
}

impl Project {
    /// Builds the project the workspace stores for `draft` under `id`.
    pub fn from_draft(id: impl Into<String>, draft: ProjectDraft) -> Self {
        Self {
            id: id.into(),
            name: draft.name,
            description: draft.description,
            status: draft.status,
            due_date: draft.due_date,
            members: draft.members,
            tasks: draft.tasks,
        }
    }

    /// Looks up a task by its per-project id.
    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == task_id)
    }

    pub fn completed_tasks(&self) -> usize {
        self.tasks.iter().filter(|task| task.is_done()).count()
    }
}

/// Everything needed to create a project except its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: ProjectStatus,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl ProjectDraft {
    /// An active project with no members and no tasks.
    pub fn new(name: impl Into<String>, due_date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            status: ProjectStatus::Active,
            due_date,
            members: Vec::new(),
            tasks: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_status(mut self, status: impl Into<ProjectStatus>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_members<I, S>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.members = members.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tasks(mut self, tasks: Vec<Task>) -> Self {
        self.tasks = tasks;
        self
    }
}
