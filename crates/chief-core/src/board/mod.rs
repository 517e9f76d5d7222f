//! Kanban board projection.
//!
//! The board is derived from a project's task list on every call; it holds
//! no state of its own. A drop gesture is expressed as [`apply_drop`], which
//! yields the replacement task list for the workspace to store.

use strum::IntoEnumIterator;

use crate::task::{Task, TaskStatus};

/// One column of the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardColumn<'a> {
    pub status: TaskStatus,
    pub tasks: Vec<&'a Task>,
}

impl BoardColumn<'_> {
    pub fn title(&self) -> &'static str {
        self.status.label()
    }
}

/// Three-column view over a task list: `TODO`, `IN_PROGRESS`, `DONE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board<'a> {
    columns: Vec<BoardColumn<'a>>,
}

impl<'a> Board<'a> {
    /// Partitions `tasks` by status, keeping source order within each column.
    pub fn project(tasks: &'a [Task]) -> Self {
        let columns = TaskStatus::iter()
            .map(|status| BoardColumn {
                status,
                tasks: tasks.iter().filter(|task| task.status == status).collect(),
            })
            .collect();
        Self { columns }
    }

    /// Columns in workflow order.
    pub fn columns(&self) -> &[BoardColumn<'a>] {
        &self.columns
    }

    pub fn column(&self, status: TaskStatus) -> &BoardColumn<'a> {
        // Every status has a column by construction.
        &self.columns[status as usize]
    }

    pub fn len(&self) -> usize {
        self.columns.iter().map(|column| column.tasks.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Returns the task list after dropping `task_id` onto the `status` column.
///
/// The dropped task's status is replaced and every other task is copied
/// as-is. An unknown `task_id` yields an unchanged copy.
pub fn apply_drop(tasks: &[Task], task_id: &str, status: TaskStatus) -> Vec<Task> {
    tasks
        .iter()
        .map(|task| {
            if task.id == task_id {
                task.with_status(status)
            } else {
                task.clone()
            }
        })
        .collect()
}
