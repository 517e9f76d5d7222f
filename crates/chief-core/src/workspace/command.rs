use crate::project::{Project, ProjectDraft};
use crate::task::{Task, TaskDraft, TaskStatus};

/// A single mutation request against the workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceCommand {
    CreateProject(ProjectDraft),
    UpdateProject(Project),
    AddTask {
        project_id: String,
        draft: TaskDraft,
    },
    MoveTask {
        project_id: String,
        task_id: String,
        status: TaskStatus,
    },
    /// Wholesale replacement of a project's task list (board drops).
    ReplaceTasks {
        project_id: String,
        tasks: Vec<Task>,
    },
    SelectProject(String),
}

/// What a successfully applied command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    ProjectCreated(Project),
    TaskAdded { project_id: String, task: Task },
    Updated,
}
