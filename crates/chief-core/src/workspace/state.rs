use crate::error::{ChiefError, Result};
use crate::project::{Project, ProjectDraft};
use crate::task::{Task, TaskDraft, TaskStatus};

use super::command::{CommandOutcome, WorkspaceCommand};

/// The authoritative in-memory store of all projects.
///
/// `Workspace` owns the ordered project list and the "current project"
/// pointer used by the assistant. Every operation is synchronous and either
/// applies completely or returns an error without touching state.
///
/// Identifiers follow a count-based scheme: a new project gets
/// `projects.len() + 1`, a new task gets `project.tasks.len() + 1`. Since
/// nothing is ever deleted, ids are never reused.
///
/// # Examples
///
/// ```
/// use chief_core::project::ProjectDraft;
/// use chief_core::task::{TaskDraft, TaskStatus};
/// use chief_core::workspace::Workspace;
/// use chrono::NaiveDate;
///
/// let due = NaiveDate::from_ymd_opt(2024, 4, 15).unwrap();
/// let mut workspace = Workspace::new();
/// let project = workspace.create_project(ProjectDraft::new("P1", due));
/// let task = workspace
///     .add_task(&project.id, TaskDraft::new("Write docs", "Tom Cook", due))
///     .unwrap();
///
/// assert_eq!(project.id, "1");
/// assert_eq!(task.id, "1");
/// assert_eq!(task.status, TaskStatus::Todo);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    projects: Vec<Project>,
    /// Id of the project in focus. Stored as an id so it always resolves to
    /// the latest version of that project.
    current_project_id: Option<String>,
}

impl Workspace {
    /// Creates an empty workspace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a workspace that already holds `projects` (ids kept as given).
    pub fn with_projects(projects: Vec<Project>) -> Self {
        Self {
            projects,
            current_project_id: None,
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn project(&self, project_id: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == project_id)
    }

    pub fn current_project_id(&self) -> Option<&str> {
        self.current_project_id.as_deref()
    }

    /// The project in focus, if one is selected.
    pub fn current_project(&self) -> Option<&Project> {
        self.current_project_id
            .as_deref()
            .and_then(|id| self.project(id))
    }

    /// Puts `project_id` in focus.
    pub fn select_project(&mut self, project_id: &str) -> Result<()> {
        self.ensure_project(project_id)?;
        tracing::debug!(project_id, "Selected current project");
        self.current_project_id = Some(project_id.to_string());
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.current_project_id = None;
    }

    /// Resolves the project that assistant-created tasks should land in.
    ///
    /// Returns the current project if one is selected. Otherwise the first
    /// project becomes current and is returned. Returns `None` only when the
    /// workspace has no projects; the workspace never creates one implicitly.
    pub fn resolve_target(&mut self) -> Option<String> {
        if let Some(current) = self.current_project() {
            return Some(current.id.clone());
        }

        let first = self.projects.first()?.id.clone();
        tracing::debug!(project_id = %first, "No project selected, falling back to first project");
        self.current_project_id = Some(first.clone());
        Some(first)
    }

    /// Appends a new project built from `draft` and returns it.
    pub fn create_project(&mut self, draft: ProjectDraft) -> Project {
        let id = (self.projects.len() + 1).to_string();
        let project = Project::from_draft(id, draft);
        tracing::info!(project_id = %project.id, name = %project.name, "Created project");
        self.projects.push(project.clone());
        project
    }

    /// Replaces the project with the same id as `updated`.
    ///
    /// # Errors
    ///
    /// `NotFound` if no project has that id.
    pub fn update_project(&mut self, updated: Project) -> Result<()> {
        let slot = self
            .projects
            .iter_mut()
            .find(|project| project.id == updated.id)
            .ok_or_else(|| ChiefError::not_found("project", updated.id.clone()))?;

        tracing::debug!(project_id = %updated.id, "Replaced project");
        *slot = updated;
        Ok(())
    }

    /// Creates a task in `project_id` and returns it.
    ///
    /// The new task's id is the project's current task count plus one. The
    /// whole project is then replaced through [`Workspace::update_project`].
    ///
    /// # Errors
    ///
    /// `NotFound` if the project does not exist.
    pub fn add_task(&mut self, project_id: &str, draft: TaskDraft) -> Result<Task> {
        let mut project = self.require_project(project_id)?.clone();
        let task = Task::from_draft((project.tasks.len() + 1).to_string(), draft);
        project.tasks.push(task.clone());
        self.update_project(project)?;

        tracing::info!(project_id, task_id = %task.id, title = %task.title, "Added task");
        Ok(task)
    }

    /// Sets the status of one task, leaving every other field untouched.
    ///
    /// Moving a task to the status it already has is allowed and changes
    /// nothing.
    ///
    /// # Errors
    ///
    /// `NotFound` if either the project or the task does not exist.
    pub fn move_task(&mut self, project_id: &str, task_id: &str, status: TaskStatus) -> Result<()> {
        let mut project = self.require_project(project_id)?.clone();
        let task = project
            .tasks
            .iter_mut()
            .find(|task| task.id == task_id)
            .ok_or_else(|| ChiefError::not_found("task", format!("{project_id}/{task_id}")))?;

        tracing::debug!(project_id, task_id, from = %task.status, to = %status, "Moved task");
        task.status = status;
        self.update_project(project)
    }

    /// Replaces a project's task list wholesale.
    ///
    /// # Errors
    ///
    /// `NotFound` if the project does not exist.
    pub fn replace_tasks(&mut self, project_id: &str, tasks: Vec<Task>) -> Result<()> {
        let mut project = self.require_project(project_id)?.clone();
        project.tasks = tasks;
        self.update_project(project)
    }

    /// Applies a single command.
    pub fn apply(&mut self, command: WorkspaceCommand) -> Result<CommandOutcome> {
        match command {
            WorkspaceCommand::CreateProject(draft) => {
                Ok(CommandOutcome::ProjectCreated(self.create_project(draft)))
            }
            WorkspaceCommand::UpdateProject(project) => {
                self.update_project(project)?;
                Ok(CommandOutcome::Updated)
            }
            WorkspaceCommand::AddTask { project_id, draft } => {
                let task = self.add_task(&project_id, draft)?;
                Ok(CommandOutcome::TaskAdded { project_id, task })
            }
            WorkspaceCommand::MoveTask {
                project_id,
                task_id,
                status,
            } => {
                self.move_task(&project_id, &task_id, status)?;
                Ok(CommandOutcome::Updated)
            }
            WorkspaceCommand::ReplaceTasks { project_id, tasks } => {
                self.replace_tasks(&project_id, tasks)?;
                Ok(CommandOutcome::Updated)
            }
            WorkspaceCommand::SelectProject(project_id) => {
                self.select_project(&project_id)?;
                Ok(CommandOutcome::Updated)
            }
        }
    }

    fn require_project(&self, project_id: &str) -> Result<&Project> {
        self.project(project_id)
            .ok_or_else(|| ChiefError::not_found("project", project_id))
    }

    fn ensure_project(&self, project_id: &str) -> Result<()> {
        self.require_project(project_id).map(|_| ())
    }
}
