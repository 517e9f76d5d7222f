//! Read-only summaries for the dashboard, reports and progress views.
//!
//! Everything here is a pure function of the projects passed in.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::project::{Project, ProjectStatus};
use crate::task::{Priority, Task};

/// Number of deadlines shown on the dashboard.
pub const UPCOMING_DEADLINES: usize = 5;

/// Rounded completion percentage, `0` for an empty set.
pub fn completion_percent(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (completed as f64 / total as f64 * 100.0).round() as u32
}

/// Completed/remaining counts for one task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressSummary {
    pub completed: usize,
    pub remaining: usize,
    pub percent: u32,
}

impl ProgressSummary {
    pub fn of(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|task| task.is_done()).count();
        Self {
            completed,
            remaining: tasks.len() - completed,
            percent: completion_percent(completed, tasks.len()),
        }
    }
}

/// Progress of a single project, keyed by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectProgress {
    pub project_id: String,
    pub name: String,
    pub completed: usize,
    pub total: usize,
    pub percent: u32,
}

impl ProjectProgress {
    fn of(project: &Project) -> Self {
        let completed = project.completed_tasks();
        Self {
            project_id: project.id.clone(),
            name: project.name.clone(),
            completed,
            total: project.tasks.len(),
            percent: completion_percent(completed, project.tasks.len()),
        }
    }

    pub fn pending(&self) -> usize {
        self.total - self.completed
    }
}

/// A task with the project it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deadline {
    pub project_id: String,
    pub task: Task,
}

/// Headline numbers for the dashboard view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub total_projects: usize,
    pub active_tasks: usize,
    pub completed_tasks: usize,
    /// Distinct member names across all projects.
    pub team_members: usize,
    pub upcoming_deadlines: Vec<Deadline>,
    pub project_progress: Vec<ProjectProgress>,
}

impl DashboardSummary {
    pub fn of(projects: &[Project]) -> Self {
        let total_tasks: usize = projects.iter().map(|p| p.tasks.len()).sum();
        let completed_tasks: usize = projects.iter().map(Project::completed_tasks).sum();
        let team_members = projects
            .iter()
            .flat_map(|project| project.members.iter())
            .collect::<BTreeSet<_>>()
            .len();

        let mut deadlines: Vec<Deadline> = projects
            .iter()
            .flat_map(|project| {
                project.tasks.iter().map(|task| Deadline {
                    project_id: project.id.clone(),
                    task: task.clone(),
                })
            })
            .collect();
        // Stable sort keeps creation order among equal dates.
        deadlines.sort_by_key(|deadline| deadline.task.due_date);
        deadlines.truncate(UPCOMING_DEADLINES);

        Self {
            total_projects: projects.len(),
            active_tasks: total_tasks - completed_tasks,
            completed_tasks,
            team_members,
            upcoming_deadlines: deadlines,
            project_progress: projects.iter().map(ProjectProgress::of).collect(),
        }
    }
}

/// Aggregates for the reports view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub active_projects: usize,
    pub completion_rate: u32,
    pub pending_tasks: usize,
    /// Project status label → number of projects, in first-seen order.
    pub status_distribution: Vec<(String, usize)>,
    pub task_completion: Vec<ProjectProgress>,
    /// Task priority → number of tasks, for priorities that occur.
    pub priority_distribution: Vec<(Priority, usize)>,
}

impl ReportSummary {
    pub fn of(projects: &[Project]) -> Self {
        let total_tasks: usize = projects.iter().map(|p| p.tasks.len()).sum();
        let completed_tasks: usize = projects.iter().map(Project::completed_tasks).sum();

        let mut status_distribution: Vec<(String, usize)> = Vec::new();
        for project in projects {
            let label = project.status.to_string();
            match status_distribution.iter_mut().find(|(name, _)| *name == label) {
                Some((_, count)) => *count += 1,
                None => status_distribution.push((label, 1)),
            }
        }

        let mut priority_distribution: Vec<(Priority, usize)> = Vec::new();
        for task in projects.iter().flat_map(|project| project.tasks.iter()) {
            match priority_distribution
                .iter_mut()
                .find(|(priority, _)| *priority == task.priority)
            {
                Some((_, count)) => *count += 1,
                None => priority_distribution.push((task.priority, 1)),
            }
        }

        Self {
            active_projects: projects
                .iter()
                .filter(|project| project.status == ProjectStatus::Active)
                .count(),
            completion_rate: completion_percent(completed_tasks, total_tasks),
            pending_tasks: total_tasks - completed_tasks,
            status_distribution,
            task_completion: projects.iter().map(ProjectProgress::of).collect(),
            priority_distribution,
        }
    }
}
