//! Text rendering of workspace views.

use std::fmt::Write;

use colored::{ColoredString, Colorize};

use chief_core::Workspace;
use chief_core::board::Board;
use chief_core::project::Project;
use chief_core::report::{DashboardSummary, ProgressSummary, ReportSummary};
use chief_core::task::{Priority, Task, TaskStatus};
use chief_core::team::TeamMember;

const BAR_WIDTH: usize = 20;

pub fn progress_bar(percent: u32) -> String {
    let filled = (percent.min(100) as usize * BAR_WIDTH) / 100;
    format!(
        "[{}{}] {percent:>3}%",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled)
    )
}

fn priority_label(priority: Priority) -> ColoredString {
    match priority {
        Priority::High => "High".red(),
        Priority::Medium => "Medium".yellow(),
        Priority::Low => "Low".green(),
    }
}

fn status_heading(status: TaskStatus) -> ColoredString {
    let title = status.label().bold();
    match status {
        TaskStatus::Todo => title.bright_white(),
        TaskStatus::InProgress => title.bright_yellow(),
        TaskStatus::Done => title.bright_green(),
    }
}

fn task_line(task: &Task) -> String {
    format!(
        "#{} {} [{}] {} (due {})",
        task.id,
        task.title,
        priority_label(task.priority),
        task.assignee.bright_blue(),
        task.due_date
    )
}

pub fn projects(workspace: &Workspace) -> String {
    if workspace.projects().is_empty() {
        return "No projects yet. Create one with /new-project <name>.".to_string();
    }

    let current = workspace.current_project_id();
    let mut out = String::new();
    for project in workspace.projects() {
        let marker = if current == Some(project.id.as_str()) { "*" } else { " " };
        let progress = ProgressSummary::of(&project.tasks);
        let _ = writeln!(
            out,
            "{marker} {} {} ({}, due {})",
            project.id.bold(),
            project.name,
            project.status,
            project.due_date
        );
        let _ = writeln!(
            out,
            "    {} {} done, {} remaining",
            progress_bar(progress.percent),
            progress.completed,
            progress.remaining
        );
    }
    out.trim_end().to_string()
}

pub fn board(project: &Project) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", project.name.bold(), format!("({})", project.id).bright_black());

    let board = Board::project(&project.tasks);
    for column in board.columns() {
        let _ = writeln!(out, "\n{} ({})", status_heading(column.status), column.tasks.len());
        if column.tasks.is_empty() {
            let _ = writeln!(out, "  {}", "-".bright_black());
        }
        for task in &column.tasks {
            let _ = writeln!(out, "  {}", task_line(task));
        }
    }
    out.trim_end().to_string()
}

pub fn dashboard(summary: &DashboardSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Dashboard".bold());
    let _ = writeln!(out, "  Total projects:  {}", summary.total_projects);
    let _ = writeln!(out, "  Active tasks:    {}", summary.active_tasks);
    let _ = writeln!(out, "  Completed tasks: {}", summary.completed_tasks);
    let _ = writeln!(out, "  Team members:    {}", summary.team_members);

    let _ = writeln!(out, "\n{}", "Upcoming deadlines".bold());
    if summary.upcoming_deadlines.is_empty() {
        let _ = writeln!(out, "  {}", "none".bright_black());
    }
    for deadline in &summary.upcoming_deadlines {
        let _ = writeln!(
            out,
            "  {} {} ({}, project {})",
            deadline.task.due_date,
            deadline.task.title,
            deadline.task.status.label(),
            deadline.project_id
        );
    }

    let _ = writeln!(out, "\n{}", "Project progress".bold());
    for progress in &summary.project_progress {
        let _ = writeln!(out, "  {} {}", progress_bar(progress.percent), progress.name);
    }
    out.trim_end().to_string()
}

pub fn report(summary: &ReportSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Reports".bold());
    let _ = writeln!(out, "  Active projects: {}", summary.active_projects);
    let _ = writeln!(out, "  Completion rate: {}%", summary.completion_rate);
    let _ = writeln!(out, "  Pending tasks:   {}", summary.pending_tasks);

    let _ = writeln!(out, "\n{}", "Project status".bold());
    for (status, count) in &summary.status_distribution {
        let _ = writeln!(out, "  {status}: {count}");
    }

    let _ = writeln!(out, "\n{}", "Task completion".bold());
    for progress in &summary.task_completion {
        let _ = writeln!(
            out,
            "  {}: {} completed, {} pending",
            progress.name,
            progress.completed,
            progress.pending()
        );
    }

    let _ = writeln!(out, "\n{}", "Task priority".bold());
    for (priority, count) in &summary.priority_distribution {
        let _ = writeln!(out, "  {}: {count}", priority_label(*priority));
    }
    out.trim_end().to_string()
}

pub fn team(members: &[TeamMember]) -> String {
    if members.is_empty() {
        return "The team roster is empty.".to_string();
    }

    let mut out = String::new();
    for member in members {
        let _ = writeln!(out, "{} ({})", member.name.bold(), member.role);
        if !member.department.is_empty() {
            let _ = writeln!(out, "  Department: {}", member.department);
        }
        if !member.email.is_empty() {
            let _ = writeln!(out, "  Email: {}", member.email);
        }
        if !member.skills.is_empty() {
            let _ = writeln!(out, "  Skills: {}", member.skills.join(", "));
        }
    }
    out.trim_end().to_string()
}
