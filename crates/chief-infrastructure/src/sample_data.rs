//! Built-in team roster and demo projects.

use chrono::NaiveDate;

use chief_core::Workspace;
use chief_core::project::{Project, ProjectDraft};
use chief_core::task::{Priority, Task, TaskDraft, TaskStatus};
use chief_core::team::TeamMember;

/// The roster used when no `team.toml` exists.
pub fn default_roster() -> Vec<TeamMember> {
    vec![
        TeamMember::new(1, "Sarah Chen", "Product Designer")
            .with_department("Design")
            .with_email("sarah@example.com")
            .with_phone("+1 (555) 123-4567")
            .with_skills(["UI Design", "UX Design", "Figma", "User Research", "Prototyping"]),
        TeamMember::new(2, "Mike Johnson", "Frontend Developer")
            .with_department("Engineering")
            .with_email("mike@example.com")
            .with_phone("+1 (555) 234-5678")
            .with_skills([
                "JavaScript",
                "React",
                "TypeScript",
                "CSS",
                "HTML",
                "Tailwind CSS",
                "Redux",
            ]),
        TeamMember::new(3, "Alex Turner", "Backend Developer")
            .with_department("Engineering")
            .with_email("alex@example.com")
            .with_phone("+1 (555) 345-6789")
            .with_skills([
                "Node.js",
                "Express",
                "MongoDB",
                "PostgreSQL",
                "Python",
                "Docker",
                "AWS",
            ]),
        TeamMember::new(4, "Tom Cook", "Project Manager")
            .with_department("Management")
            .with_email("tom@example.com")
            .with_phone("+1 (555) 456-7890")
            .with_skills([
                "Project Management",
                "Agile",
                "Scrum",
                "Risk Management",
                "Team Leadership",
                "Stakeholder Management",
            ]),
    ]
}

/// Two demo projects with their tasks; nothing is selected.
pub fn sample_workspace() -> Workspace {
    Workspace::with_projects(sample_projects())
}

fn sample_projects() -> Vec<Project> {
    let website = ProjectDraft::new("Website Redesign", date(2024, 4, 15))
        .with_description("Redesign company website with modern UI/UX")
        .with_members(["Sarah Chen", "Mike Johnson"])
        .with_tasks(vec![
            Task::from_draft(
                "1",
                TaskDraft::new("Design Homepage", "Sarah Chen", date(2024, 3, 25))
                    .with_description("Create new homepage design with improved user experience")
                    .with_status(TaskStatus::InProgress)
                    .with_priority(Priority::High),
            ),
            Task::from_draft(
                "2",
                TaskDraft::new("Implement Authentication", "Mike Johnson", date(2024, 3, 28))
                    .with_description("Add user authentication system")
                    .with_priority(Priority::High),
            ),
        ]);

    let mobile = ProjectDraft::new("Mobile App Development", date(2024, 5, 30))
        .with_description("Develop iOS and Android mobile applications")
        .with_members(["Alex Turner", "Tom Cook"])
        .with_tasks(vec![Task::from_draft(
            "3",
            TaskDraft::new("UI Design", "Alex Turner", date(2024, 3, 20))
                .with_description("Design mobile app interface")
                .with_status(TaskStatus::Done)
                .with_priority(Priority::High),
        )]);

    vec![
        Project::from_draft("1", website),
        Project::from_draft("2", mobile),
    ]
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chief_core::report::DashboardSummary;

    #[test]
    fn test_sample_workspace_shape() {
        let workspace = sample_workspace();
        assert_eq!(workspace.projects().len(), 2);
        assert!(workspace.current_project().is_none());

        let summary = DashboardSummary::of(workspace.projects());
        assert_eq!(summary.active_tasks, 2);
        assert_eq!(summary.completed_tasks, 1);
        assert_eq!(summary.team_members, 4);
    }

    #[test]
    fn test_new_project_ids_continue_after_samples() {
        let mut workspace = sample_workspace();
        let project = workspace.create_project(ProjectDraft::new("Next", date(2024, 6, 1)));
        assert_eq!(project.id, "3");
    }

    #[test]
    fn test_default_roster_order() {
        let names: Vec<String> = default_roster().into_iter().map(|m| m.name).collect();
        assert_eq!(names, ["Sarah Chen", "Mike Johnson", "Alex Turner", "Tom Cook"]);
    }
}
