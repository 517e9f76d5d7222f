//! Task extraction from a user utterance and an assistant reply.
//!
//! All functions here are pure: they look only at the raw utterance, the
//! reply text and the roster, so the heuristics can be tested without a
//! provider.

use chrono::{Days, NaiveDate};

use chief_core::task::{Priority, TaskDraft, TaskStatus};
use chief_core::team::TeamMember;

/// Phrases that turn a reply into a new task.
pub const TASK_TRIGGERS: [&str; 2] = ["create task", "new task"];

/// Assignee used when the roster is empty.
pub const UNASSIGNED: &str = "Unassigned";

/// Days between creation and the due date of an extracted task.
pub const DUE_IN_DAYS: u64 = 7;

const HIGH_PRIORITY_KEYWORDS: [&str; 3] = ["urgent", "critical", "high priority"];
const MEDIUM_PRIORITY_KEYWORDS: [&str; 2] = ["medium priority", "normal priority"];
const LOW_PRIORITY_KEYWORDS: [&str; 1] = ["low priority"];

/// Whether the utterance asks for a task to be created.
pub fn wants_task(utterance: &str) -> bool {
    let lower = utterance.to_lowercase();
    TASK_TRIGGERS.iter().any(|trigger| lower.contains(trigger))
}

/// Priority named by the utterance, `Medium` when none is.
pub fn extract_priority(utterance: &str) -> Priority {
    let lower = utterance.to_lowercase();
    let mentions = |keywords: &[&str]| keywords.iter().any(|keyword| lower.contains(keyword));

    if mentions(&HIGH_PRIORITY_KEYWORDS) {
        Priority::High
    } else if mentions(&MEDIUM_PRIORITY_KEYWORDS) {
        Priority::Medium
    } else if mentions(&LOW_PRIORITY_KEYWORDS) {
        Priority::Low
    } else {
        Priority::Medium
    }
}

/// Best roster match for the utterance.
///
/// Tried in order over the whole roster: a member whose name appears in the
/// utterance, then one whose role appears, then one with a skill containing
/// any of the utterance's whitespace-delimited words. Matching ignores case.
pub fn find_team_member<'a>(utterance: &str, roster: &'a [TeamMember]) -> Option<&'a TeamMember> {
    let lower = utterance.to_lowercase();
    let appears = |text: &str| !text.is_empty() && lower.contains(&text.to_lowercase());

    if let Some(member) = roster.iter().find(|member| appears(&member.name)) {
        return Some(member);
    }
    if let Some(member) = roster.iter().find(|member| appears(&member.role)) {
        return Some(member);
    }

    let tokens: Vec<&str> = lower.split_whitespace().collect();
    roster.iter().find(|member| {
        member.skills.iter().any(|skill| {
            let skill = skill.to_lowercase();
            tokens.iter().any(|token| skill.contains(token))
        })
    })
}

/// Name to assign: the best match, else the first member, else [`UNASSIGNED`].
pub fn infer_assignee(utterance: &str, roster: &[TeamMember]) -> String {
    find_team_member(utterance, roster)
        .or_else(|| roster.first())
        .map(|member| member.name.clone())
        .unwrap_or_else(|| UNASSIGNED.to_string())
}

/// Builds the task for a reply: first line as title, the whole reply as
/// description, due [`DUE_IN_DAYS`] after `today`.
pub fn synthesize_task(
    utterance: &str,
    reply: &str,
    roster: &[TeamMember],
    today: NaiveDate,
) -> TaskDraft {
    let title = reply.lines().next().unwrap_or_default();
    let due_date = today
        .checked_add_days(Days::new(DUE_IN_DAYS))
        .unwrap_or(today);

    TaskDraft::new(title, infer_assignee(utterance, roster), due_date)
        .with_description(reply)
        .with_priority(extract_priority(utterance))
        .with_status(TaskStatus::Todo)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<TeamMember> {
        vec![
            TeamMember::new(1, "Sarah Chen", "Product Designer").with_skills([
                "UI Design",
                "UX Design",
                "Figma",
                "User Research",
                "Prototyping",
            ]),
            TeamMember::new(2, "Mike Johnson", "Frontend Developer").with_skills([
                "JavaScript",
                "React",
                "TypeScript",
            ]),
            TeamMember::new(3, "Alex Turner", "Backend Developer").with_skills([
                "Node.js",
                "PostgreSQL",
                "Docker",
            ]),
            TeamMember::new(4, "Tom Cook", "Project Manager").with_skills(["Agile", "Scrum"]),
        ]
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 18).unwrap()
    }

    #[test]
    fn test_wants_task_is_case_insensitive() {
        assert!(wants_task("Please CREATE TASK for the login bug"));
        assert!(wants_task("new task: write docs"));
        assert!(!wants_task("what tasks are open?"));
        assert!(!wants_task("create a task"));
    }

    #[test]
    fn test_priority_keywords() {
        assert_eq!(extract_priority("this is URGENT"), Priority::High);
        assert_eq!(extract_priority("critical outage"), Priority::High);
        assert_eq!(extract_priority("high priority please"), Priority::High);
        assert_eq!(extract_priority("medium priority task"), Priority::Medium);
        assert_eq!(extract_priority("Medium Priority"), Priority::Medium);
        assert_eq!(extract_priority("normal priority"), Priority::Medium);
        assert_eq!(extract_priority("low priority cleanup"), Priority::Low);
        assert_eq!(extract_priority("whenever"), Priority::Medium);
    }

    #[test]
    fn test_higher_priority_keyword_wins() {
        assert_eq!(extract_priority("urgent, not low priority"), Priority::High);
        assert_eq!(extract_priority("medium priority, not low priority"), Priority::Medium);
    }

    #[test]
    fn test_name_match_beats_earlier_skill_match() {
        let roster = roster();
        let member = find_team_member(
            "Please create task for urgent login bug, assign to Mike Johnson",
            &roster,
        )
        .unwrap();
        assert_eq!(member.name, "Mike Johnson");
    }

    #[test]
    fn test_role_match() {
        let roster = roster();
        let member = find_team_member("ask the backend developer", &roster).unwrap();
        assert_eq!(member.name, "Alex Turner");
    }

    #[test]
    fn test_skill_match_uses_tokens() {
        let roster = roster();
        let member = find_team_member("needs docker", &roster).unwrap();
        assert_eq!(member.name, "Alex Turner");
    }

    #[test]
    fn test_no_match_falls_back_to_first_member() {
        let roster = roster();
        assert!(find_team_member("zzz", &roster).is_none());
        assert_eq!(infer_assignee("zzz", &roster), "Sarah Chen");
        assert_eq!(infer_assignee("zzz", &[]), UNASSIGNED);
    }

    #[test]
    fn test_synthesize_task() {
        let draft = synthesize_task(
            "Please create task for urgent login bug, assign to Mike Johnson",
            "Fix login bug\nUsers cannot sign in with SSO.",
            &roster(),
            today(),
        );

        assert_eq!(draft.title, "Fix login bug");
        assert_eq!(draft.description, "Fix login bug\nUsers cannot sign in with SSO.");
        assert_eq!(draft.status, TaskStatus::Todo);
        assert_eq!(draft.priority, Priority::High);
        assert_eq!(draft.assignee, "Mike Johnson");
        assert_eq!(draft.due_date, NaiveDate::from_ymd_opt(2024, 3, 25).unwrap());
    }
}
