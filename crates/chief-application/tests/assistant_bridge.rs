use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::{Notify, RwLock};

use chief_application::assistant::FALLBACK_REPLY;
use chief_application::{AssistantBridge, AttachmentOutcome, ReplyOutcome, TurnOutcome, UserTurn};
use chief_core::conversation::{GREETING, MessageRole, PendingAttachment};
use chief_core::error::Result;
use chief_core::project::ProjectDraft;
use chief_core::task::{Priority, TaskStatus};
use chief_core::team::{TeamMember, TeamRepository};
use chief_core::{ChiefError, Workspace};
use chief_interaction::{CompletionProvider, RateLimiter};

/// Provider returning scripted results and recording every prompt.
#[derive(Default)]
struct ScriptedProvider {
    replies: Mutex<VecDeque<Result<Option<String>>>>,
    prompts: Mutex<Vec<String>>,
    gate: Option<Arc<Notify>>,
}

impl ScriptedProvider {
    fn new(replies: impl IntoIterator<Item = Result<Option<String>>>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            ..Default::default()
        }
    }

    fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn complete(&self, prompt: &str) -> Result<Option<String>> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(None))
    }
}

struct StaticTeam(Vec<TeamMember>);

#[async_trait]
impl TeamRepository for StaticTeam {
    async fn list_members(&self) -> Result<Vec<TeamMember>> {
        Ok(self.0.clone())
    }
}

fn roster() -> Vec<TeamMember> {
    vec![
        TeamMember::new(1, "Sarah Chen", "Product Designer")
            .with_department("Design")
            .with_skills(["UI Design", "Prototyping"]),
        TeamMember::new(2, "Mike Johnson", "Frontend Developer")
            .with_department("Engineering")
            .with_skills(["React", "TypeScript"]),
    ]
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn seeded_workspace() -> Arc<RwLock<Workspace>> {
    let mut workspace = Workspace::new();
    workspace.create_project(ProjectDraft::new("Website Redesign", date(2024, 4, 15)));
    workspace.create_project(ProjectDraft::new("Mobile App Development", date(2024, 5, 30)));
    Arc::new(RwLock::new(workspace))
}

fn bridge(provider: Arc<ScriptedProvider>, workspace: Arc<RwLock<Workspace>>) -> AssistantBridge {
    AssistantBridge::new(provider, workspace, Arc::new(StaticTeam(roster())))
        .with_rate_limiter(Arc::new(RateLimiter::with_interval(Duration::ZERO)))
}

fn contents(
    messages: &[chief_core::conversation::ConversationMessage],
) -> Vec<(MessageRole, String)> {
    messages
        .iter()
        .map(|message| (message.role, message.content.clone()))
        .collect()
}

#[tokio::test]
async fn test_conversation_starts_with_greeting() {
    let provider = Arc::new(ScriptedProvider::default());
    let bridge = bridge(provider, seeded_workspace());

    let messages = bridge.messages().await;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].role, MessageRole::Assistant);
    assert_eq!(messages[0].content, GREETING);
}

#[tokio::test]
async fn test_plain_question_gets_reply_without_task() {
    let provider = Arc::new(ScriptedProvider::new([Ok(Some("Sarah should do it.".to_string()))]));
    let workspace = seeded_workspace();
    let bridge = bridge(provider.clone(), workspace.clone());

    let outcome = bridge.submit(UserTurn::message("Who should design the homepage?")).await;

    assert_eq!(
        outcome,
        TurnOutcome::Handled {
            attachment: None,
            reply: Some(ReplyOutcome::Answered {
                reply: "Sarah should do it.".to_string(),
                created_task: None,
            }),
        }
    );

    let prompts = provider.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("- Sarah Chen (Product Designer)"));
    assert!(prompts[0].contains("Skills: React, TypeScript"));
    assert!(prompts[0].ends_with("User message: Who should design the homepage?"));

    let messages = contents(&bridge.messages().await);
    assert_eq!(
        messages[1..],
        [
            (MessageRole::User, "Who should design the homepage?".to_string()),
            (MessageRole::Assistant, "Sarah should do it.".to_string()),
        ]
    );
    assert!(workspace.read().await.projects().iter().all(|p| p.tasks.is_empty()));
}

#[tokio::test]
async fn test_create_task_request_adds_task_to_current_project() {
    let provider = Arc::new(ScriptedProvider::new([Ok(Some(
        "Fix login bug\nUsers cannot sign in after the last deploy.".to_string(),
    ))]));
    let workspace = seeded_workspace();
    workspace.write().await.select_project("2").unwrap();
    let bridge = bridge(provider, workspace.clone());

    let outcome = bridge
        .submit(UserTurn::message(
            "Please create task for urgent login bug, assign to Mike Johnson",
        ))
        .await;

    let created = outcome.created_task().expect("task created").clone();
    assert_eq!(created.project_id, "2");
    assert_eq!(created.task.title, "Fix login bug");
    assert_eq!(created.task.priority, Priority::High);
    assert_eq!(created.task.assignee, "Mike Johnson");
    assert_eq!(created.task.status, TaskStatus::Todo);

    let workspace = workspace.read().await;
    let project = workspace.project("2").unwrap();
    assert_eq!(project.tasks, vec![created.task.clone()]);
    assert_eq!(workspace.current_project().unwrap().tasks.len(), 1);
    assert!(workspace.project("1").unwrap().tasks.is_empty());
}

#[tokio::test]
async fn test_created_task_falls_back_to_first_project_and_selects_it() {
    let provider = Arc::new(ScriptedProvider::new([Ok(Some("Write docs".to_string()))]));
    let workspace = seeded_workspace();
    let bridge = bridge(provider, workspace.clone());

    let outcome = bridge.submit(UserTurn::message("new task: write docs")).await;

    assert_eq!(outcome.created_task().unwrap().project_id, "1");
    let workspace = workspace.read().await;
    assert_eq!(workspace.current_project_id(), Some("1"));
    assert_eq!(workspace.project("1").unwrap().tasks[0].assignee, "Sarah Chen");
}

#[tokio::test]
async fn test_created_task_is_dropped_without_projects() {
    let provider = Arc::new(ScriptedProvider::new([Ok(Some("Write docs".to_string()))]));
    let workspace = Arc::new(RwLock::new(Workspace::new()));
    let bridge = bridge(provider, workspace.clone());

    let outcome = bridge.submit(UserTurn::message("create task write docs")).await;

    match outcome {
        TurnOutcome::Handled {
            reply: Some(ReplyOutcome::Answered { reply, created_task }),
            ..
        } => {
            assert_eq!(reply, "Write docs");
            assert!(created_task.is_none());
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert!(workspace.read().await.projects().is_empty());
}

#[tokio::test]
async fn test_missing_reply_uses_fallback() {
    let provider = Arc::new(ScriptedProvider::new([Ok(None), Ok(Some("   ".to_string()))]));
    let bridge = bridge(provider, seeded_workspace());

    for _ in 0..2 {
        bridge.submit(UserTurn::message("hello")).await;
        let messages = bridge.messages().await;
        assert_eq!(messages.last().unwrap().content, FALLBACK_REPLY);
    }
}

#[tokio::test]
async fn test_provider_failure_is_reported_and_recoverable() {
    let provider = Arc::new(ScriptedProvider::new([
        Err(ChiefError::RateLimited(
            "Rate limit exceeded. Please wait a moment before trying again.".to_string(),
        )),
        Err(ChiefError::upstream(Some(500), "API error: 500 Internal Server Error")),
        Ok(Some("All good now.".to_string())),
    ]));
    let workspace = seeded_workspace();
    let before = workspace.read().await.clone();
    let bridge = bridge(provider, workspace.clone());

    let first = bridge.submit(UserTurn::message("create task for the outage")).await;
    assert!(matches!(
        first,
        TurnOutcome::Handled {
            reply: Some(ReplyOutcome::Failed(ref err)),
            ..
        } if err.is_rate_limited()
    ));
    bridge.submit(UserTurn::message("status?")).await;
    let third = bridge.submit(UserTurn::message("status?")).await;
    assert!(matches!(
        third,
        TurnOutcome::Handled { reply: Some(ReplyOutcome::Answered { .. }), .. }
    ));

    let messages = contents(&bridge.messages().await);
    assert_eq!(
        messages[1..],
        [
            (MessageRole::User, "create task for the outage".to_string()),
            (
                MessageRole::Assistant,
                "Error: Rate limit exceeded. Please wait a moment before trying again.".to_string()
            ),
            (MessageRole::User, "status?".to_string()),
            (
                MessageRole::Assistant,
                "Error: API error: 500 Internal Server Error".to_string()
            ),
            (MessageRole::User, "status?".to_string()),
            (MessageRole::Assistant, "All good now.".to_string()),
        ]
    );
    assert_eq!(*workspace.read().await.projects(), *before.projects());
}

#[tokio::test]
async fn test_oversized_text_attachment_is_rejected_without_dispatch() {
    let provider = Arc::new(ScriptedProvider::default());
    let bridge = bridge(provider.clone(), seeded_workspace());

    let attachment =
        PendingAttachment::from_bytes("notes.txt", "text/plain", vec![b'a'; 6 * 1024 * 1024]);
    let outcome = bridge.submit(UserTurn::attachment(attachment)).await;

    match outcome {
        TurnOutcome::Handled {
            attachment: Some(AttachmentOutcome::Rejected(err)),
            reply: None,
        } => assert!(err.is_validation()),
        other => panic!("unexpected outcome: {other:?}"),
    }
    let messages = bridge.messages().await;
    assert_eq!(messages.last().unwrap().content, "File size should be less than 5MB.");
    assert!(bridge.document().await.is_none());
    assert!(provider.prompts().is_empty());
}

#[tokio::test]
async fn test_unsupported_type_keeps_previous_document() {
    let provider = Arc::new(ScriptedProvider::default());
    let bridge = bridge(provider, seeded_workspace());

    bridge
        .submit(UserTurn::attachment(PendingAttachment::from_bytes(
            "plan.txt",
            "text/plain",
            b"milestones".to_vec(),
        )))
        .await;
    bridge
        .submit(UserTurn::attachment(PendingAttachment::from_bytes(
            "photo.png",
            "image/png",
            vec![0; 10],
        )))
        .await;

    assert_eq!(
        bridge.messages().await.last().unwrap().content,
        "Please upload only PDF, Excel, or TXT files."
    );
    assert_eq!(bridge.document().await.unwrap().file_name, "plan.txt");
}

#[tokio::test]
async fn test_small_pdf_becomes_document_context() {
    let provider = Arc::new(ScriptedProvider::new([Ok(Some("Q2 revenue was 900.".to_string()))]));
    let bridge = bridge(provider.clone(), seeded_workspace());

    let mut bytes = b"%PDF-1.4 Q1: 1200 Q2: 900 ".to_vec();
    bytes.resize(10 * 1024, b' ');
    let attachment = PendingAttachment::from_bytes("report.pdf", "application/pdf", bytes);

    let outcome = bridge
        .submit(UserTurn::message("What was Q2 revenue?").with_attachment(attachment))
        .await;

    match outcome {
        TurnOutcome::Handled {
            attachment: Some(AttachmentOutcome::Loaded { file_name }),
            reply: Some(ReplyOutcome::Answered { .. }),
        } => assert_eq!(file_name, "report.pdf"),
        other => panic!("unexpected outcome: {other:?}"),
    }

    let prompts = provider.prompts();
    assert!(prompts[0].starts_with("I am an AI assistant analyzing a report.pdf."));
    assert!(prompts[0].contains("Q1: 1200 Q2: 900"));
    assert!(prompts[0].contains("User question: What was Q2 revenue?"));

    let messages = bridge.messages().await;
    assert!(messages[1].content.starts_with("I've loaded \"report.pdf\"."));
    assert_eq!(messages[2].content, "What was Q2 revenue?");

    bridge.clear_document().await;
    bridge.submit(UserTurn::message("and now?")).await;
    assert!(provider.prompts()[1].starts_with("You are an AI Project Manager."));
}

#[tokio::test]
async fn test_file_attachment_is_read_after_validation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("agenda.txt");
    std::fs::write(&path, "1. Kickoff\n2. Scope").unwrap();

    let provider = Arc::new(ScriptedProvider::default());
    let bridge = bridge(provider, seeded_workspace());
    let attachment = PendingAttachment {
        name: "agenda.txt".to_string(),
        mime_type: "text/plain".to_string(),
        size: 19,
        source: chief_core::conversation::AttachmentSource::File(path),
    };

    bridge.submit(UserTurn::attachment(attachment)).await;
    assert_eq!(bridge.document().await.unwrap().content, "1. Kickoff\n2. Scope");
}

#[tokio::test]
async fn test_file_larger_than_inspected_is_rejected_after_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("export.txt");
    std::fs::write(&path, vec![b'x'; 5 * 1024 * 1024 + 1]).unwrap();

    let provider = Arc::new(ScriptedProvider::default());
    let bridge = bridge(provider, seeded_workspace());
    let attachment = PendingAttachment {
        name: "export.txt".to_string(),
        mime_type: "text/plain".to_string(),
        size: 12,
        source: chief_core::conversation::AttachmentSource::File(path),
    };

    let outcome = bridge.submit(UserTurn::attachment(attachment)).await;
    assert!(matches!(
        outcome,
        TurnOutcome::Handled {
            attachment: Some(AttachmentOutcome::Rejected(ref err)),
            ..
        } if err.is_validation()
    ));
    assert!(bridge.document().await.is_none());
    let messages = bridge.messages().await;
    assert_eq!(
        messages.last().unwrap().content,
        "File size should be less than 5MB."
    );
}

#[tokio::test]
async fn test_empty_turn_is_ignored() {
    let provider = Arc::new(ScriptedProvider::default());
    let bridge = bridge(provider.clone(), seeded_workspace());

    assert_eq!(bridge.submit(UserTurn::message("   ")).await, TurnOutcome::Empty);
    assert_eq!(bridge.messages().await.len(), 1);
    assert!(provider.prompts().is_empty());
}

#[tokio::test]
async fn test_second_submit_while_in_flight_is_busy() {
    let gate = Arc::new(Notify::new());
    let provider = Arc::new(
        ScriptedProvider::new([Ok(Some("done".to_string()))]).gated(gate.clone()),
    );
    let bridge = Arc::new(bridge(provider.clone(), seeded_workspace()));

    let first = tokio::spawn({
        let bridge = bridge.clone();
        async move { bridge.submit(UserTurn::message("first")).await }
    });

    while provider.prompts().is_empty() {
        tokio::task::yield_now().await;
    }
    assert!(bridge.is_busy());
    assert_eq!(bridge.submit(UserTurn::message("second")).await, TurnOutcome::Busy);

    gate.notify_one();
    let outcome = first.await.unwrap();
    assert!(matches!(
        outcome,
        TurnOutcome::Handled {
            reply: Some(ReplyOutcome::Answered { .. }),
            ..
        }
    ));
    assert!(!bridge.is_busy());

    let messages = contents(&bridge.messages().await);
    assert_eq!(messages.len(), 3);
    assert!(messages.iter().all(|(_, content)| content != "second"));
    assert_eq!(provider.prompts().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_bridges_sharing_a_limiter_are_spaced() {
    let limiter = Arc::new(RateLimiter::new());
    let provider = Arc::new(ScriptedProvider::new([
        Ok(Some("a".to_string())),
        Ok(Some("b".to_string())),
    ]));
    let team: Arc<dyn TeamRepository> = Arc::new(StaticTeam(roster()));
    let first = AssistantBridge::new(provider.clone(), seeded_workspace(), team.clone())
        .with_rate_limiter(limiter.clone());
    let second = AssistantBridge::new(provider, seeded_workspace(), team)
        .with_rate_limiter(limiter);

    let start = tokio::time::Instant::now();
    first.submit(UserTurn::message("one")).await;
    second.submit(UserTurn::message("two")).await;

    assert!(start.elapsed() >= Duration::from_millis(1000));
}
