use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{NaiveDate, Utc};
use tokio::sync::RwLock;
use tracing::Instrument;
use uuid::Uuid;

use chief_core::Workspace;
use chief_core::conversation::{
    AttachmentSource, Conversation, ConversationMessage, DocumentContext, MAX_ATTACHMENT_BYTES,
    PendingAttachment,
};
use chief_core::error::{ChiefError, Result};
use chief_core::team::{TeamMember, TeamRepository};
use chief_interaction::{CompletionProvider, RateLimiter};

use super::turn::{AttachmentOutcome, CreatedTask, ReplyOutcome, TurnOutcome, UserTurn};
use crate::extraction;
use crate::prompt::PromptBuilder;

/// Reply used when the provider answers without any text.
pub const FALLBACK_REPLY: &str = "I couldn't process that request. Please try again.";

const READ_FAILURE_REPLY: &str =
    "Sorry, I encountered an error processing your file. Please try again.";

/// One assistant conversation bound to a workspace.
///
/// At most one turn is processed at a time; a second [`submit`](Self::submit)
/// while one is running returns [`TurnOutcome::Busy`]. Dispatches are spaced
/// by the shared [`RateLimiter`].
pub struct AssistantBridge {
    session_id: Uuid,
    provider: Arc<dyn CompletionProvider>,
    limiter: Arc<RateLimiter>,
    workspace: Arc<RwLock<Workspace>>,
    team: Arc<dyn TeamRepository>,
    prompts: PromptBuilder,
    conversation: RwLock<Conversation>,
    busy: AtomicBool,
}

impl AssistantBridge {
    /// Creates a bridge using the process-wide rate limiter.
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        workspace: Arc<RwLock<Workspace>>,
        team: Arc<dyn TeamRepository>,
    ) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            provider,
            limiter: RateLimiter::global(),
            workspace,
            team,
            prompts: PromptBuilder::new(),
            conversation: RwLock::new(Conversation::new()),
            busy: AtomicBool::new(false),
        }
    }

    /// Replaces the rate limiter, e.g. to isolate tests.
    pub fn with_rate_limiter(mut self, limiter: Arc<RateLimiter>) -> Self {
        self.limiter = limiter;
        self
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Snapshot of the conversation so far.
    pub async fn messages(&self) -> Vec<ConversationMessage> {
        self.conversation.read().await.messages().to_vec()
    }

    pub async fn document(&self) -> Option<DocumentContext> {
        self.conversation.read().await.document().cloned()
    }

    /// Drops the active document; later prompts use the team roster again.
    pub async fn clear_document(&self) -> Option<DocumentContext> {
        self.conversation.write().await.clear_document()
    }

    /// Processes one user turn.
    ///
    /// Validation and provider failures are reported in the conversation and
    /// in the returned outcome; they never surface as an `Err`.
    pub async fn submit(&self, turn: UserTurn) -> TurnOutcome {
        let Some(_guard) = BusyGuard::acquire(&self.busy) else {
            tracing::debug!(
                session_id = %self.session_id,
                "Turn refused while another is in flight"
            );
            return TurnOutcome::Busy;
        };

        if turn.is_empty() {
            return TurnOutcome::Empty;
        }

        let span = tracing::info_span!("assistant_turn", session_id = %self.session_id);
        self.run_turn(turn).instrument(span).await
    }

    async fn run_turn(&self, turn: UserTurn) -> TurnOutcome {
        let attachment = match turn.attachment {
            Some(pending) => Some(self.load_attachment(pending).await),
            None => None,
        };

        let reply = if turn.message.trim().is_empty() {
            None
        } else {
            Some(self.answer(&turn.message).await)
        };

        TurnOutcome::Handled { attachment, reply }
    }

    async fn load_attachment(&self, pending: PendingAttachment) -> AttachmentOutcome {
        if let Err(err) = pending.validate() {
            tracing::warn!(
                file = %pending.name,
                mime = %pending.mime_type,
                size = pending.size,
                "Attachment rejected"
            );
            self.conversation
                .write()
                .await
                .push_assistant(err.user_message());
            return AttachmentOutcome::Rejected(err);
        }

        let bytes = match read_attachment(&pending.source).await {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(file = %pending.name, error = %err, "Failed to read attachment");
                self.conversation.write().await.push_assistant(READ_FAILURE_REPLY);
                return AttachmentOutcome::Rejected(err);
            }
        };

        // The file may have grown since its metadata was inspected.
        if bytes.len() as u64 > MAX_ATTACHMENT_BYTES {
            let err = ChiefError::validation("File size should be less than 5MB.");
            tracing::warn!(
                file = %pending.name,
                size = bytes.len(),
                "Attachment too large once read"
            );
            self.conversation
                .write()
                .await
                .push_assistant(err.user_message());
            return AttachmentOutcome::Rejected(err);
        }

        let document = DocumentContext::from_bytes(&pending.name, &pending.mime_type, &bytes);
        tracing::info!(file = %document.file_name, bytes = bytes.len(), "Document loaded");

        let mut conversation = self.conversation.write().await;
        conversation.push_assistant(document.loaded_message());
        conversation.set_document(document);

        AttachmentOutcome::Loaded {
            file_name: pending.name,
        }
    }

    async fn answer(&self, message: &str) -> ReplyOutcome {
        let roster = self.roster().await;

        let outcome = match self.complete(message, &roster).await {
            Ok(reply) => {
                let created_task = if extraction::wants_task(message) {
                    self.create_task(message, &reply, &roster, today()).await
                } else {
                    None
                };
                ReplyOutcome::Answered {
                    reply,
                    created_task,
                }
            }
            Err(err) => ReplyOutcome::Failed(err),
        };

        let mut conversation = self.conversation.write().await;
        conversation.push_user(message);
        match &outcome {
            ReplyOutcome::Answered { reply, .. } => conversation.push_assistant(reply.clone()),
            ReplyOutcome::Failed(err) => {
                conversation.push_assistant(format!("Error: {}", err.user_message()))
            }
        }
        outcome
    }

    /// Builds the prompt, waits for the limiter and dispatches.
    async fn complete(&self, message: &str, roster: &[TeamMember]) -> Result<String> {
        let document = self.conversation.read().await.document().cloned();
        let prompt = self.prompts.build(document.as_ref(), roster, message)?;

        let waited = self.limiter.acquire().await;
        tracing::info!(
            with_document = document.is_some(),
            waited_ms = waited.as_millis() as u64,
            "Dispatching assistant prompt"
        );

        let reply = self
            .provider
            .complete(&prompt)
            .await?
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_REPLY.to_string());
        Ok(reply)
    }

    async fn create_task(
        &self,
        message: &str,
        reply: &str,
        roster: &[TeamMember],
        today: NaiveDate,
    ) -> Option<CreatedTask> {
        let draft = extraction::synthesize_task(message, reply, roster, today);

        let mut workspace = self.workspace.write().await;
        let Some(project_id) = workspace.resolve_target() else {
            tracing::warn!(
                title = %draft.title,
                "No project to add the assistant task to; dropping it"
            );
            return None;
        };

        match workspace.add_task(&project_id, draft) {
            Ok(task) => {
                tracing::info!(
                    %project_id,
                    task_id = %task.id,
                    assignee = %task.assignee,
                    "Assistant created task"
                );
                Some(CreatedTask { project_id, task })
            }
            Err(err) => {
                tracing::warn!(%project_id, error = %err, "Failed to add assistant task");
                None
            }
        }
    }

    async fn roster(&self) -> Vec<TeamMember> {
        match self.team.list_members().await {
            Ok(members) => members,
            Err(err) => {
                tracing::warn!(error = %err, "Failed to load team roster; continuing without it");
                Vec::new()
            }
        }
    }
}

async fn read_attachment(source: &AttachmentSource) -> Result<Vec<u8>> {
    match source {
        AttachmentSource::Bytes(bytes) => Ok(bytes.clone()),
        AttachmentSource::File(path) => tokio::fs::read(path).await.map_err(ChiefError::from),
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Clears the busy flag when the turn ends, however it ends.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
