use chief_core::ChiefError;
use chief_core::conversation::PendingAttachment;
use chief_core::task::Task;

/// What the user submitted in one go.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserTurn {
    pub message: String,
    pub attachment: Option<PendingAttachment>,
}

impl UserTurn {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            attachment: None,
        }
    }

    pub fn attachment(attachment: PendingAttachment) -> Self {
        Self {
            message: String::new(),
            attachment: Some(attachment),
        }
    }

    pub fn with_attachment(mut self, attachment: PendingAttachment) -> Self {
        self.attachment = Some(attachment);
        self
    }

    /// Neither text nor a file.
    pub fn is_empty(&self) -> bool {
        self.message.trim().is_empty() && self.attachment.is_none()
    }
}

/// Result of [`AssistantBridge::submit`](super::AssistantBridge::submit).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Another turn is still in flight; nothing was changed.
    Busy,
    /// The turn carried neither text nor a file.
    Empty,
    Handled {
        attachment: Option<AttachmentOutcome>,
        reply: Option<ReplyOutcome>,
    },
}

impl TurnOutcome {
    /// The task added to the workspace during this turn, if any.
    pub fn created_task(&self) -> Option<&CreatedTask> {
        match self {
            Self::Handled {
                reply: Some(ReplyOutcome::Answered { created_task, .. }),
                ..
            } => created_task.as_ref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentOutcome {
    /// The file became the active document.
    Loaded { file_name: String },
    Rejected(ChiefError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyOutcome {
    Answered {
        reply: String,
        created_task: Option<CreatedTask>,
    },
    Failed(ChiefError),
}

/// A task the assistant added to a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedTask {
    pub project_id: String,
    pub task: Task,
}
