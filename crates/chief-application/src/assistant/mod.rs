//! Assistant conversation turns.
//!
//! [`AssistantBridge`] owns one conversation and turns each [`UserTurn`] into
//! at most one completion call, appending the result to the conversation and,
//! when asked to, adding a task to the workspace.

mod bridge;
mod turn;

pub use bridge::{AssistantBridge, FALLBACK_REPLY};
pub use turn::{AttachmentOutcome, CreatedTask, ReplyOutcome, TurnOutcome, UserTurn};
