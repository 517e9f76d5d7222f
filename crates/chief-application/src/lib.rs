//! Application layer for Chief.
//!
//! Coordinates the workspace, the team roster and the completion provider
//! into assistant conversation turns.

pub mod assistant;
pub mod extraction;
pub mod prompt;

pub use assistant::{
    AssistantBridge, AttachmentOutcome, CreatedTask, ReplyOutcome, TurnOutcome, UserTurn,
};
pub use prompt::PromptBuilder;
