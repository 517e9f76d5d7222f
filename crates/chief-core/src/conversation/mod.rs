//! Conversation domain module.
//!
//! # Module Structure
//!
//! - `message`: message roles, messages and the append-only `Conversation` log
//! - `document`: attachment rules and the active document context

mod document;
mod message;

pub use document::{
    ALLOWED_MIME_TYPES, AttachmentSource, DocumentContext, MAX_ATTACHMENT_BYTES, PendingAttachment,
};
pub use message::{Conversation, ConversationMessage, GREETING, MessageRole};
