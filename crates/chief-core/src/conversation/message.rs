//! Conversation message types.

use serde::{Deserialize, Serialize};

use super::document::DocumentContext;

/// Opening message of every assistant session.
pub const GREETING: &str = "Hi! I'm your AI Project Manager powered by Chief. You can upload files and ask me questions about them, or I can help with project management tasks.";

/// Represents the role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message from the user.
    User,
    /// Message from the AI assistant.
    Assistant,
}

/// A single message in a conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    /// The role of the message sender.
    pub role: MessageRole,
    /// The content of the message.
    pub content: String,
    /// Timestamp when the message was created (RFC 3339 format).
    pub timestamp: String,
}

impl ConversationMessage {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Append-only message log of one assistant session plus the document the
/// user attached, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    messages: Vec<ConversationMessage>,
    document: Option<DocumentContext>,
}

impl Conversation {
    /// A conversation that opens with the assistant greeting.
    pub fn new() -> Self {
        let mut conversation = Self::default();
        conversation.push_assistant(GREETING);
        conversation
    }

    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&ConversationMessage> {
        self.messages.last()
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages
            .push(ConversationMessage::new(MessageRole::User, content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages
            .push(ConversationMessage::new(MessageRole::Assistant, content));
    }

    /// The document subsequent prompts are answered from.
    pub fn document(&self) -> Option<&DocumentContext> {
        self.document.as_ref()
    }

    /// Makes `document` the active context, replacing any previous one.
    pub fn set_document(&mut self, document: DocumentContext) {
        self.document = Some(document);
    }

    pub fn clear_document(&mut self) -> Option<DocumentContext> {
        self.document.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_conversation_starts_with_greeting() {
        let conversation = Conversation::new();
        assert_eq!(conversation.messages().len(), 1);
        assert_eq!(conversation.messages()[0].role, MessageRole::Assistant);
        assert_eq!(conversation.messages()[0].content, GREETING);
        assert!(conversation.document().is_none());
    }

    #[test]
    fn test_messages_append_in_order() {
        let mut conversation = Conversation::default();
        conversation.push_user("hello");
        conversation.push_assistant("hi");

        let roles: Vec<MessageRole> = conversation.messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![MessageRole::User, MessageRole::Assistant]);
        assert_eq!(conversation.last().unwrap().content, "hi");
    }

    #[test]
    fn test_document_replace_and_clear() {
        let mut conversation = Conversation::new();
        conversation.set_document(DocumentContext::new("a.txt", "text/plain", "first"));
        conversation.set_document(DocumentContext::new("b.txt", "text/plain", "second"));
        assert_eq!(conversation.document().unwrap().file_name, "b.txt");

        let cleared = conversation.clear_document().unwrap();
        assert_eq!(cleared.content, "second");
        assert!(conversation.document().is_none());
    }
}
