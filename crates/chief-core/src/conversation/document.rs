//! Attachment rules and document context.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ChiefError, Result};

/// Largest attachment accepted, in bytes (5 MiB).
pub const MAX_ATTACHMENT_BYTES: u64 = 5 * 1024 * 1024;

/// MIME types accepted as attachments: PDF, Excel (`.xls`/`.xlsx`), plain text.
pub const ALLOWED_MIME_TYPES: [&str; 4] = [
    "application/pdf",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "text/plain",
];

/// Where the bytes of a pending attachment come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentSource {
    /// Already in memory.
    Bytes(Vec<u8>),
    /// On disk, read only after the attachment passes validation.
    File(PathBuf),
}

/// A file the user picked but whose contents have not been read yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAttachment {
    pub name: String,
    pub mime_type: String,
    /// Size in bytes as reported when the file was picked.
    pub size: u64,
    pub source: AttachmentSource,
}

impl PendingAttachment {
    pub fn from_bytes(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size: bytes.len() as u64,
            source: AttachmentSource::Bytes(bytes),
        }
    }

    /// Checks type and size. The messages are shown to the user as-is.
    pub fn validate(&self) -> Result<()> {
        if !ALLOWED_MIME_TYPES.contains(&self.mime_type.as_str()) {
            return Err(ChiefError::validation(
                "Please upload only PDF, Excel, or TXT files.",
            ));
        }
        if self.size > MAX_ATTACHMENT_BYTES {
            return Err(ChiefError::validation("File size should be less than 5MB."));
        }
        Ok(())
    }
}

/// Text of the attached document that prompts are answered from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentContext {
    pub file_name: String,
    pub mime_type: String,
    pub content: String,
}

impl DocumentContext {
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            content: content.into(),
        }
    }

    /// Builds the context from raw bytes, replacing invalid UTF-8.
    pub fn from_bytes(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: &[u8],
    ) -> Self {
        Self::new(file_name, mime_type, String::from_utf8_lossy(bytes).into_owned())
    }

    /// Assistant message announcing a freshly loaded document.
    pub fn loaded_message(&self) -> String {
        format!(
            "I've loaded \"{}\". It's a {} file. You can now ask me questions about its contents. For example:\n\
             - Ask about specific data points or sections\n\
             - Request summary or analysis\n\
             - Compare different parts of the content\n\
             - Extract specific information\n\
             What would you like to know about this file?",
            self.file_name, self.mime_type
        )
    }
}
