//! Picks up a file from disk as a pending attachment.

use std::path::Path;

use chief_core::conversation::{AttachmentSource, PendingAttachment};
use chief_core::error::{ChiefError, Result};

/// Reads name, size and MIME type of `path` without loading its contents.
///
/// The MIME type is guessed from the extension; unknown extensions become
/// `application/octet-stream` and are rejected later by validation.
pub async fn inspect_attachment(path: &Path) -> Result<PendingAttachment> {
    let metadata = tokio::fs::metadata(path).await?;
    if !metadata.is_file() {
        return Err(ChiefError::validation(format!(
            "Not a file: {}",
            path.display()
        )));
    }

    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let mime_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();

    Ok(PendingAttachment {
        name,
        mime_type,
        size: metadata.len(),
        source: AttachmentSource::File(path.to_path_buf()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_inspects_text_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "hello").unwrap();

        let attachment = inspect_attachment(&path).await.unwrap();
        assert_eq!(attachment.name, "notes.txt");
        assert_eq!(attachment.mime_type, "text/plain");
        assert_eq!(attachment.size, 5);
        assert_eq!(attachment.source, AttachmentSource::File(path));
        assert!(attachment.validate().is_ok());
    }

    #[tokio::test]
    async fn test_spreadsheet_types() {
        let dir = TempDir::new().unwrap();
        for (file, mime) in [
            ("budget.xlsx", "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
            ("legacy.xls", "application/vnd.ms-excel"),
            ("report.pdf", "application/pdf"),
        ] {
            let path = dir.path().join(file);
            std::fs::write(&path, b"data").unwrap();
            assert_eq!(inspect_attachment(&path).await.unwrap().mime_type, mime);
        }
    }

    #[tokio::test]
    async fn test_unknown_extension_fails_validation() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("archive.bin");
        std::fs::write(&path, b"data").unwrap();

        let attachment = inspect_attachment(&path).await.unwrap();
        assert!(attachment.validate().unwrap_err().is_validation());
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = inspect_attachment(&dir.path().join("nope.txt")).await.unwrap_err();
        assert!(matches!(err, ChiefError::Io { .. }));
    }
}
