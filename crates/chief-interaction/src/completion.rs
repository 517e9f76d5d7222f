//! Completion provider abstraction.

use async_trait::async_trait;
use chief_core::error::Result;

/// A text-completion backend.
///
/// Given a fully built prompt, returns the reply text. `Ok(None)` means the
/// provider answered successfully but produced no text; callers decide on a
/// fallback.
///
/// # Errors
///
/// - `ChiefError::RateLimited` when the provider refuses with HTTP 429
/// - `ChiefError::Upstream` for any other failure
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<Option<String>>;
}
