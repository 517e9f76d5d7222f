//! Secret service implementation.
//!
//! Reads API keys from `secret.json`, with `CHIEF_API_KEY` taking precedence.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chief_core::config::{GeminiConfig, SecretConfig};
use chief_core::error::Result;
use chief_core::secret::SecretService;
use tokio::sync::RwLock;

use crate::env::EnvOverrides;
use crate::paths::{ChiefPaths, ServiceType};

/// Service for reading secret configuration.
///
/// The file is read once and cached. A missing file is treated as empty.
#[derive(Clone)]
pub struct SecretServiceImpl {
    path: PathBuf,
    overrides: EnvOverrides,
    secrets: Arc<RwLock<Option<SecretConfig>>>,
}

impl SecretServiceImpl {
    /// Creates the service for `secret.json` under `base_path` (or the
    /// default config directory).
    pub fn new(base_path: Option<&Path>) -> Result<Self> {
        let path = ChiefPaths::new(base_path).get_path(ServiceType::Secret)?;
        Ok(Self::with_path(path))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            overrides: EnvOverrides::default(),
            secrets: Arc::new(RwLock::new(None)),
        }
    }

    pub fn with_overrides(mut self, overrides: EnvOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load_secrets_internal(&self) -> Result<SecretConfig> {
        if let Some(cached) = self.secrets.read().await.as_ref() {
            return Ok(cached.clone());
        }

        let mut loaded = if tokio::fs::try_exists(&self.path).await? {
            let raw = tokio::fs::read_to_string(&self.path).await?;
            serde_json::from_str::<SecretConfig>(&raw)?
        } else {
            SecretConfig::default()
        };

        if let Some(api_key) = &self.overrides.api_key {
            tracing::debug!("Gemini API key taken from environment");
            let model_name = loaded.gemini.take().and_then(|gemini| gemini.model_name);
            loaded.gemini = Some(GeminiConfig {
                api_key: api_key.clone(),
                model_name,
            });
        }

        *self.secrets.write().await = Some(loaded.clone());
        Ok(loaded)
    }
}

#[async_trait::async_trait]
impl SecretService for SecretServiceImpl {
    async fn load_secrets(&self) -> Result<SecretConfig> {
        self.load_secrets_internal().await
    }

    async fn secret_file_exists(&self) -> bool {
        tokio::fs::try_exists(&self.path).await.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let service = SecretServiceImpl::new(Some(dir.path())).unwrap();

        assert!(!service.secret_file_exists().await);
        assert_eq!(service.load_secrets().await.unwrap(), SecretConfig::default());
    }

    #[tokio::test]
    async fn test_reads_gemini_key() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("secret.json"),
            r#"{"gemini":{"api_key":"file-key","model_name":"gemini-pro"}}"#,
        )
        .unwrap();
        let service = SecretServiceImpl::new(Some(dir.path())).unwrap();

        assert!(service.secret_file_exists().await);
        let gemini = service.load_secrets().await.unwrap().gemini.unwrap();
        assert_eq!(gemini.api_key, "file-key");
        assert_eq!(gemini.model_name.as_deref(), Some("gemini-pro"));
    }

    #[tokio::test]
    async fn test_env_key_wins_and_keeps_model() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("secret.json"),
            r#"{"gemini":{"api_key":"file-key","model_name":"gemini-pro"}}"#,
        )
        .unwrap();
        let service = SecretServiceImpl::new(Some(dir.path()))
            .unwrap()
            .with_overrides(EnvOverrides {
                api_key: Some("env-key".to_string()),
                ..Default::default()
            });

        let gemini = service.load_secrets().await.unwrap().gemini.unwrap();
        assert_eq!(gemini.api_key, "env-key");
        assert_eq!(gemini.model_name.as_deref(), Some("gemini-pro"));
    }

    #[tokio::test]
    async fn test_malformed_json_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("secret.json"), "{not json").unwrap();
        let service = SecretServiceImpl::new(Some(dir.path())).unwrap();

        let err = service.load_secrets().await.unwrap_err();
        assert!(!err.to_string().contains("not json"));
    }
}
