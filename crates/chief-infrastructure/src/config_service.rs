//! Configuration service implementation.
//!
//! Loads the root configuration from `~/.config/chief/config.toml`.

use std::path::PathBuf;
use std::sync::Arc;

use chief_core::config::RootConfig;
use chief_core::error::Result;
use tokio::sync::RwLock;

use crate::env::EnvOverrides;
use crate::paths::{ChiefPaths, ServiceType};

/// Configuration service that loads and caches the root configuration.
///
/// A missing file yields the defaults. `CHIEF_API_URL` replaces the
/// configured assistant endpoint.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    overrides: EnvOverrides,
    config: Arc<RwLock<Option<RootConfig>>>,
}

impl ConfigService {
    pub fn new(paths: &ChiefPaths) -> Result<Self> {
        Ok(Self::with_path(paths.get_path(ServiceType::Config)?))
    }

    /// Creates a service reading a specific file (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            overrides: EnvOverrides::default(),
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn with_overrides(mut self, overrides: EnvOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Gets the root configuration, loading from file if not cached.
    pub async fn get_config(&self) -> Result<RootConfig> {
        if let Some(cached) = self.config.read().await.as_ref() {
            return Ok(cached.clone());
        }

        let mut config = self.load_config().await?;
        if let Some(url) = &self.overrides.api_url {
            tracing::debug!("Assistant endpoint overridden from environment");
            config.assistant.endpoint = Some(url.clone());
        }

        *self.config.write().await = Some(config.clone());
        Ok(config)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub async fn invalidate_cache(&self) {
        *self.config.write().await = None;
    }

    async fn load_config(&self) -> Result<RootConfig> {
        if !tokio::fs::try_exists(&self.path).await? {
            tracing::debug!(path = %self.path.display(), "No config file, using defaults");
            return Ok(RootConfig::default());
        }
        let raw = tokio::fs::read_to_string(&self.path).await?;
        Ok(toml::from_str(&raw)?)
    }
}
