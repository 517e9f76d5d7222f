//! Unified path management for chief configuration files.

use std::path::{Path, PathBuf};

use chief_core::error::{ChiefError, Result};

const APP_DIR: &str = "chief";

/// Files read by the infrastructure services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceType {
    Config,
    Secret,
    Team,
}

impl ServiceType {
    fn file_name(self) -> &'static str {
        match self {
            ServiceType::Config => "config.toml",
            ServiceType::Secret => "secret.json",
            ServiceType::Team => "team.toml",
        }
    }
}

/// Path resolution for chief.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/chief/
/// ├── config.toml   # assistant endpoint/model, invitation backend
/// ├── secret.json   # API keys
/// └── team.toml     # team roster ([[member]] tables)
/// ```
///
/// A base directory replaces `~/.config/chief/` entirely, which keeps tests
/// away from the real home directory.
#[derive(Debug, Clone, Default)]
pub struct ChiefPaths {
    base: Option<PathBuf>,
}

impl ChiefPaths {
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// The chief configuration directory.
    pub fn config_dir(&self) -> Result<PathBuf> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or_else(|| ChiefError::config("Cannot find config directory")),
        }
    }

    pub fn get_path(&self, service: ServiceType) -> Result<PathBuf> {
        Ok(self.config_dir()?.join(service.file_name()))
    }
}
