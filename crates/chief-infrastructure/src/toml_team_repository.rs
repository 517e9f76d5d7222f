//! TOML-based TeamRepository implementation

use std::path::PathBuf;

use chief_core::error::Result;
use chief_core::team::{TeamMember, TeamRepository};
use serde::Deserialize;

use crate::paths::{ChiefPaths, ServiceType};
use crate::sample_data::default_roster;

/// Shape of `team.toml`.
///
/// ```toml
/// [[member]]
/// id = 1
/// name = "Sarah Chen"
/// role = "Product Designer"
/// department = "Design"
/// skills = ["UI Design", "Figma"]
/// ```
#[derive(Debug, Deserialize, Default)]
struct TeamFile {
    #[serde(default, rename = "member")]
    members: Vec<TeamMember>,
}

/// Reads the team roster from `team.toml`.
///
/// Falls back to the built-in roster when the file does not exist.
pub struct TomlTeamRepository {
    path: PathBuf,
}

impl TomlTeamRepository {
    /// Creates a repository for `team.toml` in the config directory.
    pub fn new(paths: &ChiefPaths) -> Result<Self> {
        Ok(Self::with_path(paths.get_path(ServiceType::Team)?))
    }

    /// Creates a repository with a custom path (for testing)
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait::async_trait]
impl TeamRepository for TomlTeamRepository {
    async fn list_members(&self) -> Result<Vec<TeamMember>> {
        if !tokio::fs::try_exists(&self.path).await? {
            tracing::debug!(path = %self.path.display(), "No team file, using built-in roster");
            return Ok(default_roster());
        }

        let raw = tokio::fs::read_to_string(&self.path).await?;
        let file: TeamFile = toml::from_str(&raw)?;
        tracing::debug!(count = file.members.len(), "Loaded team roster");
        Ok(file.members)
    }
}
