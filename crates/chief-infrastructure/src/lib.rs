//! Infrastructure layer for Chief.
//!
//! File-backed configuration, secrets and team roster, attachment loading,
//! the invitation HTTP client and the built-in sample data.

pub mod attachment_loader;
pub mod config_service;
pub mod env;
pub mod invitation_client;
pub mod paths;
pub mod sample_data;
pub mod secret_service;
pub mod toml_team_repository;

pub use attachment_loader::inspect_attachment;
pub use config_service::ConfigService;
pub use env::EnvOverrides;
pub use invitation_client::HttpInvitationClient;
pub use paths::ChiefPaths;
pub use secret_service::SecretServiceImpl;
pub use toml_team_repository::TomlTeamRepository;
