//! Configuration models.
//!
//! `RootConfig` mirrors `config.toml`; `SecretConfig` mirrors `secret.json`.
//! Loading lives in the infrastructure crate.

use serde::{Deserialize, Serialize};

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_INVITATION_BASE_URL: &str = "http://localhost:3000";

/// Root of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct RootConfig {
    #[serde(default)]
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub invitations: InvitationConfig,
}

/// Where the assistant sends completion requests.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AssistantConfig {
    /// Full `generateContent` URL. Derived from `model` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            model: default_model(),
        }
    }
}

impl AssistantConfig {
    /// The URL requests are posted to (without the `key` query parameter).
    pub fn endpoint_url(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.clone(),
            None => format!("{GEMINI_BASE_URL}/{}:generateContent", self.model),
        }
    }
}

fn default_model() -> String {
    DEFAULT_GEMINI_MODEL.to_string()
}

/// Backend used by the invitation flow.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct InvitationConfig {
    #[serde(default = "default_invitation_base_url")]
    pub base_url: String,
}

impl Default for InvitationConfig {
    fn default() -> Self {
        Self {
            base_url: default_invitation_base_url(),
        }
    }
}

fn default_invitation_base_url() -> String {
    DEFAULT_INVITATION_BASE_URL.to_string()
}

/// Root of `secret.json`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SecretConfig {
    #[serde(default)]
    pub gemini: Option<GeminiConfig>,
}

/// Gemini API credentials.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    pub api_key: String,
    #[serde(default)]
    pub model_name: Option<String>,
}
