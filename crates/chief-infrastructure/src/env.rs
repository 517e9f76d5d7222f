//! Environment variable overrides for file-based configuration.

/// Overrides the Gemini API key from `secret.json`.
pub const API_KEY_ENV: &str = "CHIEF_API_KEY";
/// Overrides the completion endpoint from `config.toml`.
pub const API_URL_ENV: &str = "CHIEF_API_URL";

/// Values taken from the environment; empty variables count as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    pub api_key: Option<String>,
    pub api_url: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds overrides from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        Self {
            api_key: read(API_KEY_ENV),
            api_url: read(API_URL_ENV),
        }
    }
}
