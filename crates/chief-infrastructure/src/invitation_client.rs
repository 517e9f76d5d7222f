//! HTTP client for the team invitation backend.

use async_trait::async_trait;
use chief_core::error::{ChiefError, Result};
use chief_core::invitation::{InvitationService, validate_email};
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Two-step invitation flow against `{base_url}/api/invite` and
/// `{base_url}/api/send-invite`.
#[derive(Clone)]
pub struct HttpInvitationClient {
    client: Client,
    base_url: String,
}

impl HttpInvitationClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn create_token(&self, email: &str) -> Result<String> {
        let response = self
            .client
            .post(self.url("/api/invite"))
            .json(&InviteRequest { email })
            .send()
            .await
            .map_err(|err| {
                ChiefError::upstream(None, format!("Failed to create invitation: {err}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChiefError::upstream(
                Some(status.as_u16()),
                "Failed to create invitation",
            ));
        }

        let body: InviteResponse = response.json().await.map_err(|err| {
            ChiefError::upstream(
                Some(status.as_u16()),
                format!("Invalid invitation response: {err}"),
            )
        })?;
        Ok(body.token)
    }

    async fn send_invite(&self, email: &str, token: &str) -> Result<()> {
        let response = self
            .client
            .post(self.url("/api/send-invite"))
            .json(&SendInviteRequest {
                email,
                invite_token: token,
            })
            .send()
            .await
            .map_err(|err| {
                ChiefError::upstream(None, format!("Failed to send email invitation: {err}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChiefError::upstream(
                Some(status.as_u16()),
                "Failed to send email invitation",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl InvitationService for HttpInvitationClient {
    async fn invite(&self, email: &str) -> Result<()> {
        validate_email(email)?;

        let token = self.create_token(email).await?;
        tracing::debug!(email, "Invitation token issued");

        if let Err(err) = self.send_invite(email, &token).await {
            tracing::warn!(email, error = %err, "Invitation token issued but email not sent");
            return Err(err);
        }
        tracing::info!(email, "Invitation sent");
        Ok(())
    }
}

#[derive(Serialize)]
struct InviteRequest<'a> {
    email: &'a str,
}

#[derive(Deserialize)]
struct InviteResponse {
    token: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SendInviteRequest<'a> {
    email: &'a str,
    invite_token: &'a str,
}
