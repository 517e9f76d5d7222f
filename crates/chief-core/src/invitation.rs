//! Team invitation service trait.

use crate::error::{ChiefError, Result};

/// Sends an invitation to join the team.
#[async_trait::async_trait]
pub trait InvitationService: Send + Sync {
    /// Issues an invitation token for `email` and delivers it.
    ///
    /// Both steps must succeed. A failure after the token was issued is not
    /// rolled back.
    async fn invite(&self, email: &str) -> Result<()>;
}

/// Rejects addresses that cannot possibly be delivered to.
pub fn validate_email(email: &str) -> Result<()> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !email.contains(char::is_whitespace)
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(ChiefError::validation(format!("Invalid email address: {email}")))
    }
}
