use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use chief_core::invitation::InvitationService;
use chief_infrastructure::{ChiefPaths, ConfigService, EnvOverrides, HttpInvitationClient};

pub async fn run(config_dir: Option<&Path>, email: &str) -> Result<()> {
    let paths = ChiefPaths::new(config_dir);
    let config = ConfigService::new(&paths)?
        .with_overrides(EnvOverrides::from_env())
        .get_config()
        .await?;

    let client = HttpInvitationClient::new(config.invitations.base_url);
    match client.invite(email).await {
        Ok(()) => println!("{}", "Invitation sent successfully!".bright_green()),
        Err(err) => {
            tracing::debug!(error = %err, "Invitation failed");
            eprintln!("{}", "Failed to send invitation. Please try again.".red());
            eprintln!("{}", err.user_message().bright_black());
        }
    }
    Ok(())
}
