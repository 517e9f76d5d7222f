use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod helper;
mod invite;
mod render;
mod repl;

#[derive(Parser)]
#[command(name = "chief")]
#[command(about = "Chief - project board with an AI project-management assistant", long_about = None)]
struct Cli {
    /// Configuration directory (defaults to ~/.config/chief)
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive board and assistant
    Chat {
        /// Start without the sample projects
        #[arg(long)]
        empty: bool,
    },
    /// Invite someone to the team by email
    Invite {
        email: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Chat { empty } => {
            repl::run(repl::ChatOptions {
                config_dir: cli.config_dir,
                empty,
            })
            .await?
        }
        Commands::Invite { email } => invite::run(cli.config_dir.as_deref(), &email).await?,
    }

    Ok(())
}

/// Logs go to stderr so they never interleave with REPL output on stdout.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
