use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use chrono::{Days, Utc};
use colored::Colorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use tokio::sync::{RwLock, mpsc};

use chief_application::extraction::{DUE_IN_DAYS, UNASSIGNED};
use chief_application::{AssistantBridge, AttachmentOutcome, ReplyOutcome, TurnOutcome, UserTurn};
use chief_core::Workspace;
use chief_core::error::ChiefError;
use chief_core::project::ProjectDraft;
use chief_core::report::{DashboardSummary, ReportSummary};
use chief_core::secret::SecretService;
use chief_core::task::TaskDraft;
use chief_core::team::TeamRepository;
use chief_core::workspace::{CommandOutcome, WorkspaceCommand};
use chief_infrastructure::sample_data::sample_workspace;
use chief_infrastructure::{
    ChiefPaths, ConfigService, EnvOverrides, SecretServiceImpl, TomlTeamRepository,
    inspect_attachment,
};
use chief_interaction::GeminiCompletionClient;

use crate::commands::{COMMANDS, SlashCommand};
use crate::helper::CliHelper;
use crate::render;

/// Days until a project created from the REPL is due.
const NEW_PROJECT_DUE_IN_DAYS: u64 = 30;

pub struct ChatOptions {
    pub config_dir: Option<PathBuf>,
    pub empty: bool,
}

struct App {
    workspace: Arc<RwLock<Workspace>>,
    team: Arc<dyn TeamRepository>,
    assistant: Option<Arc<AssistantBridge>>,
    outcomes: mpsc::Sender<TurnOutcome>,
}

/// Runs the interactive REPL until `/quit` or end of input.
pub async fn run(options: ChatOptions) -> Result<()> {
    let paths = ChiefPaths::new(options.config_dir.as_deref());
    let overrides = EnvOverrides::from_env();
    let config = ConfigService::new(&paths)?
        .with_overrides(overrides.clone())
        .get_config()
        .await?;
    let secrets = SecretServiceImpl::new(options.config_dir.as_deref())?.with_overrides(overrides);

    let workspace = Arc::new(RwLock::new(if options.empty {
        Workspace::new()
    } else {
        sample_workspace()
    }));
    let team: Arc<dyn TeamRepository> = Arc::new(TomlTeamRepository::new(&paths)?);

    let assistant = match secrets.load_secrets().await?.gemini {
        Some(gemini) => {
            let provider = Arc::new(GeminiCompletionClient::from_config(
                &config.assistant,
                &gemini,
            ));
            Some(Arc::new(AssistantBridge::new(
                provider,
                workspace.clone(),
                team.clone(),
            )))
        }
        None => {
            println!(
                "{}",
                format!(
                    "No Gemini API key found. Set CHIEF_API_KEY or add it to {}; the assistant is disabled.",
                    secrets.path().display()
                )
                .yellow()
            );
            None
        }
    };

    // Assistant turns run in the background; their outcomes are printed here.
    let (outcome_tx, mut outcome_rx) = mpsc::channel::<TurnOutcome>(32);
    let response_handler = tokio::spawn(async move {
        while let Some(outcome) = outcome_rx.recv().await {
            print_outcome(&outcome);
        }
    });

    let app = App {
        workspace,
        team,
        assistant,
        outcomes: outcome_tx,
    };

    let mut rl: Editor<CliHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== Chief ===".bright_magenta().bold());
    if let Some(assistant) = &app.assistant {
        if let Some(greeting) = assistant.messages().await.first() {
            println!("{}", greeting.content.bright_blue());
        }
    }
    println!(
        "{}",
        "Type a message for the assistant, /help for commands, or /quit to exit.".bright_black()
    );
    println!();

    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                if trimmed.starts_with('/') {
                    match SlashCommand::parse(trimmed) {
                        Ok(SlashCommand::Quit) => {
                            println!("{}", "Goodbye!".bright_green());
                            break;
                        }
                        Ok(command) => {
                            if let Err(err) = app.execute(command).await {
                                eprintln!("{}", err.user_message().red());
                            }
                        }
                        Err(err) => eprintln!("{}", err.user_message().red()),
                    }
                } else {
                    app.send(UserTurn::message(trimmed));
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type /quit to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {err:?}").red());
                break;
            }
        }
    }

    drop(app);
    let _ = response_handler.await;
    Ok(())
}

impl App {
    async fn execute(&self, command: SlashCommand) -> std::result::Result<(), ChiefError> {
        match command {
            SlashCommand::Projects => {
                println!("{}", render::projects(&*self.workspace.read().await));
            }
            SlashCommand::Select(project_id) => {
                let mut workspace = self.workspace.write().await;
                workspace.apply(WorkspaceCommand::SelectProject(project_id))?;
                if let Some(project) = workspace.current_project() {
                    println!("{}", format!("Current project: {}", project.name).green());
                }
            }
            SlashCommand::Board(project_id) => {
                let workspace = self.workspace.read().await;
                let project = match project_id.as_deref() {
                    Some(id) => workspace.project(id),
                    None => workspace
                        .current_project()
                        .or_else(|| workspace.projects().first()),
                };
                match (project, project_id) {
                    (Some(project), _) => println!("{}", render::board(project)),
                    (None, Some(id)) => return Err(ChiefError::not_found("project", id)),
                    (None, None) => println!("No projects yet."),
                }
            }
            SlashCommand::Move {
                project_id,
                task_id,
                status,
            } => {
                let mut workspace = self.workspace.write().await;
                workspace.apply(WorkspaceCommand::MoveTask {
                    project_id: project_id.clone(),
                    task_id,
                    status,
                })?;
                if let Some(project) = workspace.project(&project_id) {
                    println!("{}", render::board(project));
                }
            }
            SlashCommand::NewProject(name) => {
                let today = Utc::now().date_naive();
                let due = today
                    .checked_add_days(Days::new(NEW_PROJECT_DUE_IN_DAYS))
                    .unwrap_or(today);
                let outcome = self
                    .workspace
                    .write()
                    .await
                    .apply(WorkspaceCommand::CreateProject(ProjectDraft::new(name, due)))?;
                if let CommandOutcome::ProjectCreated(project) = outcome {
                    println!(
                        "{}",
                        format!(
                            "Created project {} \"{}\" (due {})",
                            project.id, project.name, project.due_date
                        )
                        .green()
                    );
                }
            }
            SlashCommand::NewTask(title) => {
                let today = Utc::now().date_naive();
                let due = today.checked_add_days(Days::new(DUE_IN_DAYS)).unwrap_or(today);

                let mut workspace = self.workspace.write().await;
                let Some(project_id) = workspace.resolve_target() else {
                    return Err(ChiefError::validation(
                        "Create a project first with /new-project <name>.",
                    ));
                };
                let outcome = workspace.apply(WorkspaceCommand::AddTask {
                    project_id,
                    draft: TaskDraft::new(title, UNASSIGNED, due),
                })?;
                if let CommandOutcome::TaskAdded { project_id, task } = outcome {
                    println!(
                        "{}",
                        format!(
                            "Added task #{} \"{}\" to project {project_id}",
                            task.id, task.title
                        )
                        .green()
                    );
                }
            }
            SlashCommand::Attach(path) => {
                let attachment = inspect_attachment(&path).await?;
                self.send(UserTurn::attachment(attachment));
            }
            SlashCommand::Detach => match &self.assistant {
                Some(assistant) => match assistant.clear_document().await {
                    Some(document) => println!("Stopped using \"{}\".", document.file_name),
                    None => println!("No document attached."),
                },
                None => println!("{}", "The assistant is disabled.".yellow()),
            },
            SlashCommand::Dashboard => {
                let workspace = self.workspace.read().await;
                println!("{}", render::dashboard(&DashboardSummary::of(workspace.projects())));
            }
            SlashCommand::Report => {
                let workspace = self.workspace.read().await;
                println!("{}", render::report(&ReportSummary::of(workspace.projects())));
            }
            SlashCommand::Team => {
                println!("{}", render::team(&self.team.list_members().await?));
            }
            SlashCommand::Help => {
                for (name, usage) in COMMANDS {
                    println!("  {} {}", name.bright_cyan(), usage.bright_black());
                }
            }
            SlashCommand::Quit => {}
        }
        Ok(())
    }

    /// Hands a turn to the assistant without blocking the prompt.
    fn send(&self, turn: UserTurn) {
        let Some(assistant) = self.assistant.clone() else {
            println!("{}", "The assistant is disabled.".yellow());
            return;
        };

        let outcomes = self.outcomes.clone();
        tokio::spawn(async move {
            let outcome = assistant.submit(turn).await;
            let _ = outcomes.send(outcome).await;
        });
    }
}

fn print_outcome(outcome: &TurnOutcome) {
    let TurnOutcome::Handled { attachment, reply } = outcome else {
        if matches!(outcome, TurnOutcome::Busy) {
            println!("{}", "Still working on the previous message, please wait.".yellow());
        }
        return;
    };

    match attachment {
        Some(AttachmentOutcome::Loaded { file_name }) => {
            println!("{}", format!("Loaded \"{file_name}\". Ask me about it.").bright_blue());
        }
        Some(AttachmentOutcome::Rejected(err)) => println!("{}", err.user_message().red()),
        None => {}
    }

    match reply {
        Some(ReplyOutcome::Answered {
            reply,
            created_task,
        }) => {
            for line in reply.lines() {
                println!("{}", line.bright_blue());
            }
            if let Some(created) = created_task {
                println!(
                    "{}",
                    format!(
                        "Task created in project {}: #{} {} ({}, assigned to {}, due {})",
                        created.project_id,
                        created.task.id,
                        created.task.title,
                        created.task.priority,
                        created.task.assignee,
                        created.task.due_date
                    )
                    .green()
                );
            }
        }
        Some(ReplyOutcome::Failed(err)) => {
            println!("{}", format!("Error: {}", err.user_message()).red());
        }
        None => {}
    }
}
