//! Slash commands understood by the REPL.

use std::path::PathBuf;

use chief_core::error::{ChiefError, Result};
use chief_core::task::TaskStatus;

/// Command name and usage, in the order shown by `/help`.
pub const COMMANDS: [(&str, &str); 13] = [
    ("/projects", "List projects with their progress"),
    ("/select", "<project-id>  Make a project current"),
    ("/board", "[project-id]  Show the Kanban board"),
    ("/move", "<project-id> <task-id> <status>  Move a task (todo, in-progress, done)"),
    ("/new-project", "<name>  Create a project"),
    ("/new-task", "<title>  Add a task to the current project"),
    ("/attach", "<path>  Load a PDF, Excel or TXT file as the assistant's document"),
    ("/detach", "Stop answering from the attached document"),
    ("/dashboard", "Show headline numbers and upcoming deadlines"),
    ("/report", "Show status and priority distributions"),
    ("/team", "List team members"),
    ("/help", "Show this help"),
    ("/quit", "Exit"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Projects,
    Select(String),
    Board(Option<String>),
    Move {
        project_id: String,
        task_id: String,
        status: TaskStatus,
    },
    NewProject(String),
    NewTask(String),
    Attach(PathBuf),
    Detach,
    Dashboard,
    Report,
    Team,
    Help,
    Quit,
}

impl SlashCommand {
    /// Parses a line starting with `/`.
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let args: Vec<&str> = rest.split_whitespace().collect();

        let command = match (name, args.as_slice()) {
            ("/projects", []) => Self::Projects,
            ("/select", [id]) => Self::Select(id.to_string()),
            ("/board", []) => Self::Board(None),
            ("/board", [id]) => Self::Board(Some(id.to_string())),
            ("/move", [project_id, task_id, status]) => Self::Move {
                project_id: project_id.to_string(),
                task_id: task_id.to_string(),
                status: TaskStatus::parse(status)?,
            },
            ("/new-project", [_, ..]) => Self::NewProject(rest.to_string()),
            ("/new-task", [_, ..]) => Self::NewTask(rest.to_string()),
            ("/attach", [_, ..]) => Self::Attach(PathBuf::from(rest)),
            ("/detach", []) => Self::Detach,
            ("/dashboard", []) => Self::Dashboard,
            ("/report", []) => Self::Report,
            ("/team", []) => Self::Team,
            ("/help", []) => Self::Help,
            ("/quit" | "/exit", []) => Self::Quit,
            _ => return Err(usage_error(name)),
        };
        Ok(command)
    }
}

fn usage_error(name: &str) -> ChiefError {
    match COMMANDS.iter().find(|(command, _)| *command == name) {
        Some((command, usage)) => ChiefError::validation(format!("Usage: {command} {usage}")),
        None => ChiefError::validation(format!("Unknown command: {name}. Type /help for a list.")),
    }
}
