//! Prompt templates sent to the completion provider.

use chief_core::conversation::DocumentContext;
use chief_core::error::{ChiefError, Result};
use chief_core::team::TeamMember;
use minijinja::{Environment, context};

const DOCUMENT_TEMPLATE: &str = r#"I am an AI assistant analyzing a {{ file_name }}.

File content: {{ content }}

User question: {{ message }}

Please provide a detailed analysis and direct answer based on the file contents.
If asked about specific data, quote relevant sections.
If the information isn't in the file, say so clearly."#;

const TEAM_TEMPLATE: &str = r#"You are an AI Project Manager. You can help with creating tasks,
assigning team members, and providing recommendations based on skills.

Available team members:
{% for member in members %}
- {{ member.name }} ({{ member.role }})
  Department: {{ member.department }}
  Skills: {% if member.skills %}{{ member.skills | join(", ") }}{% else %}No skills listed{% endif %}
{% endfor %}
User message: {{ message }}"#;

/// Renders the two assistant prompts.
///
/// With an active document the prompt asks for an answer grounded in the
/// document; otherwise it lists the team roster for project-management help.
pub struct PromptBuilder {
    env: Environment<'static>,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self {
            env: Environment::new(),
        }
    }

    pub fn build(
        &self,
        document: Option<&DocumentContext>,
        members: &[TeamMember],
        message: &str,
    ) -> Result<String> {
        match document {
            Some(document) => self.document_prompt(document, message),
            None => self.team_prompt(members, message),
        }
    }

    pub fn document_prompt(&self, document: &DocumentContext, message: &str) -> Result<String> {
        self.env
            .render_str(
                DOCUMENT_TEMPLATE,
                context! {
                    file_name => document.file_name,
                    content => document.content,
                    message => message,
                },
            )
            .map_err(template_error)
    }

    pub fn team_prompt(&self, members: &[TeamMember], message: &str) -> Result<String> {
        self.env
            .render_str(
                TEAM_TEMPLATE,
                context! {
                    members => members,
                    message => message,
                },
            )
            .map_err(template_error)
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn template_error(err: minijinja::Error) -> ChiefError {
    ChiefError::internal(format!("Failed to render prompt: {err}"))
}
