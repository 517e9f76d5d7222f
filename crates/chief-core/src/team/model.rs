use serde::{Deserialize, Serialize};

/// A person on the team roster.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TeamMember {
    pub id: u32,
    /// Display name, also used as task assignee
    pub name: String,
    /// Job title (e.g. "Frontend Developer")
    pub role: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub department: String,
    /// Skills in the order they were entered
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl TeamMember {
    pub fn new(id: u32, name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            role: role.into(),
            email: String::new(),
            phone: String::new(),
            department: String::new(),
            skills: Vec::new(),
            avatar: None,
        }
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills = skills.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }
}
