//! Project domain module.

mod model;

pub use model::{Project, ProjectDraft, ProjectStatus};
