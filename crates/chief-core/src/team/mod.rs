//! Team roster domain module.
//!
//! The roster is a read-only collaborator for the core: the assistant reads it
//! to build prompt context and to guess assignees.

mod model;
pub mod repository;

pub use model::TeamMember;
pub use repository::TeamRepository;
