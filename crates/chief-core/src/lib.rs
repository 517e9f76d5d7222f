pub mod board;
pub mod config;
pub mod conversation;
pub mod error;
pub mod invitation;
pub mod project;
pub mod report;
pub mod secret;
pub mod task;
pub mod team;
pub mod workspace;

// Re-export common error type
pub use error::ChiefError;
pub use workspace::Workspace;
