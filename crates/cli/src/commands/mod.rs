//! Command handlers for the VectorGo CLI.
//!
//! This module organizes all CLI commands into separate submodules.

pub mod admin;
pub mod auth;
pub mod search;
pub mod stats;
pub mod upload;

// Re-export command types for convenience
pub use admin::{DeleteCommand, HealthCommand, ResetCommand};
pub use auth::{LoginCommand, LogoutCommand};
pub use search::SearchCommand;
pub use stats::StatsCommand;
pub use upload::UploadCommand;
