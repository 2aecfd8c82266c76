//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results. Commands are
//! dispatched via [`CommandDispatcher`].

pub mod dispatcher;
pub mod install;
pub mod status;

use std::path::PathBuf;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};

/// Default install root: the per-user applications directory.
pub fn default_install_root() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join("Applications"))
        .unwrap_or_else(|| PathBuf::from("."))
}
