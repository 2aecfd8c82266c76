//! Status command implementation.
//!
//! Read-only report of the state every install step would probe: platform
//! support, login shell, broker-cached privileges, and per-target checkout
//! state. Nothing is mutated, so this is safe to run anywhere.

use std::path::PathBuf;

use crate::cli::args::StatusArgs;
use crate::config::load_manifest;
use crate::error::Result;
use crate::platform;
use crate::repo::probe_state;
use crate::shell;
use crate::ui::UserInterface;

use super::default_install_root;
use super::dispatcher::{Command, CommandResult};

/// The status command implementation.
pub struct StatusCommand {
    manifest_path: Option<PathBuf>,
    args: StatusArgs,
}

impl StatusCommand {
    /// Create a new status command.
    pub fn new(manifest_path: Option<PathBuf>, args: StatusArgs) -> Self {
        Self {
            manifest_path,
            args,
        }
    }
}

impl Command for StatusCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let manifest = load_manifest(self.manifest_path.as_deref())?;
        let install_root = self
            .args
            .install_dir
            .clone()
            .unwrap_or_else(default_install_root);

        ui.show_header(&format!("{} status", manifest.app_name));

        match platform::detect() {
            Ok(profile) => ui.message(&format!(
                "Platform: {} {} (supported)",
                profile.distribution, profile.version
            )),
            Err(e) => ui.warning(&format!("Platform: {}", e)),
        }

        match platform::check_login_shell() {
            Ok(()) => ui.message("Login shell: bash"),
            Err(e) => ui.warning(&format!("Login shell: {}", e)),
        }

        let privileges = if shell::is_elevated() {
            "running as root"
        } else if shell::execute_check("sudo -n true 2>/dev/null", None) {
            "sudo credentials cached"
        } else {
            "sudo credentials not cached"
        };
        ui.message(&format!("Privileges: {}", privileges));

        ui.message(&format!("Install root: {}", install_root.display()));

        // Same name-to-path mapping the install command uses.
        let targets: Vec<_> = manifest
            .targets
            .iter()
            .map(|t| (t.name.clone(), install_root.join(t.dirname())))
            .collect();

        for (name, path) in &targets {
            let state = probe_state(path);
            ui.message(&format!("  {}: {} ({})", name, state, path.display()));
        }

        Ok(CommandResult::success())
    }
}
