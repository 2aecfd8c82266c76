//! Install command implementation.
//!
//! The default command: runs the full bootstrap sequence against the
//! requested install root.

use std::path::PathBuf;

use crate::cli::args::InstallArgs;
use crate::config::load_manifest;
use crate::error::Result;
use crate::platform;
use crate::privilege::{self, PrivilegeContext};
use crate::runner::{default_runner, dry_run_runner, Orchestrator, OrchestratorContext};
use crate::ui::UserInterface;

use super::default_install_root;
use super::dispatcher::{Command, CommandResult};

/// The install command implementation.
pub struct InstallCommand {
    manifest_path: Option<PathBuf>,
    args: InstallArgs,
}

impl InstallCommand {
    /// Create a new install command.
    pub fn new(manifest_path: Option<PathBuf>, args: InstallArgs) -> Self {
        Self {
            manifest_path,
            args,
        }
    }
}

impl Command for InstallCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let manifest = load_manifest(self.manifest_path.as_deref())?;
        let install_root = self
            .args
            .install_dir
            .clone()
            .unwrap_or_else(default_install_root);

        let orchestrator = Orchestrator::new(manifest, install_root);

        if self.args.dry_run {
            ui.message("Dry-run mode: commands are printed, not executed");
            let runner = dry_run_runner();
            let ctx = OrchestratorContext {
                detect: &platform::detect,
                check_shell: &platform::check_login_shell,
                // Nothing escalates in a dry run.
                privilege: PrivilegeContext {
                    is_elevated: &|| true,
                    probe_cached: &|| false,
                    escalate: &|| false,
                },
                run: &runner,
            };
            orchestrator.run(ui, &ctx)?;
        } else {
            let runner = default_runner(ui.output_mode());
            let ctx = OrchestratorContext {
                detect: &platform::detect,
                check_shell: &platform::check_login_shell,
                privilege: privilege::default_context(),
                run: &runner,
            };
            orchestrator.run(ui, &ctx)?;
        }

        Ok(CommandResult::success())
    }
}
