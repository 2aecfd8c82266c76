//! Bootstrap orchestration.
//!
//! Sequences the whole run with hard-stop-on-error propagation: platform
//! check, login-shell check, install-root creation, privilege escalation,
//! system packages, Python packages (priority list first, in isolation),
//! then repository synchronization in manifest order (the shell target
//! depends on the simulator target and must come second). The first error
//! terminates the session; partially completed steps are left as-is and
//! re-running is the documented recovery path.

use std::path::{Path, PathBuf};

use crate::config::Manifest;
use crate::error::{Result, SetupError};
use crate::pkg::{install_priority_packages, install_python_packages, install_system_packages};
use crate::platform::PlatformProfile;
use crate::privilege::{self, PrivilegeContext};
use crate::repo::synchronize;
use crate::session::InstallationSession;
use crate::shell::{self, CommandResult, CommandRunner};
use crate::ui::{OutputMode, UserInterface};

/// Mockable dependencies for the orchestrator.
///
/// Production code uses [`default_runner`] plus the real platform and
/// privilege probes; tests substitute recording fakes.
pub struct OrchestratorContext<'a> {
    /// Probe the host platform.
    pub detect: &'a dyn Fn() -> Result<PlatformProfile>,

    /// Verify the login shell.
    pub check_shell: &'a dyn Fn() -> Result<()>,

    /// Privilege escalation probes.
    pub privilege: PrivilegeContext<'a>,

    /// Runner for every package-manager, git, and install subprocess.
    pub run: CommandRunner<'a>,
}

/// Build the production command runner.
///
/// Captures subprocess output so failures can carry it; in verbose mode
/// the captured output is echoed after each command completes.
pub fn default_runner(
    mode: OutputMode,
) -> impl Fn(&str, Option<&Path>) -> Result<CommandResult> {
    move |command: &str, cwd: Option<&Path>| {
        tracing::debug!(%command, "running");
        let result = shell::execute_quiet(command, cwd)?;
        if mode.shows_command_output() {
            let output = result.combined_output();
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Ok(result)
    }
}

/// Build a runner that prints commands instead of executing them.
pub fn dry_run_runner() -> impl Fn(&str, Option<&Path>) -> Result<CommandResult> {
    |command: &str, cwd: Option<&Path>| {
        match cwd {
            Some(dir) => println!("  would run: {} (in {})", command, dir.display()),
            None => println!("  would run: {}", command),
        }
        Ok(CommandResult::success(
            String::new(),
            String::new(),
            std::time::Duration::ZERO,
        ))
    }
}

/// The bootstrap orchestrator.
pub struct Orchestrator {
    manifest: Manifest,
    install_root: PathBuf,
}

impl Orchestrator {
    /// Create an orchestrator for one manifest and install root.
    pub fn new(manifest: Manifest, install_root: PathBuf) -> Self {
        Self {
            manifest,
            install_root,
        }
    }

    /// Run the full bootstrap sequence.
    ///
    /// Returns the completed session for inspection. Any error aborts
    /// immediately; nothing is rolled back.
    pub fn run(
        &self,
        ui: &mut dyn UserInterface,
        ctx: &OrchestratorContext<'_>,
    ) -> Result<InstallationSession> {
        ui.show_header(&format!("Setting up {}", self.manifest.app_name));

        // Preconditions first: nothing below runs on an unsupported host.
        let profile = (ctx.detect)()?;
        (ctx.check_shell)()?;
        ui.message(&format!(
            "Platform: {} {} ({})",
            profile.distribution, profile.version, profile.os_family
        ));

        let mut session =
            InstallationSession::new(profile, &self.manifest, self.install_root.clone());

        // Through the runner, so a preview runner only prints it.
        let mkdir = format!(
            "mkdir -p {}",
            shell::quote(&session.install_root.display().to_string())
        );
        let result = (ctx.run)(&mkdir, None)?;
        if !result.success {
            return Err(SetupError::SubprocessFailure {
                command: mkdir,
                code: result.exit_code,
                detail: result.last_line(),
            });
        }
        tracing::debug!(root = %session.install_root.display(), "install root ready");

        privilege::ensure_privileges(&mut session, ui, &ctx.privilege)?;

        if session.system_packages.is_empty() {
            ui.message("No system packages requested");
        } else {
            let label = format!(
                "Installing {} system packages",
                session.system_packages.len()
            );
            run_step(ui, &label, || {
                install_system_packages(&session.system_packages, ctx.run)
            })?;
        }

        // The fragile, version-sensitive dependencies go first and in
        // isolation so a failure there is diagnosed before cheaper steps.
        if !session.python_priority.is_empty() {
            let label = format!(
                "Installing {} priority Python packages",
                session.python_priority.len()
            );
            run_step(ui, &label, || {
                install_priority_packages(&session.python_priority, ctx.run)
            })?;
        }

        if !session.python_packages.is_empty() {
            let label = format!(
                "Installing {} Python packages",
                session.python_packages.len()
            );
            run_step(ui, &label, || {
                install_python_packages(&session.python_packages, ctx.run)
            })?;
        }

        // Strict manifest order: the shell target imports the simulator.
        for target in &session.targets {
            let label = format!("Synchronizing {}", target.name);
            run_step(ui, &label, || synchronize(target, ctx.run))?;
        }

        ui.success("Setup complete!");
        for line in &session.instructions {
            ui.show_hint(line);
        }

        Ok(session)
    }
}

/// Run one orchestrator step under a spinner.
fn run_step<F>(ui: &mut dyn UserInterface, label: &str, f: F) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    let mut spinner = ui.start_spinner(label);
    match f() {
        Ok(()) => {
            spinner.finish_success(label);
            Ok(())
        }
        Err(e) => {
            spinner.finish_error(&format!("{} failed", label));
            Err(e)
        }
    }
}
