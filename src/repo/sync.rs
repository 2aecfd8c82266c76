//! The clone-or-pull state machine.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::{Result, SetupError};
use crate::shell::{quote, CommandRunner};

use super::InstallTarget;

/// Filesystem state of an install target, probed fresh on every run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoState {
    /// local_path does not exist.
    Absent,

    /// local_path exists but holds no version-control metadata.
    PresentNonRepo,

    /// local_path is a git checkout.
    PresentRepo,
}

impl fmt::Display for RepoState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepoState::Absent => write!(f, "absent"),
            RepoState::PresentNonRepo => write!(f, "present (not a checkout)"),
            RepoState::PresentRepo => write!(f, "checkout"),
        }
    }
}

/// Probe the current state of a target path.
pub fn probe_state(path: &Path) -> RepoState {
    if !path.exists() {
        return RepoState::Absent;
    }
    // .git is a directory in normal checkouts and a file in worktrees;
    // either counts as version-control metadata.
    if path.is_dir() && path.join(".git").exists() {
        RepoState::PresentRepo
    } else {
        RepoState::PresentNonRepo
    }
}

/// Synchronize one target and install it in editable mode.
///
/// State transitions:
/// - Absent: clone `remote_url` into `local_path`
/// - PresentNonRepo: terminal failure, [`SetupError::NotARepository`]
/// - PresentRepo: fast-forward pull
///
/// After reaching PresentRepo the checkout must contain a build descriptor
/// (`setup.py` or `pyproject.toml`), else [`SetupError::NotAProject`]. On
/// success the target's editable install step runs inside the checkout.
/// Every failure aborts the run; re-running is safe because each branch
/// re-probes the filesystem.
pub fn synchronize(target: &InstallTarget, run: CommandRunner<'_>) -> Result<()> {
    match probe_state(&target.local_path) {
        RepoState::Absent => clone(target, run)?,
        RepoState::PresentNonRepo => {
            return Err(SetupError::NotARepository {
                path: target.local_path.clone(),
            });
        }
        RepoState::PresentRepo => pull(target, run)?,
    }

    // A preview runner executes nothing, so a freshly "cloned" path may
    // still be absent; there is nothing to verify or install then.
    if probe_state(&target.local_path) != RepoState::PresentRepo {
        return Ok(());
    }

    ensure_build_descriptor(&target.local_path)?;
    install_editable(target, run)
}

fn clone(target: &InstallTarget, run: CommandRunner<'_>) -> Result<()> {
    // Parent creation goes through the runner too, so preview runners
    // never touch the filesystem.
    if let Some(parent) = target.local_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            let mkdir = format!("mkdir -p {}", quote(&parent.display().to_string()));
            let result = run(&mkdir, None)?;
            if !result.success {
                return Err(SetupError::SubprocessFailure {
                    command: mkdir,
                    code: result.exit_code,
                    detail: result.last_line(),
                });
            }
        }
    }

    let command = format!(
        "git clone {} {}",
        quote(&target.remote_url),
        quote(&target.local_path.display().to_string())
    );
    tracing::info!(target = %target.name, url = %target.remote_url, "cloning");

    let result = run(&command, None)?;
    if result.success {
        return Ok(());
    }

    // A failed clone must not leave a partial directory that a later run
    // would misclassify, even one where git already wrote .git metadata.
    // The path did not exist before (state was Absent), so whatever git
    // left behind is ours to remove.
    if target.local_path.exists() {
        let _ = fs::remove_dir_all(&target.local_path);
    }

    Err(SetupError::SubprocessFailure {
        command,
        code: result.exit_code,
        detail: result.last_line(),
    })
}

fn pull(target: &InstallTarget, run: CommandRunner<'_>) -> Result<()> {
    let command = "git pull --ff-only".to_string();
    tracing::info!(target = %target.name, "pulling");

    let result = run(&command, Some(&target.local_path))?;
    if result.success {
        Ok(())
    } else {
        Err(SetupError::SubprocessFailure {
            command: format!("{} ({})", command, target.local_path.display()),
            code: result.exit_code,
            detail: result.last_line(),
        })
    }
}

/// Build descriptors the editable install step understands.
const BUILD_DESCRIPTORS: &[&str] = &["setup.py", "pyproject.toml"];

fn ensure_build_descriptor(path: &Path) -> Result<()> {
    let found = BUILD_DESCRIPTORS
        .iter()
        .any(|name| path.join(name).is_file());
    if found {
        Ok(())
    } else {
        Err(SetupError::NotAProject {
            path: path.to_path_buf(),
        })
    }
}

fn install_editable(target: &InstallTarget, run: CommandRunner<'_>) -> Result<()> {
    let command = "sudo -H pip3 install --editable .".to_string();
    tracing::info!(target = %target.name, "installing in editable mode");

    let result = run(&command, Some(&target.local_path))?;
    if result.success {
        Ok(())
    } else {
        Err(SetupError::SubprocessFailure {
            command: format!("{} ({})", command, target.local_path.display()),
            code: result.exit_code,
            detail: result.last_line(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::CommandResult;
    use std::cell::RefCell;
    use std::time::Duration;
    use tempfile::TempDir;

    fn target_in(temp: &TempDir, name: &str) -> InstallTarget {
        InstallTarget::new(
            name,
            format!("https://example.test/{}.git", name),
            temp.path().join(name),
        )
    }

    fn ok_result() -> CommandResult {
        CommandResult::success(String::new(), String::new(), Duration::from_millis(1))
    }

    fn fail_result(code: i32, stderr: &str) -> CommandResult {
        CommandResult::failure(
            Some(code),
            String::new(),
            stderr.to_string(),
            Duration::from_millis(1),
        )
    }

    /// Fake runner that materializes a realistic checkout on `git clone`.
    fn cloning_runner<'a>(
        commands: &'a RefCell<Vec<String>>,
    ) -> impl Fn(&str, Option<&Path>) -> Result<CommandResult> + 'a {
        move |cmd: &str, _cwd: Option<&Path>| {
            commands.borrow_mut().push(cmd.to_string());
            if let Some(dest) = cmd.strip_prefix("git clone ") {
                let dest = dest.split_whitespace().nth(1).unwrap();
                fs::create_dir_all(Path::new(dest).join(".git")).unwrap();
                fs::write(Path::new(dest).join("setup.py"), "# build descriptor").unwrap();
            }
            Ok(ok_result())
        }
    }

    #[test]
    fn probe_absent() {
        let temp = TempDir::new().unwrap();
        assert_eq!(probe_state(&temp.path().join("missing")), RepoState::Absent);
    }

    #[test]
    fn probe_present_non_repo() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("plain");
        fs::create_dir(&dir).unwrap();
        assert_eq!(probe_state(&dir), RepoState::PresentNonRepo);
    }

    #[test]
    fn probe_plain_file_is_non_repo() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("file");
        fs::write(&file, "not a directory").unwrap();
        assert_eq!(probe_state(&file), RepoState::PresentNonRepo);
    }

    #[test]
    fn probe_present_repo() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("checkout");
        fs::create_dir_all(dir.join(".git")).unwrap();
        assert_eq!(probe_state(&dir), RepoState::PresentRepo);
    }

    #[test]
    fn absent_target_is_cloned_then_installed() {
        let temp = TempDir::new().unwrap();
        let target = target_in(&temp, "sim");
        let commands = RefCell::new(Vec::new());

        synchronize(&target, &cloning_runner(&commands)).unwrap();

        let commands = commands.borrow();
        assert_eq!(commands.len(), 2);
        assert!(commands[0].starts_with("git clone https://example.test/sim.git"));
        assert_eq!(commands[1], "sudo -H pip3 install --editable .");
        assert_eq!(probe_state(&target.local_path), RepoState::PresentRepo);
    }

    #[test]
    fn present_non_repo_fails_without_clone_or_pull() {
        let temp = TempDir::new().unwrap();
        let target = target_in(&temp, "sim");
        fs::create_dir_all(&target.local_path).unwrap();

        let commands: RefCell<Vec<String>> = RefCell::new(Vec::new());
        let run = |cmd: &str, _: Option<&Path>| {
            commands.borrow_mut().push(cmd.to_string());
            Ok(ok_result())
        };

        let err = synchronize(&target, &run).unwrap_err();
        assert!(matches!(err, SetupError::NotARepository { .. }));
        assert!(commands.borrow().is_empty());
    }

    #[test]
    fn present_repo_is_pulled_not_cloned() {
        let temp = TempDir::new().unwrap();
        let target = target_in(&temp, "sim");
        fs::create_dir_all(target.local_path.join(".git")).unwrap();
        fs::write(target.local_path.join("setup.py"), "").unwrap();

        let commands: RefCell<Vec<String>> = RefCell::new(Vec::new());
        let run = |cmd: &str, _: Option<&Path>| {
            commands.borrow_mut().push(cmd.to_string());
            Ok(ok_result())
        };

        synchronize(&target, &run).unwrap();

        let commands = commands.borrow();
        assert_eq!(commands[0], "git pull --ff-only");
        assert!(!commands.iter().any(|c| c.starts_with("git clone")));
    }

    #[test]
    fn synchronize_twice_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let target = target_in(&temp, "sim");
        let commands = RefCell::new(Vec::new());

        synchronize(&target, &cloning_runner(&commands)).unwrap();
        assert_eq!(probe_state(&target.local_path), RepoState::PresentRepo);

        synchronize(&target, &cloning_runner(&commands)).unwrap();
        assert_eq!(probe_state(&target.local_path), RepoState::PresentRepo);

        let commands = commands.borrow();
        // First run clones, second pulls; no destructive operation either time.
        assert!(commands[0].starts_with("git clone"));
        assert_eq!(commands[2], "git pull --ff-only");
    }

    #[test]
    fn clone_quotes_paths_with_spaces() {
        let temp = TempDir::new().unwrap();
        let local = temp.path().join("My Applications").join("sim");
        let target = InstallTarget::new("sim", "https://example.test/sim.git", local.clone());

        let commands: RefCell<Vec<String>> = RefCell::new(Vec::new());
        let run = |cmd: &str, _: Option<&Path>| {
            commands.borrow_mut().push(cmd.to_string());
            Ok(ok_result())
        };

        synchronize(&target, &run).unwrap();

        let commands = commands.borrow();
        assert_eq!(
            commands[0],
            format!("mkdir -p '{}'", local.parent().unwrap().display())
        );
        assert_eq!(
            commands[1],
            format!("git clone https://example.test/sim.git '{}'", local.display())
        );
    }

    #[test]
    fn preview_runner_touches_no_files() {
        let temp = TempDir::new().unwrap();
        let target = target_in(&temp, "sim");

        // Succeeds without materializing anything, like a dry-run preview.
        let run = |_: &str, _: Option<&Path>| Ok(ok_result());
        synchronize(&target, &run).unwrap();

        assert_eq!(probe_state(&target.local_path), RepoState::Absent);
    }

    #[test]
    fn failed_clone_leaves_no_partial_checkout() {
        let temp = TempDir::new().unwrap();
        let target = target_in(&temp, "sim");

        let run = |cmd: &str, _: Option<&Path>| {
            if let Some(dest) = cmd.strip_prefix("git clone ") {
                // Simulate git dying mid-transfer with a partial directory.
                let dest = dest.split_whitespace().nth(1).unwrap();
                fs::create_dir_all(dest).unwrap();
            }
            Ok(fail_result(128, "fatal: could not resolve host\n"))
        };

        let err = synchronize(&target, &run).unwrap_err();
        match err {
            SetupError::SubprocessFailure { code, detail, .. } => {
                assert_eq!(code, Some(128));
                assert!(detail.contains("could not resolve host"));
            }
            other => panic!("expected SubprocessFailure, got {:?}", other),
        }
        assert_eq!(probe_state(&target.local_path), RepoState::Absent);
    }

    #[test]
    fn failed_clone_with_git_metadata_is_still_removed() {
        let temp = TempDir::new().unwrap();
        let target = target_in(&temp, "sim");

        let run = |cmd: &str, _: Option<&Path>| {
            if let Some(dest) = cmd.strip_prefix("git clone ") {
                // Simulate git dying after .git was already written.
                let dest = dest.split_whitespace().nth(1).unwrap();
                fs::create_dir_all(Path::new(dest).join(".git")).unwrap();
            }
            Ok(fail_result(128, "fatal: early EOF\n"))
        };

        let err = synchronize(&target, &run).unwrap_err();
        assert!(matches!(err, SetupError::SubprocessFailure { .. }));
        assert_eq!(probe_state(&target.local_path), RepoState::Absent);
    }

    #[test]
    fn checkout_without_build_descriptor_is_not_a_project() {
        let temp = TempDir::new().unwrap();
        let target = target_in(&temp, "sim");
        fs::create_dir_all(target.local_path.join(".git")).unwrap();

        let run = |_: &str, _: Option<&Path>| Ok(ok_result());
        let err = synchronize(&target, &run).unwrap_err();
        assert!(matches!(err, SetupError::NotAProject { .. }));
    }

    #[test]
    fn pyproject_counts_as_build_descriptor() {
        let temp = TempDir::new().unwrap();
        let target = target_in(&temp, "sim");
        fs::create_dir_all(target.local_path.join(".git")).unwrap();
        fs::write(target.local_path.join("pyproject.toml"), "[project]").unwrap();

        let run = |_: &str, _: Option<&Path>| Ok(ok_result());
        assert!(synchronize(&target, &run).is_ok());
    }

    #[test]
    fn editable_install_runs_inside_checkout() {
        let temp = TempDir::new().unwrap();
        let target = target_in(&temp, "sim");
        fs::create_dir_all(target.local_path.join(".git")).unwrap();
        fs::write(target.local_path.join("setup.py"), "").unwrap();

        let cwds: RefCell<Vec<Option<std::path::PathBuf>>> = RefCell::new(Vec::new());
        let run = |_: &str, cwd: Option<&Path>| {
            cwds.borrow_mut().push(cwd.map(|p| p.to_path_buf()));
            Ok(ok_result())
        };

        synchronize(&target, &run).unwrap();

        let cwds = cwds.borrow();
        // pull then editable install, both inside the checkout
        assert_eq!(cwds[0].as_deref(), Some(target.local_path.as_path()));
        assert_eq!(cwds[1].as_deref(), Some(target.local_path.as_path()));
    }
}
