//! Python package installation via pip3.
//!
//! Installs into the system environment with `sudo -H` so the editable
//! checkouts installed later resolve against the same site-packages.

use crate::error::Result;
use crate::shell::{quote, CommandRunner};

use super::{require_non_empty, run_manager, ManagerKind, PackageSpec};

/// Install or upgrade Python packages in one pip3 invocation.
///
/// Each spec may be a plain name, a version pin, or a wheel URL.
/// `--upgrade` gives the same upgrade-or-install semantics as the system
/// installer; failures are tagged [`ManagerKind::Python`] so the caller
/// can report which subsystem failed.
pub fn install_python_packages(specs: &[PackageSpec], run: CommandRunner<'_>) -> Result<()> {
    require_non_empty(specs, ManagerKind::Python)?;

    let names: Vec<String> = specs.iter().map(|s| quote(&s.name)).collect();
    let command = format!("sudo -H pip3 install --upgrade {}", names.join(" "));
    run_manager(&command, ManagerKind::Python, None, run)
}

/// Install fragile, version-sensitive packages one at a time.
///
/// The priority list is installed before the bulk list, each spec in its
/// own pip invocation, so a failure there is diagnosed before cheaper
/// steps run and points at exactly one package.
pub fn install_priority_packages(specs: &[PackageSpec], run: CommandRunner<'_>) -> Result<()> {
    require_non_empty(specs, ManagerKind::Python)?;

    for spec in specs {
        let command = format!("sudo -H pip3 install --upgrade {}", quote(&spec.name));
        run_manager(&command, ManagerKind::Python, None, run)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SetupError;
    use crate::shell::CommandResult;
    use std::cell::RefCell;
    use std::time::Duration;

    fn ok_result() -> CommandResult {
        CommandResult::success(String::new(), String::new(), Duration::from_millis(1))
    }

    #[test]
    fn empty_list_is_invalid_argument() {
        let run = |_: &str, _: Option<&std::path::Path>| Ok(ok_result());
        assert!(install_python_packages(&[], &run).is_err());
        assert!(install_priority_packages(&[], &run).is_err());
    }

    #[test]
    fn bulk_install_is_one_invocation_with_upgrade() {
        let commands: RefCell<Vec<String>> = RefCell::new(Vec::new());
        let run = |cmd: &str, _: Option<&std::path::Path>| {
            commands.borrow_mut().push(cmd.to_string());
            Ok(ok_result())
        };

        let specs = [
            PackageSpec::python("dill"),
            PackageSpec::python("ruamel.yaml==0.17"),
        ];
        install_python_packages(&specs, &run).unwrap();

        let commands = commands.borrow();
        assert_eq!(commands.len(), 1);
        assert_eq!(
            commands[0],
            "sudo -H pip3 install --upgrade dill ruamel.yaml==0.17"
        );
    }

    #[test]
    fn priority_install_is_one_invocation_per_spec() {
        let commands: RefCell<Vec<String>> = RefCell::new(Vec::new());
        let run = |cmd: &str, _: Option<&std::path::Path>| {
            commands.borrow_mut().push(cmd.to_string());
            Ok(ok_result())
        };

        let specs = [
            PackageSpec::python("pyside2"),
            PackageSpec::python("https://example.test/wheels/pyside2-5.15-py3-none-any.whl"),
        ];
        install_priority_packages(&specs, &run).unwrap();

        let commands = commands.borrow();
        assert_eq!(commands.len(), 2);
        assert!(commands[0].ends_with("pyside2"));
        assert!(commands[1].contains(".whl"));
    }

    #[test]
    fn specs_with_metacharacters_are_quoted() {
        let commands: RefCell<Vec<String>> = RefCell::new(Vec::new());
        let run = |cmd: &str, _: Option<&std::path::Path>| {
            commands.borrow_mut().push(cmd.to_string());
            Ok(ok_result())
        };

        let specs = [PackageSpec::python("name with space")];
        install_priority_packages(&specs, &run).unwrap();

        assert_eq!(
            commands.borrow()[0],
            "sudo -H pip3 install --upgrade 'name with space'"
        );
    }

    #[test]
    fn priority_install_stops_at_first_failure() {
        let commands: RefCell<Vec<String>> = RefCell::new(Vec::new());
        let run = |cmd: &str, _: Option<&std::path::Path>| {
            commands.borrow_mut().push(cmd.to_string());
            Ok(CommandResult::failure(
                Some(1),
                String::new(),
                "no matching distribution".to_string(),
                Duration::from_millis(1),
            ))
        };

        let specs = [PackageSpec::python("pyside2"), PackageSpec::python("dill")];
        let err = install_priority_packages(&specs, &run).unwrap_err();

        assert_eq!(commands.borrow().len(), 1);
        match err {
            SetupError::PackageManager { kind, .. } => assert_eq!(kind, ManagerKind::Python),
            other => panic!("expected PackageManager error, got {:?}", other),
        }
    }
}
