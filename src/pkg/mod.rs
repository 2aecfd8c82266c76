//! Package installation.
//!
//! Two installers share one contract: at least one package per call,
//! upgrade-or-install semantics, and a fatal [`SetupError::PackageManager`]
//! tagged with the manager kind when the underlying manager exits non-zero.
//!
//! - [`system`] drives apt-get for OS-level packages
//! - [`python`] drives pip3 for language-ecosystem packages

pub mod python;
pub mod system;

pub use python::{install_priority_packages, install_python_packages};
pub use system::install_system_packages;

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SetupError};
use crate::shell::CommandRunner;

/// Which package-management subsystem a spec belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManagerKind {
    /// OS-level packages via apt-get.
    System,
    /// Python-ecosystem packages via pip3.
    Python,
}

impl fmt::Display for ManagerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManagerKind::System => write!(f, "system"),
            ManagerKind::Python => write!(f, "Python"),
        }
    }
}

/// One package to install or upgrade.
///
/// For the Python kind, `name` may be a plain name, a version-pinned spec
/// (`pyside2==5.15.2`), or a direct wheel URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSpec {
    pub name: String,
    pub kind: ManagerKind,
}

impl PackageSpec {
    /// A system (apt) package.
    pub fn system(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ManagerKind::System,
        }
    }

    /// A Python (pip) package, pin, or wheel URL.
    pub fn python(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ManagerKind::Python,
        }
    }
}

/// Run one package-manager invocation and map failure to
/// [`SetupError::PackageManager`].
fn run_manager(
    command: &str,
    kind: ManagerKind,
    cwd: Option<&Path>,
    run: CommandRunner<'_>,
) -> Result<()> {
    tracing::debug!(%command, %kind, "invoking package manager");
    let result = run(command, cwd)?;
    if result.success {
        Ok(())
    } else {
        Err(SetupError::PackageManager {
            kind,
            code: result.exit_code,
            output: result.combined_output(),
        })
    }
}

/// Reject empty package lists before any subprocess is spawned.
fn require_non_empty(specs: &[PackageSpec], kind: ManagerKind) -> Result<()> {
    if specs.is_empty() {
        Err(SetupError::InvalidArgument {
            message: format!("{} package list is empty", kind),
        })
    } else {
        Ok(())
    }
}
