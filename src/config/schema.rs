//! Manifest schema definitions.
//!
//! The manifest describes what one bootstrap run installs: the system
//! package set, the Python package sets, and the ordered install targets.
//! The built-in default describes the BETSE simulator plus the BETSEE
//! desktop shell, in that order (the shell depends on the simulator).

use serde::{Deserialize, Serialize};

/// Root manifest structure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Manifest {
    /// Display name for headers.
    pub app_name: String,

    /// OS-level packages, installed first in one apt invocation.
    pub system_packages: Vec<String>,

    /// Python-ecosystem packages.
    pub python: PythonPackages,

    /// Ordered install targets; order is load-bearing.
    pub targets: Vec<TargetConfig>,

    /// Post-install usage instructions, printed on full success.
    pub instructions: Vec<String>,
}

/// Python package sets.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PythonPackages {
    /// Fragile, version-sensitive packages installed first and in
    /// isolation (one pip invocation each).
    pub priority: Vec<String>,

    /// Remaining packages, installed in one invocation.
    pub packages: Vec<String>,
}

/// One install target as written in the manifest.
///
/// The checkout lands at `<install_root>/<dirname>`, where `dirname`
/// defaults to the target name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TargetConfig {
    pub name: String,
    pub remote_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dirname: Option<String>,
}

impl TargetConfig {
    /// Checkout directory name under the install root.
    pub fn dirname(&self) -> &str {
        self.dirname.as_deref().unwrap_or(&self.name)
    }
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            app_name: "BETSE + BETSEE".to_string(),
            system_packages: vec![
                "git".to_string(),
                "python3-pip".to_string(),
                "python3-setuptools".to_string(),
                "python3-numpy".to_string(),
                "python3-scipy".to_string(),
                "python3-matplotlib".to_string(),
                "python3-yaml".to_string(),
            ],
            python: PythonPackages {
                // PySide2 is the version-sensitive one; a failure here
                // should surface before anything else is attempted.
                priority: vec!["pyside2".to_string()],
                packages: vec!["dill".to_string(), "ruamel.yaml".to_string()],
            },
            targets: vec![
                TargetConfig {
                    name: "betse".to_string(),
                    remote_url: "https://gitlab.com/betse/betse.git".to_string(),
                    dirname: None,
                },
                TargetConfig {
                    name: "betsee".to_string(),
                    remote_url: "https://gitlab.com/betse/betsee.git".to_string(),
                    dirname: None,
                },
            ],
            instructions: vec![
                "Run 'betsee' to launch the graphical shell.".to_string(),
                "Run 'betse -h' for the simulator's command-line help.".to_string(),
                "Checkouts are editable installs: 'git pull' in either one and the change is live.".to_string(),
            ],
        }
    }
}
