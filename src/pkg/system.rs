//! System package installation via apt-get.

use crate::error::Result;
use crate::shell::{quote, CommandRunner};

use super::{require_non_empty, run_manager, ManagerKind, PackageSpec};

/// Install or upgrade the named system packages in one apt-get invocation.
///
/// apt-get's install mode already upgrades packages that are present but
/// out of date, which gives the required upgrade-or-install semantics.
/// Requires at least one package; any manager failure is fatal (no
/// partial-continue).
pub fn install_system_packages(specs: &[PackageSpec], run: CommandRunner<'_>) -> Result<()> {
    require_non_empty(specs, ManagerKind::System)?;

    let names: Vec<String> = specs.iter().map(|s| quote(&s.name)).collect();
    let command = format!("sudo apt-get install --yes {}", names.join(" "));
    run_manager(&command, ManagerKind::System, None, run)
}
