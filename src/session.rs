//! Process-wide installation session.
//!
//! The shell scripts this tool replaces kept their state in implicit
//! globals; here it is one explicit object constructed at startup from the
//! CLI arguments, the manifest, and the platform probe, then passed by
//! reference into each component. Nothing persists across invocations —
//! idempotence comes from re-probing filesystem and VCS state each run.

use std::path::PathBuf;

use crate::config::Manifest;
use crate::pkg::PackageSpec;
use crate::platform::PlatformProfile;
use crate::repo::InstallTarget;

/// All state for one bootstrap run.
#[derive(Debug, Clone)]
pub struct InstallationSession {
    /// Detected host platform; read-only after construction.
    pub profile: PlatformProfile,

    /// Whether elevated privileges have been validated this run.
    /// Set once by the privilege escalator; later calls are no-ops.
    pub privileges_cached: bool,

    /// Ordered system package specs.
    pub system_packages: Vec<PackageSpec>,

    /// Fragile Python packages, installed first and in isolation.
    pub python_priority: Vec<PackageSpec>,

    /// Remaining Python packages.
    pub python_packages: Vec<PackageSpec>,

    /// Ordered install targets (simulator before shell).
    pub targets: Vec<InstallTarget>,

    /// Parent directory of all target checkouts.
    pub install_root: PathBuf,

    /// Usage instructions printed on full success.
    pub instructions: Vec<String>,
}

impl InstallationSession {
    /// Build a session from a detected profile and a manifest.
    pub fn new(profile: PlatformProfile, manifest: &Manifest, install_root: PathBuf) -> Self {
        let targets = manifest
            .targets
            .iter()
            .map(|t| {
                InstallTarget::new(
                    t.name.clone(),
                    t.remote_url.clone(),
                    install_root.join(t.dirname()),
                )
            })
            .collect();

        Self {
            profile,
            privileges_cached: false,
            system_packages: manifest
                .system_packages
                .iter()
                .cloned()
                .map(PackageSpec::system)
                .collect(),
            python_priority: manifest
                .python
                .priority
                .iter()
                .cloned()
                .map(PackageSpec::python)
                .collect(),
            python_packages: manifest
                .python
                .packages
                .iter()
                .cloned()
                .map(PackageSpec::python)
                .collect(),
            targets,
            install_root,
            instructions: manifest.instructions.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pkg::ManagerKind;

    fn test_profile() -> PlatformProfile {
        PlatformProfile {
            os_family: "linux".to_string(),
            distribution: "ubuntu".to_string(),
            version: "22.04".to_string(),
        }
    }

    #[test]
    fn session_maps_targets_under_install_root() {
        let manifest = Manifest::default();
        let session =
            InstallationSession::new(test_profile(), &manifest, PathBuf::from("/tmp/apps"));

        assert_eq!(session.targets.len(), 2);
        assert_eq!(session.targets[0].local_path, PathBuf::from("/tmp/apps/betse"));
        assert_eq!(session.targets[1].local_path, PathBuf::from("/tmp/apps/betsee"));
        assert!(!session.privileges_cached);
    }

    #[test]
    fn session_tags_package_kinds() {
        let manifest = Manifest::default();
        let session =
            InstallationSession::new(test_profile(), &manifest, PathBuf::from("/tmp/apps"));

        assert!(session
            .system_packages
            .iter()
            .all(|s| s.kind == ManagerKind::System));
        assert!(session
            .python_priority
            .iter()
            .chain(session.python_packages.iter())
            .all(|s| s.kind == ManagerKind::Python));
    }
}
