//! Manifest discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, SetupError};

use super::schema::Manifest;

/// Load the manifest.
///
/// Resolution order:
/// 1. An explicit `--manifest` path; missing or unparsable is fatal
/// 2. The user manifest at `~/.config/basecamp/manifest.yml`, if present
/// 3. The built-in defaults (BETSE simulator + BETSEE shell)
pub fn load_manifest(explicit: Option<&Path>) -> Result<Manifest> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(SetupError::ManifestNotFound {
                path: path.to_path_buf(),
            });
        }
        return parse_manifest(path);
    }

    if let Some(path) = user_manifest_path() {
        if path.is_file() {
            tracing::debug!(path = %path.display(), "loading user manifest");
            return parse_manifest(&path);
        }
    }

    Ok(Manifest::default())
}

/// Location of the optional per-user manifest.
pub fn user_manifest_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("basecamp").join("manifest.yml"))
}

fn parse_manifest(path: &Path) -> Result<Manifest> {
    let contents = fs::read_to_string(path)?;
    serde_yaml::from_str(&contents).map_err(|e| SetupError::ManifestParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_missing_manifest_is_fatal() {
        let err = load_manifest(Some(Path::new("/nonexistent/manifest.yml"))).unwrap_err();
        assert!(matches!(err, SetupError::ManifestNotFound { .. }));
    }

    #[test]
    fn explicit_manifest_is_parsed() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("manifest.yml");
        fs::write(&path, "app_name: FromFile\n").unwrap();

        let manifest = load_manifest(Some(&path)).unwrap();
        assert_eq!(manifest.app_name, "FromFile");
    }

    #[test]
    fn invalid_yaml_reports_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("manifest.yml");
        fs::write(&path, "targets: {not: [a, list\n").unwrap();

        let err = load_manifest(Some(&path)).unwrap_err();
        match err {
            SetupError::ManifestParse { path: p, .. } => assert_eq!(p, path),
            other => panic!("expected ManifestParse, got {:?}", other),
        }
    }
}
