//! Platform detection.
//!
//! Determines whether the executing host matches a supported
//! OS/distribution/version combination by probing `/etc/os-release`
//! in-process (no sub-interpreter round trips) and the `SHELL`
//! environment variable. All probes are read-only.

use std::collections::HashMap;
use std::path::Path;

use regex::Regex;

use crate::error::{Result, SetupError};

/// Structured description of the executing host.
///
/// Derived once at startup; read-only afterward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformProfile {
    /// OS family, e.g. "linux".
    pub os_family: String,

    /// Distribution identifier from os-release, e.g. "ubuntu".
    pub distribution: String,

    /// Distribution version, e.g. "22.04".
    pub version: String,
}

/// One row of the supported-distribution matrix.
struct SupportedDistro {
    /// os-release `ID` value.
    id: &'static str,

    /// Minimum supported version, compared numerically component-wise.
    min_version: &'static [u32],
}

/// Distributions the system-package installer knows how to drive.
///
/// All of these ship apt; anything else fails detection rather than
/// guessing at a package manager.
const SUPPORTED: &[SupportedDistro] = &[
    SupportedDistro {
        id: "ubuntu",
        min_version: &[16, 4],
    },
    SupportedDistro {
        id: "linuxmint",
        min_version: &[18],
    },
    SupportedDistro {
        id: "elementary",
        min_version: &[0, 4],
    },
];

/// Detect the current platform.
///
/// Fails with [`SetupError::UnsupportedPlatform`] when the OS is not Linux,
/// when `/etc/os-release` is absent or unparsable (treated as "undetected",
/// never a crash), or when the distribution/version pair falls outside the
/// supported matrix.
pub fn detect() -> Result<PlatformProfile> {
    let os_release = std::fs::read_to_string("/etc/os-release").ok();
    detect_with(std::env::consts::OS, os_release.as_deref())
}

/// Detect with explicit inputs (for testing).
pub fn detect_with(os_family: &str, os_release: Option<&str>) -> Result<PlatformProfile> {
    if os_family != "linux" {
        return Err(SetupError::UnsupportedPlatform {
            message: format!("only Linux is supported, detected '{}'", os_family),
        });
    }

    let fields = os_release.map(parse_os_release).unwrap_or_default();

    let distribution = fields.get("ID").cloned().ok_or_else(|| {
        SetupError::UnsupportedPlatform {
            message: "distribution could not be detected (no os-release ID)".to_string(),
        }
    })?;

    let version_raw = fields
        .get("VERSION_ID")
        .cloned()
        .unwrap_or_default();

    let entry = SUPPORTED
        .iter()
        .find(|d| d.id == distribution)
        .ok_or_else(|| SetupError::UnsupportedPlatform {
            message: format!("distribution '{}' is not supported", distribution),
        })?;

    let version = parse_version(&version_raw).ok_or_else(|| SetupError::UnsupportedPlatform {
        message: format!(
            "could not parse version '{}' for distribution '{}'",
            version_raw, distribution
        ),
    })?;

    if !version_at_least(&version, entry.min_version) {
        return Err(SetupError::UnsupportedPlatform {
            message: format!(
                "{} {} is older than the minimum supported release",
                distribution, version_raw
            ),
        });
    }

    tracing::debug!(
        distribution = %distribution,
        version = %version_raw,
        "platform detected"
    );

    Ok(PlatformProfile {
        os_family: os_family.to_string(),
        distribution,
        version: version_raw,
    })
}

/// Verify the login shell is bash.
///
/// The install flow assumes a bash login environment, matching what the
/// installed projects' own tooling expects.
pub fn check_login_shell() -> Result<()> {
    check_login_shell_with(std::env::var("SHELL").ok().as_deref())
}

/// Check a login shell value (for testing).
pub fn check_login_shell_with(shell: Option<&str>) -> Result<()> {
    let shell = shell.ok_or_else(|| SetupError::UnsupportedPlatform {
        message: "SHELL environment variable is not set".to_string(),
    })?;

    let name = Path::new(shell)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("");

    if name == "bash" {
        Ok(())
    } else {
        Err(SetupError::UnsupportedPlatform {
            message: format!("login shell must be bash, detected '{}'", shell),
        })
    }
}

/// Parse os-release `KEY=VALUE` lines into a map, stripping quotes.
fn parse_os_release(contents: &str) -> HashMap<String, String> {
    contents
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            let (key, value) = line.split_once('=')?;
            let value = value.trim().trim_matches('"').trim_matches('\'');
            Some((key.trim().to_string(), value.to_string()))
        })
        .collect()
}

/// Extract the leading numeric components from a VERSION_ID value.
///
/// Tolerates suffixes like "16.04.5 LTS".
fn parse_version(raw: &str) -> Option<Vec<u32>> {
    let re = Regex::new(r"^(\d+(?:\.\d+)*)").expect("static version regex");
    let m = re.captures(raw.trim())?;
    m.get(1)?
        .as_str()
        .split('.')
        .map(|part| part.parse::<u32>().ok())
        .collect()
}

/// Component-wise numeric comparison, missing components count as zero.
fn version_at_least(version: &[u32], min: &[u32]) -> bool {
    let len = version.len().max(min.len());
    for i in 0..len {
        let have = version.get(i).copied().unwrap_or(0);
        let want = min.get(i).copied().unwrap_or(0);
        if have != want {
            return have > want;
        }
    }
    true
}
