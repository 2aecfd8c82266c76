//! Repository synchronization.
//!
//! Each install target is a git checkout that is cloned when absent,
//! fast-forwarded when present, then installed in editable mode so future
//! pulls take effect without reinstallation. State is re-probed from the
//! filesystem on every run; there is no stored session data, which is what
//! makes re-running the tool the documented recovery path.

pub mod sync;

pub use sync::{probe_state, synchronize, RepoState};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One of the coupled projects to check out and install.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallTarget {
    /// Short name, also the checkout directory name.
    pub name: String,

    /// Remote git URL.
    pub remote_url: String,

    /// Local checkout path under the install root.
    pub local_path: PathBuf,
}

impl InstallTarget {
    pub fn new(
        name: impl Into<String>,
        remote_url: impl Into<String>,
        local_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            remote_url: remote_url.into(),
            local_path: local_path.into(),
        }
    }
}
