//! Error types for basecamp operations.
//!
//! This module defines [`SetupError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Every error is fatal to the run: the orchestrator propagates the first
//!   failure with `?` and `main` turns it into a single-line diagnostic
//! - Use `SetupError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `SetupError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

use crate::pkg::ManagerKind;

/// Core error type for basecamp operations.
#[derive(Debug, Error)]
pub enum SetupError {
    /// The host OS/distribution/shell is outside the supported matrix.
    #[error("Unsupported platform: {message}")]
    UnsupportedPlatform { message: String },

    /// The user declined privilege escalation or authentication failed.
    #[error("Privilege escalation denied: {message}")]
    PrivilegeDenied { message: String },

    /// A component was called with invalid input (e.g., an empty package list).
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// A package-manager invocation exited non-zero.
    ///
    /// Tagged with the manager kind so callers can report which subsystem
    /// failed, and carries the captured manager output.
    #[error("{kind} package manager failed with exit code {code:?}\n{output}")]
    PackageManager {
        kind: ManagerKind,
        code: Option<i32>,
        output: String,
    },

    /// A target path exists but holds no version-control metadata.
    #[error("Not a git checkout: {path} exists but has no .git directory")]
    NotARepository { path: PathBuf },

    /// A synchronized checkout contains no recognized build descriptor.
    #[error("Not an installable project: {path} has no setup.py or pyproject.toml")]
    NotAProject { path: PathBuf },

    /// Manifest file not found at an explicitly requested location.
    #[error("Manifest not found: {path}")]
    ManifestNotFound { path: PathBuf },

    /// Failed to parse a manifest file.
    #[error("Failed to parse manifest at {path}: {message}")]
    ManifestParse { path: PathBuf, message: String },

    /// Any other subprocess exiting non-zero (git, build steps).
    #[error("Command `{command}` exited with code {code:?}: {detail}")]
    SubprocessFailure {
        command: String,
        code: Option<i32>,
        detail: String,
    },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for basecamp operations.
pub type Result<T> = std::result::Result<T, SetupError>;
