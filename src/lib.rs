//! basecamp - environment bootstrap for coupled source checkouts.
//!
//! basecamp replaces the ad-hoc `bin/install/*` shell scripts of the BETSE
//! simulator and its BETSEE desktop shell with one structured CLI: it
//! detects a supported platform, validates privileges once, installs the
//! system and Python package sets, then clones-or-pulls both projects and
//! installs them in editable mode (simulator first, shell second).
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Manifest loading and schema
//! - [`error`] - Error types and result alias
//! - [`pkg`] - System (apt) and Python (pip) package installation
//! - [`platform`] - Platform and login-shell detection
//! - [`privilege`] - One-shot privilege escalation
//! - [`repo`] - Clone-or-pull repository synchronization
//! - [`runner`] - Bootstrap orchestration
//! - [`session`] - Process-wide installation session
//! - [`shell`] - Subprocess execution
//! - [`ui`] - Terminal output, spinners, and prompts
//!
//! # Example
//!
//! ```
//! use basecamp::platform;
//!
//! // Probe a platform description without touching the real host.
//! let profile = platform::detect_with(
//!     "linux",
//!     Some("ID=ubuntu\nVERSION_ID=\"22.04\"\n"),
//! ).unwrap();
//! assert_eq!(profile.distribution, "ubuntu");
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod pkg;
pub mod platform;
pub mod privilege;
pub mod repo;
pub mod runner;
pub mod session;
pub mod shell;
pub mod ui;

pub use error::{Result, SetupError};
