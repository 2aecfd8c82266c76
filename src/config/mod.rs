//! Manifest loading and schema.
//!
//! - [`schema`] - serde structs for the YAML manifest format
//! - [`loader`] - discovery and parsing with built-in defaults

pub mod loader;
pub mod schema;

pub use loader::{load_manifest, user_manifest_path};
pub use schema::{Manifest, PythonPackages, TargetConfig};
