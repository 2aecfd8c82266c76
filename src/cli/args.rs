//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct. Running with no subcommand
//! is equivalent to `basecamp install`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// basecamp - environment bootstrap for coupled source checkouts.
#[derive(Debug, Parser)]
#[command(name = "basecamp")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Path to a manifest file (overrides the built-in defaults)
    #[arg(short, long, global = true)]
    pub manifest: Option<PathBuf>,

    /// Show verbose output (including subprocess output)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Arguments for the implicit `install` command.
    #[command(flatten)]
    pub install: InstallArgs,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Install system packages, Python packages, and the coupled
    /// checkouts (default if no command specified)
    Install(InstallArgs),

    /// Report platform, privilege, and checkout state without changing
    /// anything
    Status(StatusArgs),
}

/// Arguments for the `install` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InstallArgs {
    /// Directory under which the project checkouts are placed
    /// [default: ~/Applications]
    #[arg(value_name = "INSTALL_DIR")]
    pub install_dir: Option<PathBuf>,

    /// Preview commands without executing them
    #[arg(long)]
    pub dry_run: bool,

    /// Never prompt; fail instead of asking
    #[arg(long)]
    pub non_interactive: bool,
}

/// Arguments for the `status` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct StatusArgs {
    /// Directory under which the project checkouts are placed
    /// [default: ~/Applications]
    #[arg(value_name = "INSTALL_DIR")]
    pub install_dir: Option<PathBuf>,
}
