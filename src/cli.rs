//! Command-line surface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "skinscan", version, about = "Skin-condition photo triage")]
pub struct Cli {
    /// Path to config.toml
    #[arg(long, global = true, env = "SKINSCAN_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Capture or choose a photo, classify it and save the result
    Scan(ScanArgs),

    /// Browse and manage past scans
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Account sign-in, sign-up and password reset
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },

    /// Forget remembered camera and library permissions
    ResetPermissions,
}

#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Take the photo with the camera command
    #[arg(long, conflicts_with = "file")]
    pub camera: bool,

    /// Use an existing photo instead of asking for one
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Use the photo without the review prompt
    #[arg(long, short)]
    pub yes: bool,
}

#[derive(Debug, Subcommand)]
pub enum HistoryAction {
    /// List scans, newest first
    List {
        #[arg(long)]
        json: bool,
    },
    /// Show every field of one scan
    Show { id: String },
    /// Delete one scan
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Healthy and diagnosed counts plus the latest scans
    Summary {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum AuthAction {
    Login {
        #[arg(long)]
        email: String,
    },
    Signup {
        #[arg(long)]
        email: String,
    },
    Reset {
        #[arg(long)]
        email: String,
    },
    Logout,
    /// Show the stored session, if any
    Status,
}
