//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the mediaboard binary.

use clap::{Parser, Subcommand};

use crate::client::API_BASE_ENV;

/// Command-line runner for the gallery's route loaders.
#[derive(Parser, Debug)]
#[command(name = "mediaboard", about = "Run gallery route loaders against the API", version)]
pub struct Cli {
    /// Output results as JSON instead of tables.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// API base address (falls back to the default when unset).
    #[arg(long, global = true, env = API_BASE_ENV)]
    pub base_url: Option<String>,

    /// Log request and loader activity to stderr (repeat for more detail).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Navigate to a route and print its page data.
    Load {
        /// Route path, e.g. `/projects/42/gallery`.
        path: String,
    },

    /// Navigate to a route, invalidate a dependency key and print the refreshed data.
    Reload {
        /// Route path, e.g. `/projects/42`.
        path: String,

        /// Dependency key to invalidate, e.g. `app:project`.
        key: String,
    },

    /// List the registered routes.
    Routes,
}
