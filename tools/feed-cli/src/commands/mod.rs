//! CLI command implementations.

pub mod auth;
pub mod browse;
pub mod config;
pub mod reports;
pub mod show;
pub mod users;

use clap::{Args, Subcommand};

/// Arguments for the login command.
#[derive(Args)]
pub struct LoginArgs {
    /// Username (prompted when omitted).
    #[arg(short, long)]
    pub username: Option<String>,

    /// Password (prompted when omitted).
    #[arg(short, long)]
    pub password: Option<String>,
}

/// Arguments for the reports command.
#[derive(Args)]
pub struct ReportsArgs {
    /// Only reports in this category.
    #[arg(short, long)]
    pub category: Option<String>,

    /// Show only the first N reports.
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// User ID (default: first user).
    #[arg(short, long)]
    pub user: Option<String>,

    /// Category filter (default: all).
    #[arg(short, long)]
    pub category: Option<String>,

    /// Page number; out-of-range values are clamped.
    #[arg(short, long, default_value = "1", allow_negative_numbers = true)]
    pub page: i64,

    /// Include the signal breakdown of each item.
    #[arg(short, long)]
    pub signals: bool,
}

/// Arguments for the browse command.
#[derive(Args)]
pub struct BrowseArgs {
    /// Start with this user ID.
    #[arg(short, long)]
    pub user: Option<String>,

    /// Start with this category.
    #[arg(short, long)]
    pub category: Option<String>,

    /// Print query cache counters on exit.
    #[arg(long)]
    pub metrics: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration.
    Show,
    /// Write a config file with default values.
    Init {
        /// Target file.
        #[arg(default_value = "feed.toml")]
        path: String,

        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },
}
