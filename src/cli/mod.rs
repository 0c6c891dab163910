//! Command-line interface for feedctl.

pub mod commands;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::types::LogLevel;

/// feedctl CLI
#[derive(Parser, Debug)]
#[command(name = "feedctl", version, about = "Manage RSS feeds and download tasks")]
pub struct Cli {
    /// Service base URL (overrides FEEDCTL_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Directory holding the stored credential (overrides FEEDCTL_SESSION_DIR)
    #[arg(long, global = true)]
    pub session_dir: Option<PathBuf>,

    /// Request timeout in seconds (overrides FEEDCTL_TIMEOUT_SECS)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Session management
    Auth(AuthArgs),
    /// RSS subscriptions
    Feeds(FeedArgs),
    /// Download tasks
    Magnets(MagnetArgs),
    /// Application logs
    Logs(LogsArgs),
    /// Login history
    LoginLogs,
    /// Show which view a client-side path resolves to
    Route(RouteArgs),
}

#[derive(Parser, Debug)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommands,
}

#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    /// Log in and store the issued credential
    Login(LoginArgs),
    /// Show whether a credential is stored
    Status,
    /// Remove the stored credential
    Logout,
}

/// Arguments for `feedctl auth login`.
#[derive(Parser, Debug)]
pub struct LoginArgs {
    pub username: String,

    #[arg(long, env = "FEEDCTL_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Parser, Debug)]
pub struct FeedArgs {
    #[command(subcommand)]
    pub command: FeedCommands,
}

#[derive(Subcommand, Debug)]
pub enum FeedCommands {
    /// List all feeds
    List,
    /// Show one feed
    Show { id: i64 },
    /// Subscribe to a feed
    Add { name: String, url: String },
    /// Replace a feed's name, url and update flag
    Update {
        id: i64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        url: String,
        #[arg(long, action = clap::ArgAction::Set)]
        should_update: bool,
    },
    /// Change selected fields of a feed
    Patch {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        should_update: Option<bool>,
    },
    /// Rename a feed and its download folder
    Rename {
        id: i64,
        old_name: String,
        new_name: String,
    },
    /// Delete a feed
    Delete { id: i64 },
    /// Refresh one or more feeds
    Refresh {
        #[arg(required = true)]
        ids: Vec<i64>,
    },
}

#[derive(Parser, Debug)]
pub struct MagnetArgs {
    #[command(subcommand)]
    pub command: MagnetCommands,
}

#[derive(Subcommand, Debug)]
pub enum MagnetCommands {
    /// List download tasks, optionally of one feed
    List {
        #[arg(long)]
        feed: Option<i64>,
    },
    /// Delete a download task
    Delete { id: i64 },
    /// Retry a download task
    Retry { id: i64 },
}

/// Arguments for `feedctl logs`.
#[derive(Args, Debug)]
pub struct LogsArgs {
    /// ALL, TRACE, DEBUG, INFO, SUCCESS, WARNING, ERROR or CRITICAL
    #[arg(long, default_value = "ALL")]
    pub level: LogLevel,

    /// First day, YYYY-MM-DD
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Last day, YYYY-MM-DD
    #[arg(long)]
    pub end_date: Option<NaiveDate>,

    /// Drop source location details from each line
    #[arg(long)]
    pub no_details: bool,

    #[arg(long, default_value_t = 1)]
    pub page: u32,

    #[arg(long, default_value_t = 20)]
    pub page_size: u32,
}

#[derive(Args, Debug)]
pub struct RouteArgs {
    pub path: String,
}
