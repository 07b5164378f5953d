use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "subscriber-relay")]
#[command(about = "Upload subscriber CSVs and relay each record to a webhook")]
pub struct Cli {
    /// Directory holding settings, users, and response history
    #[arg(long, default_value = "./data")]
    pub data_dir: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in as an operator
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// End the current operator session
    Logout,
    /// Parse a CSV file and send each record to the webhook
    Process {
        /// CSV file with the required subscriber columns
        file: PathBuf,
        /// Override the stored webhook URL for this run
        #[arg(long)]
        webhook_url: Option<String>,
        /// Override the stored authentication token for this run
        #[arg(long)]
        auth_token: Option<String>,
        /// Write the full JSON report to this path
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Show or change the webhook settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// Inspect, export, or clear the stored webhook responses
    Responses {
        #[command(subcommand)]
        action: ResponsesAction,
    },
    /// Manage operator accounts
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum SettingsAction {
    /// Print the current settings
    Show,
    /// Update one or both settings values
    Set {
        #[arg(long)]
        webhook_url: Option<String>,
        #[arg(long)]
        auth_token: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ResponsesAction {
    /// List the stored responses, newest first
    List,
    /// Export the stored responses as CSV
    Export {
        #[arg(long)]
        output: PathBuf,
    },
    /// Delete the stored response history
    Clear,
}

#[derive(Debug, Subcommand)]
pub enum UsersAction {
    /// List operator accounts
    List,
    /// Add an operator account
    Add {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "user")]
        role: String,
        #[arg(long)]
        email: String,
    },
    /// Remove an operator account and its credentials
    Remove { username: String },
}
