//! Command-line interface for the `budgetwise` binary.

mod commands;
pub mod output;

use std::io;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;

use budgetwise_config::ConfigError;
use budgetwise_core::CoreError;

use crate::ActionError;

pub use commands::run;

#[derive(Debug, Parser)]
#[command(
    name = "budgetwise",
    version,
    about = "Personal budgeting from the command line",
    long_about = "BudgetWise records income and expense transactions, tracks monthly \
                  budget goals per category, summarizes spending and asks a language \
                  model for personalized advice."
)]
pub struct Cli {
    /// Keep data in memory only; nothing is read from or written to disk
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Print the raw `{success, data, error}` envelope as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP JSON API
    Serve {
        /// Interface to bind (defaults to the configured host)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind (defaults to the configured port)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Record a new transaction
    Add(TransactionArgs),

    /// Change fields of an existing transaction
    Edit {
        /// Transaction ID
        id: String,
        #[command(flatten)]
        fields: EditArgs,
    },

    /// Delete a transaction
    #[command(alias = "rm")]
    Delete {
        /// Transaction ID
        id: String,
    },

    /// List transactions, newest first unless a sort is given
    #[command(alias = "ls")]
    List(ListArgs),

    /// Budget goal management
    #[command(subcommand)]
    Budget(BudgetCommand),

    /// Key metrics, budget progress, expense distribution and recent activity
    Dashboard,

    /// Monthly trend and category breakdown
    Report,

    /// Ask the AI budget assistant for advice on the current data
    Insights {
        /// When the budget goals should be met
        #[arg(long, default_value = "end of the month")]
        timeline: String,
    },

    /// Show the expense and income categories
    Categories,

    /// Load the demonstration data set
    Seed,

    /// Configuration commands
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Show build metadata
    Version,
}

#[derive(Debug, Args)]
pub struct TransactionArgs {
    /// What the money was for
    #[arg(short = 'D', long)]
    pub description: String,
    /// Positive amount
    #[arg(short, long, allow_hyphen_values = true)]
    pub amount: String,
    /// `income` or `expense`
    #[arg(short = 't', long = "type")]
    pub kind: String,
    /// Category label, e.g. "Dining Out"
    #[arg(short, long)]
    pub category: String,
    /// Transaction date (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    pub date: Option<String>,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    #[arg(short = 'D', long)]
    pub description: Option<String>,
    #[arg(short, long, allow_hyphen_values = true)]
    pub amount: Option<String>,
    #[arg(short = 't', long = "type")]
    pub kind: Option<String>,
    #[arg(short, long)]
    pub category: Option<String>,
    #[arg(short, long)]
    pub date: Option<String>,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Case-insensitive text to look for in descriptions
    #[arg(short, long)]
    pub search: Option<String>,
    #[arg(short, long)]
    pub category: Option<String>,
    #[arg(short = 't', long = "type")]
    pub kind: Option<String>,
    /// First day to include (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,
    /// Last day to include (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,
    /// description, category, amount, date or type
    #[arg(long)]
    pub sort: Option<String>,
    /// ascending or descending
    #[arg(long)]
    pub direction: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum BudgetCommand {
    /// Set the monthly goal for an expense category
    Set {
        category: String,
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// List budget goals
    List,
    /// Spent versus budgeted per goal
    Status,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration and paths
    Show,
    /// Write the default configuration file if none exists
    Init,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Action(#[from] ActionError),
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Storage(#[from] CoreError),
    #[error("{0}")]
    Io(#[from] io::Error),
    /// The failure was already printed as a JSON envelope.
    #[error("")]
    Reported,
}
