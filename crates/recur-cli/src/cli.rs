//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// recur - Find the subscriptions hiding in your transaction history
#[derive(Parser)]
#[command(name = "recur")]
#[command(about = "Recurring-subscription detector for transaction exports", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "recur.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Import transactions from CSV
    Import {
        /// CSV file to import (date,description,amount[,tags])
        #[arg(short, long)]
        file: PathBuf,
    },

    /// List recent transactions
    Transactions {
        /// Maximum rows to show
        #[arg(short, long, default_value = "20")]
        limit: i64,
    },

    /// Detect recurring subscriptions
    Detect {
        /// Tag marking manual subscriptions (default: "subscriptions")
        #[arg(short, long)]
        tag: Option<String>,

        /// Include hidden merchants in the output
        #[arg(long)]
        show_hidden: bool,

        /// Only show subscriptions whose next charge is overdue
        #[arg(long)]
        stale_only: bool,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Hide a merchant from detect output
    Hide {
        /// Merchant key as shown by detect
        merchant: String,
    },

    /// Restore a hidden merchant
    Unhide {
        /// Merchant key as shown by 'recur hidden'
        merchant: String,
    },

    /// List hidden merchants
    Hidden,

    /// Show the detection parameters and query predicates as JSON
    Explain,
}
