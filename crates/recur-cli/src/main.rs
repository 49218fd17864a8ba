//! recur CLI - Recurring-charge detector
//!
//! Usage:
//!   recur init                 Initialize database
//!   recur import --file CSV    Import transactions
//!   recur detect               Detect recurring subscriptions
//!   recur hide KEY             Hide a merchant from detect output

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db),
        Commands::Import { file } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_import(&db, &file)
        }
        Commands::Transactions { limit } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_transactions_list(&db, limit)
        }
        Commands::Detect {
            tag,
            show_hidden,
            stale_only,
            json,
        } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_detect(&db, tag.as_deref(), show_hidden, stale_only, json)
        }
        Commands::Hide { merchant } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_hide(&db, &merchant)
        }
        Commands::Unhide { merchant } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_unhide(&db, &merchant)
        }
        Commands::Hidden => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_hidden(&db)
        }
        Commands::Explain => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_explain(&db)
        }
    }
}
