//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `cmd_init` - Initialize the database
//! - `cmd_explain` - Dump the detection parameters as JSON

use std::path::Path;

use anyhow::{Context, Result};
use recur_core::{db::Database, detect::SubscriptionDetector};

/// Open the database, running migrations if needed
pub fn open_db(db_path: &Path) -> Result<Database> {
    Database::new(&db_path.to_string_lossy()).context("Failed to open database")
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    open_db(db_path)?;

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Import transactions: recur import --file statement.csv");
    println!("  2. Detect subscriptions: recur detect");

    Ok(())
}

pub fn cmd_explain(db: &Database) -> Result<()> {
    let detector = SubscriptionDetector::new(db);
    println!("{}", serde_json::to_string_pretty(&detector.describe())?);
    Ok(())
}
