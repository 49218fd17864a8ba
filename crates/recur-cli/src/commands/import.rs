//! Import command implementation

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use recur_core::{db::Database, import::import_csv};

pub fn cmd_import(db: &Database, file: &Path) -> Result<()> {
    println!("📥 Importing {}...", file.display());

    let reader =
        File::open(file).with_context(|| format!("Failed to open {}", file.display()))?;
    let stats = import_csv(db, reader)
        .with_context(|| format!("Failed to import {}", file.display()))?;

    println!(
        "✅ Imported {} transactions ({} duplicates skipped)",
        stats.imported, stats.skipped_duplicates
    );
    if stats.imported > 0 {
        println!();
        println!("Run 'recur detect' to look for subscriptions.");
    }

    Ok(())
}
