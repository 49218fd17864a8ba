//! Hide/unhide command implementations
//!
//! Merchant keys are normalized the same way detection normalizes
//! descriptions, so `recur hide "netflix.com los gatos ca"` matches the
//! key detect prints.

use anyhow::Result;
use recur_core::{db::Database, normalize::normalize_description};

pub fn cmd_hide(db: &Database, merchant: &str) -> Result<()> {
    let key = normalize_description(merchant);
    db.hide_merchant(&key)?;

    println!("🙈 Hidden: {}", key);
    println!("   It will be excluded from 'recur detect' output.");
    println!("   Restore it with: recur unhide \"{}\"", key);

    Ok(())
}

pub fn cmd_unhide(db: &Database, merchant: &str) -> Result<()> {
    let key = normalize_description(merchant);

    if db.unhide_merchant(&key)? {
        println!("✅ Restored: {}", key);
    } else {
        println!("Merchant is not hidden: {}", key);
        println!("  See the current list with: recur hidden");
    }

    Ok(())
}

pub fn cmd_hidden(db: &Database) -> Result<()> {
    let hidden = db.list_hidden()?;

    if hidden.is_empty() {
        println!("No hidden merchants.");
        return Ok(());
    }

    println!();
    println!("🙈 Hidden Merchants");
    println!("   ─────────────────────────────────────────────────────────────");

    for entry in hidden {
        println!(
            "   {} │ hidden {}",
            entry.merchant_key,
            entry.hidden_at.date_naive()
        );
    }

    Ok(())
}
