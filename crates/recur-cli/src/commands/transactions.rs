//! Transaction command implementations

use anyhow::Result;
use recur_core::db::Database;

use super::truncate;

pub fn cmd_transactions_list(db: &Database, limit: i64) -> Result<()> {
    let transactions = db.list_transactions(limit)?;

    if transactions.is_empty() {
        println!("No transactions found. Import some with:");
        println!("  recur import --file statement.csv");
        return Ok(());
    }

    println!();
    println!("📝 Recent Transactions");
    println!("   ─────────────────────────────────────────────────────────────");

    for tx in transactions {
        let amount_str = if tx.amount < 0.0 {
            format!("\x1b[31m${:.2}\x1b[0m", tx.amount.abs()) // Red for charges
        } else {
            format!("\x1b[32m+${:.2}\x1b[0m", tx.amount) // Green for credits
        };

        let tags_str = if tx.tags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", tx.tags.join(", "))
        };

        println!(
            "   {} │ {:>10} │ {}{}",
            tx.date,
            amount_str,
            truncate(&tx.description, 40),
            tags_str
        );
    }

    Ok(())
}
