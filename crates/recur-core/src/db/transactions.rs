//! Transaction storage and charge-candidate queries

use chrono::NaiveDate;
use rusqlite::params;
use tracing::debug;

use super::{parse_datetime, Database};
use crate::error::Result;
use crate::models::{NewTransaction, Transaction};

fn row_to_transaction(row: &rusqlite::Row<'_>) -> rusqlite::Result<Transaction> {
    let date_str: String = row.get(1)?;
    let tags_json: String = row.get(4)?;
    let created_at_str: String = row.get(5)?;

    Ok(Transaction {
        id: row.get(0)?,
        date: NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").unwrap_or(NaiveDate::MIN),
        description: row.get(2)?,
        amount: row.get(3)?,
        tags: serde_json::from_str(&tags_json).unwrap_or_default(),
        created_at: parse_datetime(&created_at_str),
    })
}

impl Database {
    /// Insert a transaction, deduplicating by import hash.
    ///
    /// Returns `Ok(None)` when a row with the same hash already exists.
    pub fn insert_transaction(&self, tx: &NewTransaction) -> Result<Option<i64>> {
        let conn = self.conn()?;

        let tags_json = serde_json::to_string(&tx.tags)?;
        let inserted = conn.execute(
            r#"
            INSERT OR IGNORE INTO transactions (date, description, amount, tags, import_hash)
            VALUES (?, ?, ?, ?, ?)
            "#,
            params![
                tx.date.to_string(),
                tx.description,
                tx.amount,
                tags_json,
                tx.import_hash,
            ],
        )?;

        if inserted == 0 {
            debug!("Skipping duplicate transaction: {}", tx.description);
            return Ok(None);
        }
        Ok(Some(conn.last_insert_rowid()))
    }

    /// List charge candidates for detection: debit transactions with a
    /// non-empty description, optionally filtered to rows carrying a
    /// tag, ordered by date then insertion order.
    pub fn list_charge_candidates(&self, tag: Option<&str>) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;

        const BASE: &str = r#"
            SELECT id, date, description, amount, tags, created_at
            FROM transactions
            WHERE amount < 0 AND TRIM(description) != ''
        "#;

        let mut rows = Vec::new();
        if let Some(tag) = tag {
            let query = format!(
                "{} AND EXISTS (SELECT 1 FROM json_each(transactions.tags) WHERE json_each.value = ?) ORDER BY date, id",
                BASE
            );
            let mut stmt = conn.prepare(&query)?;
            let mapped = stmt.query_map(params![tag], row_to_transaction)?;
            for tx in mapped {
                rows.push(tx?);
            }
        } else {
            let query = format!("{} ORDER BY date, id", BASE);
            let mut stmt = conn.prepare(&query)?;
            let mapped = stmt.query_map([], row_to_transaction)?;
            for tx in mapped {
                rows.push(tx?);
            }
        }

        Ok(rows)
    }

    /// List the most recent transactions (for the CLI)
    pub fn list_transactions(&self, limit: i64) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT id, date, description, amount, tags, created_at
            FROM transactions
            ORDER BY date DESC, id DESC
            LIMIT ?
            "#,
        )?;

        let rows = stmt
            .query_map(params![limit], row_to_transaction)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    pub fn count_transactions(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?;
        Ok(count)
    }
}
