//! Hidden-merchant overrides
//!
//! The only state that survives across detection runs. Detection output
//! always includes hidden merchants; callers filter for presentation.

use std::collections::HashSet;

use rusqlite::params;

use super::{parse_datetime, Database};
use crate::error::Result;
use crate::models::HiddenMerchant;

impl Database {
    /// Hide a merchant group. Single-key upsert; re-hiding refreshes the
    /// timestamp.
    pub fn hide_merchant(&self, merchant_key: &str) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO hidden_merchants (merchant_key)
            VALUES (?)
            ON CONFLICT(merchant_key) DO UPDATE SET hidden_at = CURRENT_TIMESTAMP
            "#,
            params![merchant_key],
        )?;
        Ok(())
    }

    /// Restore a hidden merchant. Returns false when it was not hidden.
    pub fn unhide_merchant(&self, merchant_key: &str) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM hidden_merchants WHERE merchant_key = ?",
            params![merchant_key],
        )?;
        Ok(deleted > 0)
    }

    pub fn is_hidden(&self, merchant_key: &str) -> Result<bool> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM hidden_merchants WHERE merchant_key = ?",
            params![merchant_key],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// All hidden merchants with their hide timestamps
    pub fn list_hidden(&self) -> Result<Vec<HiddenMerchant>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT merchant_key, hidden_at FROM hidden_merchants ORDER BY merchant_key",
        )?;

        let rows = stmt
            .query_map([], |row| {
                let hidden_at_str: String = row.get(1)?;
                Ok(HiddenMerchant {
                    merchant_key: row.get(0)?,
                    hidden_at: parse_datetime(&hidden_at_str),
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    /// Just the keys, for the visibility filter
    pub fn hidden_keys(&self) -> Result<HashSet<String>> {
        Ok(self
            .list_hidden()?
            .into_iter()
            .map(|h| h.merchant_key)
            .collect())
    }
}
