//! CSV transaction import
//!
//! Accepts a generic export format: `date,description,amount[,tags]`
//! with ISO dates and `;`-separated tags. Rows are hashed for
//! deduplication so re-importing the same file is a no-op.

use chrono::NaiveDate;
use csv::ReaderBuilder;
use sha2::{Digest, Sha256};
use std::io::Read;
use tracing::debug;

use crate::db::Database;
use crate::error::{Error, Result};
use crate::models::NewTransaction;

/// Outcome of one import
#[derive(Debug, Default)]
pub struct ImportStats {
    pub imported: usize,
    pub skipped_duplicates: usize,
}

/// Generate a unique hash for deduplication
fn generate_hash(date: &NaiveDate, description: &str, amount: f64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(date.to_string().as_bytes());
    hasher.update(description.as_bytes());
    hasher.update(amount.to_be_bytes());
    hex::encode(hasher.finalize())
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| Error::InvalidData(format!("Invalid date: {}", s)))
}

fn parse_amount(s: &str) -> Result<f64> {
    let cleaned = s.trim().replace(['$', ','], "");
    cleaned
        .parse()
        .map_err(|_| Error::InvalidData(format!("Invalid amount: {}", s)))
}

/// Parse CSV rows into transactions.
///
/// Expected columns: `date,description,amount[,tags]`. A header row is
/// detected by its first field and skipped.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<NewTransaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut transactions = Vec::new();

    for (index, result) in rdr.records().enumerate() {
        let record = result?;

        let date_str = record
            .get(0)
            .ok_or_else(|| Error::InvalidData("Missing date column".into()))?;

        // Skip a header row
        if index == 0 && date_str.trim().eq_ignore_ascii_case("date") {
            continue;
        }

        let date = parse_date(date_str)?;
        let description = record
            .get(1)
            .ok_or_else(|| Error::InvalidData("Missing description column".into()))?
            .trim()
            .to_string();
        let amount = parse_amount(
            record
                .get(2)
                .ok_or_else(|| Error::InvalidData("Missing amount column".into()))?,
        )?;

        let tags: Vec<String> = record
            .get(3)
            .unwrap_or("")
            .split(';')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();

        let import_hash = generate_hash(&date, &description, amount);

        transactions.push(NewTransaction {
            date,
            description,
            amount,
            tags,
            import_hash,
        });
    }

    Ok(transactions)
}

/// Parse and store a CSV stream, deduplicating by import hash.
pub fn import_csv<R: Read>(db: &Database, reader: R) -> Result<ImportStats> {
    let transactions = parse_csv(reader)?;

    let mut stats = ImportStats::default();
    for tx in &transactions {
        match db.insert_transaction(tx)? {
            Some(_) => stats.imported += 1,
            None => stats.skipped_duplicates += 1,
        }
    }

    debug!(
        "Imported {} transactions, {} duplicates skipped",
        stats.imported, stats.skipped_duplicates
    );
    Ok(stats)
}
