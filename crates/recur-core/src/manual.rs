//! Manual-tag subscription collection
//!
//! The second producer feeding the reconciler: transactions the user
//! explicitly tagged as subscriptions. Trust is inverted here — the
//! user has asserted these are subscriptions, so the statistical gates
//! are relaxed: any exactly-matching description group with at least
//! two charges qualifies, and an interval that cannot be inferred
//! defaults to monthly.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::classify::build_subscription;
use crate::cluster::{Charge, MerchantGroup};
use crate::interval::interval_stats;
use crate::models::{Subscription, Transaction};
use crate::normalize::normalize_description;

/// Interval assumed when a tagged group has too few gaps to measure one
const DEFAULT_INTERVAL_DAYS: f64 = 30.0;

/// Derive subscriptions from explicitly tagged transactions.
///
/// `transactions` are the debit charge candidates carrying the
/// configured tag, ordered by date. Groups by exact normalized
/// description — no fuzzy matching on this path. Every result is
/// marked `is_manual`.
pub fn collect_manual(transactions: &[Transaction], today: NaiveDate) -> Vec<Subscription> {
    let mut by_description: BTreeMap<String, Vec<Charge>> = BTreeMap::new();

    for tx in transactions {
        let key = normalize_description(&tx.description);
        if key.is_empty() {
            continue;
        }
        by_description.entry(key).or_default().push(Charge {
            date: tx.date,
            amount: tx.amount.abs(),
        });
    }

    let mut subscriptions = Vec::new();

    for (key, charges) in by_description {
        if charges.len() < 2 {
            debug!("Skipping tagged merchant {} - only one charge", key);
            continue;
        }

        // len >= 2 guarantees stats exist
        let Some(mut stats) = interval_stats(&charges, today) else {
            continue;
        };

        // With a single gap the interval is unreliable, and a same-day
        // pair would make it non-positive; assume monthly in both cases.
        if stats.occurrence_count < 3 || stats.avg_interval_days.round() < 1.0 {
            stats.avg_interval_days = DEFAULT_INTERVAL_DAYS;
        }

        let avg_amount = charges.iter().map(|c| c.amount).sum::<f64>() / charges.len() as f64;
        let group = MerchantGroup {
            key: key.clone(),
            canonical_amount: (avg_amount * 100.0).round() / 100.0,
            charges,
        };

        subscriptions.push(build_subscription(&group, &stats, today, true));
    }

    subscriptions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Frequency;
    use chrono::Utc;

    fn tx(date: &str, amount: f64, description: &str) -> Transaction {
        Transaction {
            id: 0,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            description: description.to_string(),
            amount,
            tags: vec!["subscriptions".to_string()],
            created_at: Utc::now(),
        }
    }

    #[test]
    fn two_charges_qualify_with_monthly_default() {
        let txs = vec![
            tx("2025-01-03", -8.00, "Gym Membership"),
            tx("2025-03-20", -8.00, "Gym Membership"),
        ];
        let today = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        let subs = collect_manual(&txs, today);

        assert_eq!(subs.len(), 1);
        let sub = &subs[0];
        assert_eq!(sub.merchant_key, "GYM MEMBERSHIP");
        // Single gap (76 days) is ignored in favor of the monthly default
        assert_eq!(sub.interval_days, 30);
        assert_eq!(sub.frequency, Frequency::Monthly);
        assert!(sub.is_manual);
    }

    #[test]
    fn three_charges_use_the_measured_interval() {
        // Non-leap span so both gaps are exactly 365 days
        let txs = vec![
            tx("2021-01-01", -99.00, "ANNUAL SOFTWARE LICENSE"),
            tx("2022-01-01", -99.00, "ANNUAL SOFTWARE LICENSE"),
            tx("2023-01-01", -99.00, "ANNUAL SOFTWARE LICENSE"),
        ];

        let today = NaiveDate::from_ymd_opt(2023, 2, 1).unwrap();
        let subs = collect_manual(&txs, today);

        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].frequency, Frequency::Annual);
        assert_eq!(subs[0].interval_days, 365);
    }

    #[test]
    fn singleton_groups_are_dropped() {
        let txs = vec![tx("2025-01-03", -8.00, "ONE OFF PURCHASE")];
        let today = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        assert!(collect_manual(&txs, today).is_empty());
    }

    #[test]
    fn exact_normalized_match_only() {
        // Similar but not identical descriptions stay separate on this path
        let txs = vec![
            tx("2025-01-03", -8.00, "GYM MEMBERSHIP"),
            tx("2025-02-03", -8.00, "GYM MEMBERSHIP LLC"),
        ];
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert!(collect_manual(&txs, today).is_empty());
    }

    #[test]
    fn same_day_pair_falls_back_to_monthly() {
        let txs = vec![
            tx("2025-01-03", -8.00, "SPLIT CHARGE"),
            tx("2025-01-03", -8.00, "SPLIT CHARGE"),
        ];
        let today = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        let subs = collect_manual(&txs, today);
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].interval_days, 30);
    }
}
