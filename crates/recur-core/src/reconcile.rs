//! Reconciliation of detected and manually tagged subscriptions
//!
//! Two independent producers (pattern detection, manual tagging) feed
//! this single pure reducer. The goal is a union with no real-world
//! merchant represented twice.
//!
//! Match precedence:
//! 1. exact `merchant_key` equality,
//! 2. fallback fingerprint: rounded amount + first token of the
//!    uppercased merchant name.
//!
//! When both paths see the same merchant, the detected entry wins on
//! statistics (larger sample, stricter consistency checks) and only
//! inherits the `is_manual` confirmation mark.

use std::collections::HashSet;

use crate::models::Subscription;
use crate::normalize::first_token;

/// The fallback identity: "9.99|ACME" style.
fn fingerprint(sub: &Subscription) -> String {
    format!(
        "{:.2}|{}",
        sub.amount,
        first_token(&sub.merchant.to_uppercase())
    )
}

/// Merge the detected and manual candidate lists.
///
/// Every detected subscription survives; those matching a manual entry
/// by key or fingerprint come out marked `is_manual`. Manual entries
/// matching nothing are appended unmodified.
pub fn reconcile(detected: Vec<Subscription>, manual: Vec<Subscription>) -> Vec<Subscription> {
    let manual_keys: HashSet<&str> = manual.iter().map(|s| s.merchant_key.as_str()).collect();
    let manual_prints: HashSet<String> = manual.iter().map(fingerprint).collect();

    let mut merged: Vec<Subscription> = Vec::with_capacity(detected.len() + manual.len());
    let mut detected_keys: HashSet<String> = HashSet::new();
    let mut detected_prints: HashSet<String> = HashSet::new();

    for mut sub in detected {
        detected_keys.insert(sub.merchant_key.clone());
        detected_prints.insert(fingerprint(&sub));

        if manual_keys.contains(sub.merchant_key.as_str())
            || manual_prints.contains(&fingerprint(&sub))
        {
            sub.is_manual = true;
        }
        merged.push(sub);
    }

    for sub in manual {
        if detected_keys.contains(&sub.merchant_key) || detected_prints.contains(&fingerprint(&sub))
        {
            continue;
        }
        merged.push(sub);
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Frequency;
    use chrono::NaiveDate;

    fn sub(merchant: &str, amount: f64, occurrences: usize, is_manual: bool) -> Subscription {
        Subscription {
            merchant: merchant.to_string(),
            merchant_key: merchant.to_string(),
            amount,
            frequency: Frequency::Monthly,
            interval_days: 30,
            occurrence_count: occurrences,
            annual_cost: amount * 12.0,
            ytd_cost: amount,
            first_charge: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            last_charge: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            days_since_last: 10,
            is_stale: false,
            is_manual,
        }
    }

    #[test]
    fn exact_key_match_marks_detected_entry() {
        let detected = vec![sub("NETFLIX.COM", 15.99, 6, false)];
        let manual = vec![sub("NETFLIX.COM", 15.99, 2, true)];

        let merged = reconcile(detected, manual);
        assert_eq!(merged.len(), 1);
        assert!(merged[0].is_manual);
        // Detected statistics are authoritative
        assert_eq!(merged[0].occurrence_count, 6);
    }

    #[test]
    fn fingerprint_match_dedups_differing_keys() {
        // "9.99|ACME" matches both despite different merchant keys
        let detected = vec![sub("ACME", 9.99, 5, false)];
        let manual = vec![sub("ACME CORP", 9.99, 2, true)];

        let merged = reconcile(detected, manual);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].merchant_key, "ACME");
        assert!(merged[0].is_manual);
        assert_eq!(merged[0].occurrence_count, 5);
    }

    #[test]
    fn unmatched_manual_entries_are_appended() {
        let detected = vec![sub("NETFLIX.COM", 15.99, 6, false)];
        let manual = vec![sub("GYM MEMBERSHIP", 45.00, 2, true)];

        let merged = reconcile(detected, manual);
        assert_eq!(merged.len(), 2);
        assert!(!merged[0].is_manual);
        assert!(merged[1].is_manual);
        assert_eq!(merged[1].merchant_key, "GYM MEMBERSHIP");
    }

    #[test]
    fn amount_differences_defeat_the_fingerprint() {
        // Same first token, different price: distinct fingerprints
        let detected = vec![sub("ACME", 9.99, 5, false)];
        let manual = vec![sub("ACME CORP", 19.99, 2, true)];

        let merged = reconcile(detected, manual);
        assert_eq!(merged.len(), 2);
        assert!(!merged[0].is_manual);
    }

    #[test]
    fn empty_inputs() {
        assert!(reconcile(Vec::new(), Vec::new()).is_empty());

        let manual_only = reconcile(Vec::new(), vec![sub("X SERVICE", 5.0, 2, true)]);
        assert_eq!(manual_only.len(), 1);

        let detected_only = reconcile(vec![sub("Y SERVICE", 5.0, 4, false)], Vec::new());
        assert_eq!(detected_only.len(), 1);
        assert!(!detected_only[0].is_manual);
    }
}
