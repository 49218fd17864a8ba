//! Domain models for recur

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A financial transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    pub description: String,
    /// Negative = charge, positive = credit
    pub amount: f64,
    /// User-assigned tags
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// A new transaction to be imported (before DB insertion)
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
    pub tags: Vec<String>,
    /// Hash for deduplication
    pub import_hash: String,
}

/// Subscription billing frequency, bucketed from the average charge interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Frequency {
    Weekly,
    BiWeekly,
    Monthly,
    Quarterly,
    SemiAnnual,
    Annual,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::BiWeekly => "bi-weekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::SemiAnnual => "semi-annual",
            Self::Annual => "annual",
        }
    }
}

impl std::str::FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "weekly" => Ok(Self::Weekly),
            "bi-weekly" | "biweekly" => Ok(Self::BiWeekly),
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            "semi-annual" | "semiannual" => Ok(Self::SemiAnnual),
            "annual" | "yearly" => Ok(Self::Annual),
            _ => Err(format!("Unknown frequency: {}", s)),
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A detected or manually tagged subscription
///
/// Recomputed in full on every detection run; never updated in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    /// Display name (the canonical merchant description)
    pub merchant: String,
    /// Group identity used for visibility overrides and reconciliation
    pub merchant_key: String,
    /// Average charge amount, rounded to cents
    pub amount: f64,
    pub frequency: Frequency,
    /// Rounded average days between charges
    pub interval_days: i64,
    pub occurrence_count: usize,
    pub annual_cost: f64,
    pub ytd_cost: f64,
    pub first_charge: NaiveDate,
    pub last_charge: NaiveDate,
    pub days_since_last: i64,
    /// Expected next charge appears overdue
    pub is_stale: bool,
    /// Came from (or matched) the manual tag path
    pub is_manual: bool,
}

/// A persisted visibility override ("this is not a real subscription")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HiddenMerchant {
    pub merchant_key: String,
    pub hidden_at: DateTime<Utc>,
}

/// Aggregate costs over a caller-chosen subset of subscriptions
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct CostTotals {
    pub annual: f64,
    pub monthly: f64,
    pub ytd: f64,
}

impl CostTotals {
    /// Sum costs over a slice of subscriptions.
    ///
    /// The caller decides which subset to pass (visible only, non-stale
    /// only, etc.) — the engine itself never bakes filtering into totals.
    pub fn over(subscriptions: &[&Subscription]) -> Self {
        let annual: f64 = subscriptions.iter().map(|s| s.annual_cost).sum();
        let ytd: f64 = subscriptions.iter().map(|s| s.ytd_cost).sum();
        Self {
            annual,
            monthly: annual / 12.0,
            ytd,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_round_trip() {
        for freq in [
            Frequency::Weekly,
            Frequency::BiWeekly,
            Frequency::Monthly,
            Frequency::Quarterly,
            Frequency::SemiAnnual,
            Frequency::Annual,
        ] {
            let parsed: Frequency = freq.as_str().parse().unwrap();
            assert_eq!(parsed, freq);
        }
    }

    #[test]
    fn test_frequency_aliases() {
        assert_eq!("yearly".parse::<Frequency>().unwrap(), Frequency::Annual);
        assert_eq!(
            "biweekly".parse::<Frequency>().unwrap(),
            Frequency::BiWeekly
        );
        assert!("fortnightly".parse::<Frequency>().is_err());
    }
}
