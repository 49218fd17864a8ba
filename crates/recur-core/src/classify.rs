//! Subscription classification
//!
//! Turns interval statistics into a frequency label, annualized and
//! year-to-date cost, and a staleness flag. Everything here is a pure
//! function of already-computed fields and is recomputed on every run.

use chrono::{Datelike, NaiveDate};

use crate::cluster::{Charge, MerchantGroup};
use crate::interval::IntervalStats;
use crate::models::{Frequency, Subscription};

/// Round to `decimals` decimal places.
pub(crate) fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Bucket a rounded average interval into a billing frequency.
pub fn classify_frequency(interval_days: i64) -> Frequency {
    match interval_days {
        d if d <= 8 => Frequency::Weekly,
        d if d <= 16 => Frequency::BiWeekly,
        d if d <= 35 => Frequency::Monthly,
        d if d <= 100 => Frequency::Quarterly,
        d if d <= 200 => Frequency::SemiAnnual,
        _ => Frequency::Annual,
    }
}

/// Days without a charge after which a subscription looks lapsed.
///
/// Twice the billing interval, but never less than 90 days — monthly
/// billing hiccups shouldn't trip the flag.
pub fn stale_threshold(interval_days: i64) -> i64 {
    (interval_days * 2).max(90)
}

/// Sum of absolute charge amounts dated in `today`'s calendar year.
fn ytd_cost(charges: &[Charge], today: NaiveDate) -> f64 {
    let total: f64 = charges
        .iter()
        .filter(|c| c.date.year() == today.year())
        .map(|c| c.amount)
        .sum();
    round_to(total, 2)
}

/// Build the output entity for a group that passed the periodicity gate
/// (or came through the manual path with its relaxed interval).
pub fn build_subscription(
    group: &MerchantGroup,
    stats: &IntervalStats,
    today: NaiveDate,
    is_manual: bool,
) -> Subscription {
    let interval_days = stats.avg_interval_days.round() as i64;

    let avg_amount =
        group.charges.iter().map(|c| c.amount).sum::<f64>() / group.charges.len() as f64;

    Subscription {
        merchant: group.key.clone(),
        merchant_key: group.key.clone(),
        amount: round_to(avg_amount, 2),
        frequency: classify_frequency(interval_days),
        interval_days,
        occurrence_count: stats.occurrence_count,
        annual_cost: round_to(avg_amount * 365.0 / interval_days as f64, 2),
        ytd_cost: ytd_cost(&group.charges, today),
        first_charge: stats.first_charge,
        last_charge: stats.last_charge,
        days_since_last: stats.days_since_last,
        is_stale: stats.days_since_last > stale_threshold(interval_days),
        is_manual,
    }
}
