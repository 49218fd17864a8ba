//! Charge interval analysis
//!
//! Turns a merchant group's ordered charge timeline into the statistics
//! used to decide whether it bills periodically.

use chrono::NaiveDate;

use crate::cluster::Charge;
use crate::detect::DetectionConfig;

/// Statistics over the consecutive day-gaps of one group's timeline
#[derive(Debug, Clone, Copy)]
pub struct IntervalStats {
    /// Number of charges (gap count + 1)
    pub occurrence_count: usize,
    /// Mean gap in days
    pub avg_interval_days: f64,
    /// Sample standard deviation of the gaps (0.0 with a single gap)
    pub stddev_interval_days: f64,
    pub first_charge: NaiveDate,
    pub last_charge: NaiveDate,
    pub days_since_last: i64,
}

/// Compute interval statistics for a date-ascending charge timeline.
///
/// Returns `None` for fewer than two charges — no gap means nothing to
/// measure.
pub fn interval_stats(charges: &[Charge], today: NaiveDate) -> Option<IntervalStats> {
    if charges.len() < 2 {
        return None;
    }

    let gaps: Vec<f64> = charges
        .windows(2)
        .map(|w| (w[1].date - w[0].date).num_days() as f64)
        .collect();

    let avg = gaps.iter().sum::<f64>() / gaps.len() as f64;
    let stddev = if gaps.len() < 2 {
        0.0
    } else {
        let variance =
            gaps.iter().map(|g| (g - avg).powi(2)).sum::<f64>() / (gaps.len() - 1) as f64;
        variance.sqrt()
    };

    let first_charge = charges[0].date;
    let last_charge = charges[charges.len() - 1].date;

    Some(IntervalStats {
        occurrence_count: gaps.len() + 1,
        avg_interval_days: avg,
        stddev_interval_days: stddev,
        first_charge,
        last_charge,
        days_since_last: (today - last_charge).num_days(),
    })
}

/// The periodicity gate: does this timeline look like a subscription?
///
/// All three must hold:
/// - at least `min_occurrences` charges (so at least 2 gaps),
/// - mean gap within `[min_interval_days, max_interval_days]`,
/// - gap stddev below `mean * interval_consistency_tolerance`.
///
/// The interval range also guarantees a nonzero interval ever reaches
/// the cost formulas downstream.
pub fn passes_periodicity_filter(stats: &IntervalStats, config: &DetectionConfig) -> bool {
    stats.occurrence_count >= config.min_occurrences
        && stats.avg_interval_days >= config.min_interval_days
        && stats.avg_interval_days <= config.max_interval_days
        && stats.stddev_interval_days
            < stats.avg_interval_days * config.interval_consistency_tolerance
}
