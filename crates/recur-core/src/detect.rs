//! Recurring-charge detection engine
//!
//! Pipeline: charge candidates -> fuzzy merchant clusters -> interval
//! statistics -> periodicity gate -> classification (detected list);
//! tagged candidates -> manual collector (manual list); both lists ->
//! reconciler.
//!
//! Each run reads the full transaction set, recomputes everything, and
//! returns a fresh list — no incremental state. A failed run returns
//! `Err` without publishing anything, so callers keep their previous
//! result. The hidden-merchant store is never consulted here: the
//! output list is always complete and `filter_visible` is the caller's
//! presentation filter.

use std::collections::HashSet;

use chrono::{NaiveDate, Utc};
use serde_json::json;
use tracing::{debug, info, warn};

use crate::classify::build_subscription;
use crate::cluster::cluster_transactions;
use crate::db::Database;
use crate::error::Result;
use crate::interval::{interval_stats, passes_periodicity_filter};
use crate::manual::collect_manual;
use crate::models::Subscription;
use crate::reconcile::reconcile;

/// Detection configuration
#[derive(Debug, Clone)]
pub struct DetectionConfig {
    /// Jaro-Winkler score a description must exceed to join the
    /// canonical merchant group at its amount
    pub similarity_threshold: f64,
    /// Gap stddev must stay below mean * tolerance for a group to count
    /// as periodic. Default 0.5 (the looser observed variant).
    pub interval_consistency_tolerance: f64,
    /// Minimum mean gap in days for a billing pattern
    pub min_interval_days: f64,
    /// Maximum mean gap in days for a billing pattern
    pub max_interval_days: f64,
    /// Minimum charges on the auto-detect path (3 charges = 2 gaps)
    pub min_occurrences: usize,
    /// Tag marking manually asserted subscriptions; empty disables the
    /// manual path
    pub manual_tag: String,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.7,
            interval_consistency_tolerance: 0.5,
            min_interval_days: 5.0,
            max_interval_days: 400.0,
            min_occurrences: 3,
            manual_tag: "subscriptions".to_string(),
        }
    }
}

/// The detection engine. Borrows the database for one or more runs;
/// holds no state between them.
pub struct SubscriptionDetector<'a> {
    db: &'a Database,
    config: DetectionConfig,
}

impl<'a> SubscriptionDetector<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self {
            db,
            config: DetectionConfig::default(),
        }
    }

    pub fn with_config(db: &'a Database, config: DetectionConfig) -> Self {
        Self { db, config }
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Run detection as of the current date.
    pub fn run(&self) -> Result<Vec<Subscription>> {
        self.run_as_of(Utc::now().date_naive())
    }

    /// Run detection with an explicit "today" (tests freeze the clock
    /// here; results are otherwise idempotent for unchanged data).
    pub fn run_as_of(&self, today: NaiveDate) -> Result<Vec<Subscription>> {
        let candidates = self.db.list_charge_candidates(None)?;
        debug!("Detection run over {} charge candidates", candidates.len());

        let groups = cluster_transactions(&candidates, self.config.similarity_threshold);

        let mut detected = Vec::new();
        for group in &groups {
            if group.charges.is_empty() {
                // Should not happen; skip rather than abort the batch
                warn!("Skipping empty merchant group {}", group.key);
                continue;
            }
            let Some(stats) = interval_stats(&group.charges, today) else {
                continue;
            };
            if !passes_periodicity_filter(&stats, &self.config) {
                continue;
            }
            detected.push(build_subscription(group, &stats, today, false));
        }

        let manual = if self.config.manual_tag.is_empty() {
            Vec::new()
        } else {
            let tagged = self
                .db
                .list_charge_candidates(Some(&self.config.manual_tag))?;
            collect_manual(&tagged, today)
        };

        let subscriptions = reconcile(detected, manual);
        info!(
            "Detection complete: {} subscriptions ({} manual)",
            subscriptions.len(),
            subscriptions.iter().filter(|s| s.is_manual).count()
        );

        Ok(subscriptions)
    }

    /// Machine-readable description of the detection parameters and
    /// query predicates — an inspection hook for transparency/debugging.
    pub fn describe(&self) -> serde_json::Value {
        json!({
            "query": {
                "predicate": "amount < 0 AND TRIM(description) != ''",
                "order": "date, id",
                "manual_tag": self.config.manual_tag,
            },
            "clustering": {
                "similarity": "jaro-winkler",
                "similarity_threshold": self.config.similarity_threshold,
                "amount_key": "rounded to cents",
                "canonical": "earliest-seen normalized description per amount",
            },
            "periodicity_filter": {
                "min_occurrences": self.config.min_occurrences,
                "interval_days_range": [self.config.min_interval_days, self.config.max_interval_days],
                "interval_consistency_tolerance": self.config.interval_consistency_tolerance,
            },
            "staleness": "days_since_last > max(interval_days * 2, 90)",
        })
    }
}

/// Partition subscriptions into (visible, hidden) against the hidden
/// key set. Pure; the engine's own output is always the full list.
pub fn filter_visible<'s>(
    subscriptions: &'s [Subscription],
    hidden: &HashSet<String>,
) -> (Vec<&'s Subscription>, Vec<&'s Subscription>) {
    subscriptions
        .iter()
        .partition(|s| !hidden.contains(&s.merchant_key))
}
