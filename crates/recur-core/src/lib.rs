//! recur Core Library
//!
//! Shared functionality for the recur recurring-charge detector:
//! - SQLite storage for transactions and visibility overrides
//! - Merchant normalization and fuzzy clustering
//! - Interval analysis and subscription classification
//! - Manual-tag collection and reconciliation of the two paths
//! - Generic CSV transaction import

pub mod classify;
pub mod cluster;
pub mod db;
pub mod detect;
pub mod error;
pub mod import;
pub mod interval;
pub mod manual;
pub mod models;
pub mod normalize;
pub mod reconcile;

pub use classify::{classify_frequency, stale_threshold};
pub use cluster::{Charge, MerchantGroup};
pub use db::Database;
pub use detect::{filter_visible, DetectionConfig, SubscriptionDetector};
pub use error::{Error, Result};
pub use import::{import_csv, ImportStats};
pub use interval::IntervalStats;
pub use models::{CostTotals, Frequency, HiddenMerchant, NewTransaction, Subscription, Transaction};
pub use reconcile::reconcile;
