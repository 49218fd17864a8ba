//! Detection output command

use anyhow::Result;
use recur_core::{
    db::Database,
    detect::{filter_visible, DetectionConfig, SubscriptionDetector},
    models::{CostTotals, Subscription},
};
use serde_json::json;
use tracing::debug;

use super::truncate;

pub fn cmd_detect(
    db: &Database,
    tag: Option<&str>,
    show_hidden: bool,
    stale_only: bool,
    json: bool,
) -> Result<()> {
    let config = match tag {
        Some(t) => DetectionConfig {
            manual_tag: t.to_string(),
            ..DetectionConfig::default()
        },
        None => DetectionConfig::default(),
    };
    let detector = SubscriptionDetector::with_config(db, config);
    let subscriptions = detector.run()?;

    let hidden = db.hidden_keys()?;
    let (visible, hidden_subs) = filter_visible(&subscriptions, &hidden);
    debug!(
        "{} subscriptions detected, {} hidden",
        subscriptions.len(),
        hidden_subs.len()
    );

    // Totals always cover the visible, non-stale subset
    let active: Vec<&Subscription> = visible.iter().copied().filter(|s| !s.is_stale).collect();
    let totals = CostTotals::over(&active);

    let mut shown: Vec<&Subscription> = if show_hidden {
        subscriptions.iter().collect()
    } else {
        visible
    };
    if stale_only {
        shown.retain(|s| s.is_stale);
    }
    shown.sort_by(|a, b| {
        b.annual_cost
            .total_cmp(&a.annual_cost)
            .then_with(|| a.merchant_key.cmp(&b.merchant_key))
    });

    if json {
        let out = json!({
            "subscriptions": shown,
            "totals": totals,
            "hidden_count": hidden_subs.len(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if shown.is_empty() {
        println!("No subscriptions detected. Try:");
        println!("  recur import --file statement.csv");
        println!("  recur detect");
        if !hidden_subs.is_empty() {
            println!();
            println!(
                "({} hidden merchant(s) excluded. Use --show-hidden to include them.)",
                hidden_subs.len()
            );
        }
        return Ok(());
    }

    println!();
    println!("📋 Detected Subscriptions");
    println!("   ─────────────────────────────────────────────────────────────");

    for sub in &shown {
        let icon = if hidden.contains(&sub.merchant_key) {
            "🙈"
        } else if sub.is_stale {
            "💤"
        } else if sub.is_manual {
            "🏷️"
        } else {
            "✅"
        };

        println!(
            "   {} {:24} │ ${:>7.2} {:<11} │ ${:>8.2}/yr │ last {}",
            icon,
            truncate(&sub.merchant, 24),
            sub.amount,
            sub.frequency,
            sub.annual_cost,
            sub.last_charge
        );
    }

    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   💰 ${:.2}/mo · ${:.2}/yr · ${:.2} so far this year",
        totals.monthly, totals.annual, totals.ytd
    );

    if !show_hidden && !hidden_subs.is_empty() {
        println!();
        println!(
            "   {} hidden merchant(s) excluded. Use --show-hidden to include them.",
            hidden_subs.len()
        );
    }

    Ok(())
}
