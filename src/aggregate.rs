//! Grouping of clean records into per-product and per-month totals.

use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

use crate::config;
use crate::models::{Aggregation, CleanRecord, MonthlySummary, ProductSummary};

/// Total quantity and revenue per product, in product-name order.
///
/// Products are grouped by exact name (case-sensitive, untrimmed). Revenue is
/// summed in currency units and scaled to millions once per product.
/// Quantity totals saturate at `u64::MAX`, which cleaned records (capped at
/// [`config::MAX_QUANTITY`]) cannot reach.
pub fn aggregate_by_product(records: &[CleanRecord]) -> Vec<ProductSummary> {
    let mut groups: BTreeMap<&str, (u64, f64)> = BTreeMap::new();
    for record in records {
        let entry = groups.entry(record.product_name.as_str()).or_default();
        entry.0 = entry.0.saturating_add(record.quantity);
        entry.1 += record.revenue();
    }

    groups
        .into_iter()
        .map(|(name, (quantity, revenue))| ProductSummary {
            product_name: name.to_string(),
            total_quantity: quantity,
            total_revenue_millions: revenue / config::REVENUE_SCALE,
        })
        .collect()
}

/// Total quantity per calendar month, oldest month first.
pub fn aggregate_by_month(records: &[CleanRecord]) -> Vec<MonthlySummary> {
    let mut groups: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for record in records {
        let total = groups.entry(month_start(record.date)).or_default();
        *total = total.saturating_add(record.quantity);
    }

    groups
        .into_iter()
        .map(|(month_start, total_quantity)| MonthlySummary {
            month_start,
            total_quantity,
        })
        .collect()
}

/// Both summaries of `records`.
pub fn aggregate(records: &[CleanRecord]) -> Aggregation {
    Aggregation {
        products: aggregate_by_product(records),
        months: aggregate_by_month(records),
    }
}

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}
