use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ProductSummary — Totals for one product
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub product_name: String,
    pub total_quantity: u64,
    pub total_revenue_millions: f64,
}

// ---------------------------------------------------------------------------
// MonthlySummary — Quantity sold in one calendar month
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// Always the first day of the month.
    pub month_start: NaiveDate,
    pub total_quantity: u64,
}

// ---------------------------------------------------------------------------
// Aggregation — Both summaries of one dataset
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Aggregation {
    /// One row per product, in product-name order.
    pub products: Vec<ProductSummary>,
    /// One row per month, oldest first.
    pub months: Vec<MonthlySummary>,
}

impl Aggregation {
    pub fn is_empty(&self) -> bool {
        self.products.is_empty() && self.months.is_empty()
    }
}

// ---------------------------------------------------------------------------
// SummaryRow — Formatted row of the product summary table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub product_name: String,
    pub total_quantity: String,
    pub total_revenue: String,
}
