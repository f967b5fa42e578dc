use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::config;

// ---------------------------------------------------------------------------
// RawTable — The input file as read, before any validation
// ---------------------------------------------------------------------------

/// Rows of the loaded file keyed by column name.
///
/// Cells are whatever the reader produced (normally text or null).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<HashMap<String, Value>>,
}

impl RawTable {
    pub fn new(columns: Vec<String>, rows: Vec<HashMap<String, Value>>) -> Self {
        Self { columns, rows }
    }

    /// Required columns absent from this table, in canonical order.
    pub fn missing_columns(&self) -> Vec<&'static str> {
        config::required_columns()
            .into_iter()
            .filter(|required| !self.columns.iter().any(|c| c == required))
            .collect()
    }

    /// Project every row onto the four sales fields.
    pub fn records(&self) -> Vec<RawRecord> {
        self.rows.iter().map(RawRecord::from_row).collect()
    }
}

// ---------------------------------------------------------------------------
// RawRecord — One transaction row, fields unchecked
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub product_name: Option<String>,
    pub quantity: Option<String>,
    pub unit_price: Option<String>,
    pub date: Option<String>,
}

impl RawRecord {
    pub fn from_row(row: &HashMap<String, Value>) -> Self {
        let cell = |name: &str| row.get(name).and_then(cell_text);
        Self {
            product_name: cell(config::COL_PRODUCT_NAME),
            quantity: cell(config::COL_QUANTITY),
            unit_price: cell(config::COL_SALES_PRICE),
            date: cell(config::COL_DATE),
        }
    }
}

/// Text of a single cell; `None` for SQL NULL.
fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CleanRecord — A row that passed every field check
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanRecord {
    pub product_name: String,
    pub quantity: u64,
    pub unit_price: f64,
    pub date: NaiveDate,
}

impl CleanRecord {
    /// `quantity * unit_price`, in currency units (not millions).
    pub fn revenue(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}

// ---------------------------------------------------------------------------
// LoadReport — Row counts for one load
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    pub rows_read: usize,
    pub rows_kept: usize,
    pub rows_dropped: usize,
}
