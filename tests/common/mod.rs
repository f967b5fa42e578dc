//! Shared test fixtures for the sales dashboard integration tests.
//!
//! Provides small sales files written to a temporary directory plus helpers
//! for building records and sessions directly.

#![allow(dead_code)]

use chrono::NaiveDate;
use sales_dashboard::{CleanRecord, Dataset, RawRecord, SalesDashboard, Session};
use std::path::{Path, PathBuf};

/// Header plus nine rows: six valid, three invalid (bad quantity, bad date,
/// missing price).
pub const SAMPLE_CSV: &str = "\
Product Name,Quantity,Sales Price,Date
Laptop,5,1200.00,03-01-2024
Phone,20,650.00,15-01-2024
Tablet,8,400.00,20-01-2024
Laptop,3,1150.00,02-02-2024
Phone,12,700.00,14-02-2024
Headphones,40,80.00,28-03-2024
Tablet,N/A,400.00,01-03-2024
Phone,4,650.00,2024-03-05
Laptop,2,,10-03-2024
";

/// Write `contents` to `name` inside `dir` and return the full path.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

/// A dashboard over [`SAMPLE_CSV`], already loaded.
///
/// Returns `(SalesDashboard, tempfile::TempDir)`. The caller must keep the
/// `TempDir` alive so the data file can be reloaded.
pub fn sample_dashboard() -> (SalesDashboard, tempfile::TempDir) {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = write_file(tmp_dir.path(), "sales.csv", SAMPLE_CSV);
    let mut dashboard = SalesDashboard::builder().data_path(&path).build().unwrap();
    dashboard.load().unwrap();
    (dashboard, tmp_dir)
}

pub fn date(day: u32, month: u32, year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn record(name: &str, quantity: u64, unit_price: f64, (d, m, y): (u32, u32, i32)) -> CleanRecord {
    CleanRecord {
        product_name: name.to_string(),
        quantity,
        unit_price,
        date: date(d, m, y),
    }
}

pub fn raw(name: &str, quantity: &str, unit_price: &str, date: &str) -> RawRecord {
    RawRecord {
        product_name: Some(name.to_string()),
        quantity: Some(quantity.to_string()),
        unit_price: Some(unit_price.to_string()),
        date: Some(date.to_string()),
    }
}

/// The three-row example: two Widget sales in January, one Gadget in February.
pub fn widget_gadget_records() -> Vec<CleanRecord> {
    vec![
        record("Widget", 10, 2.0, (1, 1, 2024)),
        record("Widget", 5, 2.0, (15, 1, 2024)),
        record("Gadget", 3, 10.0, (2, 2, 2024)),
    ]
}

/// Three products with distinct quantity and revenue orderings.
///
/// Quantity: Cable 50 > Mouse 20 > Monitor 4.
/// Revenue:  Monitor 1.2M > Mouse 0.6M > Cable 0.25M.
pub fn ranked_records() -> Vec<CleanRecord> {
    vec![
        record("Monitor", 4, 300_000.0, (5, 1, 2024)),
        record("Mouse", 20, 30_000.0, (9, 2, 2024)),
        record("Cable", 30, 5_000.0, (12, 3, 2024)),
        record("Cable", 20, 5_000.0, (13, 3, 2024)),
    ]
}

pub fn session_with(records: Vec<CleanRecord>) -> Session {
    Session::with_dataset(Dataset::from_records(records))
}
