use std::path::PathBuf;

pub const COL_PRODUCT_NAME: &str = "Product Name";
pub const COL_QUANTITY: &str = "Quantity";
pub const COL_SALES_PRICE: &str = "Sales Price";
pub const COL_DATE: &str = "Date";

/// Day-month-year, the only date layout accepted by the cleaner.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Largest quantity a single row may carry. Keeps per-product and per-month
/// totals of any realistic file well inside `u64`.
pub const MAX_QUANTITY: u64 = u32::MAX as u64;

/// Revenue is always presented in millions.
pub const REVENUE_SCALE: f64 = 1_000_000.0;

pub const DEFAULT_DATA_FILE: &str = "sales_data.xlsx";
pub const DEFAULT_TITLE: &str = "Sales Data Analysis Of Electronics";

/// Environment variable read by the `sales-dashboard` binary.
pub const DATA_PATH_ENV: &str = "SALES_DASHBOARD_DATA";

/// Environment variable holding the log filter for the binary.
pub const LOG_ENV: &str = "SALES_DASHBOARD_LOG";

/// Name of the DuckDB table holding the raw rows of the loaded file.
pub const RAW_TABLE: &str = "sales_raw";

pub fn required_columns() -> [&'static str; 4] {
    [COL_PRODUCT_NAME, COL_QUANTITY, COL_SALES_PRICE, COL_DATE]
}

pub fn default_data_path() -> PathBuf {
    if let Some(desktop) = dirs::desktop_dir() {
        desktop.join(DEFAULT_DATA_FILE)
    } else {
        PathBuf::from(DEFAULT_DATA_FILE)
    }
}

/// Data path from [`DATA_PATH_ENV`], falling back to [`default_data_path`].
pub fn data_path_from_env() -> PathBuf {
    match std::env::var_os(DATA_PATH_ENV) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => default_data_path(),
    }
}
